//! Domain layer for the directory site.
//!
//! This module contains the core domain types, independent of the request
//! boundary, the browser boundary, and the external collaborators. Both the
//! server half (resolver/composer/routes) and the client half (signal
//! propagation) build on these types.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`entry`]: Catalog entry, entry page, audit and user models

pub mod entry;
pub mod error;

pub use entry::{AppEntry, AuditResult, EntryPage, User};
pub use error::{DirectoryError, Result};
