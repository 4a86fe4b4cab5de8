//! Server-side view-state pipeline.
//!
//! Turns raw request parameters into the display model handed to rendering,
//! in two deterministic steps:
//!
//! 1. [`resolver`]: raw parameters → normalized [`ViewState`](resolver::ViewState)
//!    (synchronous, never fails)
//! 2. [`composer`]: view state + fetched entry page → [`DisplayModel`](composer::DisplayModel)
//!
//! The collaborator fetch between the two steps lives in [`crate::routes`];
//! this module does no I/O.

pub mod composer;
pub mod resolver;

pub use composer::{compose, DisplayModel, RenderTarget};
pub use resolver::{resolve, RawListParams, SortOrder, ViewState};
