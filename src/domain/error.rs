//! Error types for the directory site core.
//!
//! This module defines the centralized error type [`DirectoryError`] and a type
//! alias [`Result`] used throughout the crate. All errors are implemented with
//! the `thiserror` crate for automatic `Error` trait implementation.
//!
//! # Error Policy
//!
//! Not everything that can go wrong becomes an error here. Malformed
//! pagination parameters are silently default-substituted by the resolver and
//! never surface as errors, and a failed identity verification during entry
//! submission is recovered into a form-level outcome rather than propagated.
//! The variants below cover the failures that *do* cross module boundaries.

use thiserror::Error;

/// The main error type for directory operations.
///
/// Consolidates failures from the external collaborators (catalog storage,
/// search index, identity verification, availability probes). Route handlers
/// map these onto response classes:
/// [`DirectoryError::NotFound`] becomes a not-found response, everything else
/// a generic server error.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No catalog entry exists with the requested id.
    ///
    /// Surfaced distinctly from generic collaborator failures so the request
    /// boundary can respond with a not-found page instead of a server error.
    #[error("no entry found with id '{0}'")]
    NotFound(String),

    /// An identity token failed verification.
    ///
    /// Route handlers recover this into a user-visible validation message on
    /// the submission form; it never terminates a request.
    #[error("identity token rejected: {0}")]
    InvalidToken(String),

    /// The catalog collaborator failed to list, fetch or store entries.
    ///
    /// Not retried locally; propagated to the request boundary as a terminal
    /// failure for that request.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// The search collaborator failed to execute a query.
    #[error("search error: {0}")]
    Search(String),

    /// An offline-availability probe could not reach its target.
    ///
    /// The element binder degrades this silently to "not available"; the
    /// variant exists so probe implementations have something to return.
    #[error("availability probe error: {0}")]
    Probe(String),
}

/// A specialized `Result` type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;
