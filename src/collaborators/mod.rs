//! External collaborator contracts.
//!
//! Persistence, search indexing, token verification, audit lookup and
//! offline-availability probing are all external services; the core only
//! depends on the traits below and treats every implementation as a black
//! box. Each asynchronous call is a single suspension point with explicit
//! result/failure branches, no callback chains.
//!
//! # Design Philosophy
//!
//! The traits are minimal and use-case shaped, not a generic data-access
//! layer. Each method maps directly to one operation a route handler or the
//! element binder performs.
//!
//! # Implementations
//!
//! [`memory`] provides in-memory implementations used by tests and
//! embedders that need a self-contained directory.

pub mod memory;

use crate::domain::entry::{AppEntry, AuditResult, EntryPage, User};
use crate::domain::error::Result;
use crate::view::resolver::SortOrder;

pub use memory::{InMemoryCatalog, InMemorySearchIndex};

/// Persistent storage of catalog entries.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetches one window of entries in the given sort order.
    ///
    /// `has_more` on the returned page reports whether entries exist past
    /// `start + limit`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Catalog`](crate::domain::DirectoryError::Catalog)
    /// if the store is unreachable or the fetch fails.
    async fn list(&self, start: usize, limit: usize, sort: SortOrder) -> Result<EntryPage>;

    /// Counts all entries in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    async fn count(&self) -> Result<usize>;

    /// Fetches a single entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`](crate::domain::DirectoryError::NotFound)
    /// if no entry has the given id, distinct from generic store failures.
    async fn find(&self, id: &str) -> Result<AppEntry>;

    /// Inserts the entry, or updates it if one with the same manifest URL
    /// already exists. Returns the stored entry with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn create_or_update(&self, entry: AppEntry) -> Result<AppEntry>;
}

/// Full-text search over the catalog.
#[async_trait::async_trait]
pub trait SearchIndex: Send + Sync {
    /// Runs a query against the index and returns matching entries.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Search`](crate::domain::DirectoryError::Search)
    /// if the index is unreachable or the query fails.
    async fn search(&self, query: &str) -> Result<EntryPage>;
}

/// Verification of identity tokens presented on submission.
#[async_trait::async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verifies an id token and resolves the user behind it.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidToken`](crate::domain::DirectoryError::InvalidToken)
    /// for tokens that fail verification.
    async fn verify(&self, token: &str) -> Result<User>;
}

/// Lookup of automated audit results for an entry.
#[async_trait::async_trait]
pub trait AuditLog: Send + Sync {
    /// Fetches the audit result for an entry, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails; a missing result is
    /// `Ok(None)`, not an error.
    async fn find_by_entry_id(&self, entry_id: &str) -> Result<Option<AuditResult>>;
}

/// Lightweight existence probe against a URL, used by the element binder to
/// decide whether an offline card still has a locally cached copy.
#[async_trait::async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Reports whether a cached copy of `href` is available.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Probe`](crate::domain::DirectoryError::Probe)
    /// on network failure; the binder degrades this to "not available".
    async fn is_available(&self, href: &str) -> Result<bool>;
}
