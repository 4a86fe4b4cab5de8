//! Core domain models for catalog entries.
//!
//! The directory catalogues web applications by their manifest URL. These
//! types are what the collaborator boundaries exchange: the catalog store
//! produces [`EntryPage`] windows of [`AppEntry`] records, the audit
//! collaborator attaches an [`AuditResult`] to a single entry, and the
//! identity collaborator resolves a token into a [`User`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single catalogued web application.
///
/// Owned by the catalog collaborator; the core consumes these read-only when
/// composing display models and creates fresh ones during submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEntry {
    /// Stable identifier assigned by the catalog store.
    pub id: String,

    /// Display name, usually taken from the application manifest.
    pub name: String,

    /// Short description shown on list cards and the detail page.
    pub description: String,

    /// Canonical manifest URL the entry was submitted under.
    ///
    /// Submission normalizes `http://` prefixes to `https://` before this
    /// value is stored.
    pub manifest_url: String,

    /// When the entry was first submitted. Drives the "newest" sort order.
    pub created_at: DateTime<Utc>,

    /// Latest audit score, if the entry has been audited.
    ///
    /// Drives the "score" sort order; unaudited entries sort last.
    pub score: Option<u32>,

    /// Identifier of the user that submitted the entry.
    pub submitted_by: Option<String>,
}

/// One window of catalog entries, as returned by the catalog or search
/// collaborator.
///
/// Request-scoped: fetched once per request and consumed by the view
/// composer, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPage {
    /// Entries in the window, already ordered by the collaborator.
    pub entries: Vec<AppEntry>,

    /// Whether more entries exist past this window.
    pub has_more: bool,
}

/// Result of an automated audit run against a submitted entry.
///
/// The report arrives as a raw JSON string from the audit collaborator; the
/// view-entry route parses it before handing it to rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Id of the audited entry.
    pub entry_id: String,

    /// Aggregate score assigned by the audit.
    pub score: u32,

    /// Full audit report, serialized as JSON.
    pub raw_report: String,
}

/// A verified user identity, as resolved from an id token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable subject identifier from the identity provider.
    pub id: String,

    /// Verified email address.
    pub email: String,
}
