//! Request handlers for the directory site.
//!
//! Each handler composes the synchronous view-state pipeline with exactly one
//! asynchronous collaborator fetch, then hands a fully built model to the
//! rendering boundary. The ordering guarantee holds per request: resolution
//! completes before the fetch is issued, and the display model is only
//! constructed after the fetch resolves, so no partial views reach rendering.
//!
//! # Handlers
//!
//! - [`list`]: catalog browse and search results (one unified handler; search
//!   mode bypasses the catalog in favor of the search index)
//! - [`view_entry`]: a single entry with its audit report attached
//! - [`submission_form`]: the static entry-submission form model
//! - [`submit`]: entry creation with identity verification
//!
//! # Failure Mapping
//!
//! Collaborator fetch failures are propagated uncaught and become a generic
//! server error upstream. A missing entry is the distinct
//! [`DirectoryError::NotFound`]. A rejected identity token is *recovered*
//! into [`SubmissionOutcome::Rejected`] so the form can redisplay with a
//! validation message.

use serde_json::Value;

use crate::collaborators::{AuditLog, CatalogStore, IdentityVerifier, SearchIndex};
use crate::domain::entry::AppEntry;
use crate::domain::error::{DirectoryError, Result};
use crate::view::composer::{compose, DisplayModel, RenderTarget};
use crate::view::resolver::{resolve, RawListParams};
use crate::Config;

/// A single entry plus its audit data, ready for the detail template.
#[derive(Debug, Clone)]
pub struct EntryView {
    /// Page title.
    pub title: String,

    /// Meta description.
    pub description: String,

    /// The entry being displayed.
    pub entry: AppEntry,

    /// Aggregate audit score, when the entry has been audited.
    pub audit_score: Option<u32>,

    /// Parsed audit report. `None` when no audit exists or the stored report
    /// is not valid JSON.
    pub audit_report: Option<Value>,

    /// Detail pages always link back to the listing.
    pub backlink: bool,

    /// Whether to render without surrounding chrome.
    pub content_only: bool,
}

/// Model for the entry-submission form page.
#[derive(Debug, Clone)]
pub struct FormModel {
    /// Page title.
    pub title: String,

    /// Meta description.
    pub description: String,

    /// Form pages always link back to the listing.
    pub backlink: bool,

    /// Validation message from a rejected submission, if redisplaying.
    pub error: Option<String>,

    /// Whether to render without surrounding chrome.
    pub content_only: bool,
}

/// Raw fields posted by the submission form.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    /// Manifest URL of the application being submitted.
    pub manifest_url: String,

    /// Identity token of the submitting user.
    pub id_token: Option<String>,
}

/// Outcome of a submission attempt.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// Entry stored; redirect to its detail page.
    Saved(AppEntry),

    /// Submission rejected; redisplay the form with a validation message.
    Rejected {
        /// User-visible validation message.
        message: String,
    },
}

fn render_target(content_only: bool) -> RenderTarget {
    if content_only {
        RenderTarget::ContentOnly
    } else {
        RenderTarget::Full
    }
}

/// Handles the listing routes: catalog browse and search.
///
/// Resolves the raw parameters first (synchronously, never failing), then
/// issues exactly one fetch: the search index when a query is present, the
/// catalog otherwise.
///
/// # Errors
///
/// Propagates catalog or search collaborator failures unchanged; the request
/// boundary surfaces them as a generic server error.
pub async fn list(
    params: &RawListParams,
    catalog: &dyn CatalogStore,
    search: &dyn SearchIndex,
    config: &Config,
) -> Result<DisplayModel> {
    tracing::debug!(search = params.query.is_some(), "handling list request");

    let state = resolve(params, config.page_size);

    let page = match state.search_query.as_deref() {
        Some(query) => search.search(query).await?,
        None => {
            catalog
                .list(state.window_start, state.window_limit, state.sort_order)
                .await?
        }
    };

    Ok(compose(
        &state,
        page,
        render_target(state.content_only),
        &config.site_title,
        &config.site_description,
    ))
}

/// Handles the entry detail route.
///
/// Fetches the entry, then attaches its audit result. Audit reports are
/// stored as raw JSON strings; an unparseable report is dropped with a
/// warning rather than failing the page.
///
/// # Errors
///
/// Returns [`DirectoryError::NotFound`] when the entry does not exist, and
/// propagates other collaborator failures unchanged.
pub async fn view_entry(
    id: &str,
    content_only: bool,
    catalog: &dyn CatalogStore,
    audit: &dyn AuditLog,
    config: &Config,
) -> Result<EntryView> {
    tracing::debug!(id, "handling entry view request");

    let entry = catalog.find(id).await?;
    let audit_result = audit.find_by_entry_id(id).await?;

    let (audit_score, audit_report) = match audit_result {
        Some(result) => {
            let report = match serde_json::from_str::<Value>(&result.raw_report) {
                Ok(value) => Some(value),
                Err(error) => {
                    tracing::warn!(id, %error, "dropping unparseable audit report");
                    None
                }
            };
            (Some(result.score), report)
        }
        None => (None, None),
    };

    Ok(EntryView {
        title: format!("{}: {}", config.site_title, entry.name),
        description: format!("{}: {} - {}", config.site_title, entry.name, entry.description),
        entry,
        audit_score,
        audit_report,
        backlink: true,
        content_only,
    })
}

/// Builds the model for the submission form page.
#[must_use]
pub fn submission_form(content_only: bool, config: &Config) -> FormModel {
    FormModel {
        title: format!("{} - Submit an app", config.site_title),
        description: format!("{}: Submit a web application", config.site_title),
        backlink: true,
        error: None,
        content_only,
    }
}

/// Handles a submission POST.
///
/// The manifest URL is trimmed and `http://` prefixes are upgraded to
/// `https://` before anything else. Missing fields and rejected tokens are
/// recovered into [`SubmissionOutcome::Rejected`]; only collaborator
/// failures terminate the request.
///
/// # Errors
///
/// Propagates catalog write failures. Identity verification failures do NOT
/// error; they become a `Rejected` outcome.
pub async fn submit(
    form: &SubmissionForm,
    identity: &dyn IdentityVerifier,
    catalog: &dyn CatalogStore,
) -> Result<SubmissionOutcome> {
    tracing::debug!("handling submission");

    let mut manifest_url = form.manifest_url.trim().to_string();
    if let Some(rest) = manifest_url.strip_prefix("http://") {
        manifest_url = format!("https://{rest}");
    }

    if manifest_url.is_empty() {
        return Ok(SubmissionOutcome::Rejected {
            message: "no manifest provided".to_string(),
        });
    }
    let Some(token) = form.id_token.as_deref().filter(|t| !t.is_empty()) else {
        return Ok(SubmissionOutcome::Rejected {
            message: "user not logged in".to_string(),
        });
    };

    let user = match identity.verify(token).await {
        Ok(user) => user,
        Err(DirectoryError::InvalidToken(message)) => {
            tracing::debug!(%message, "submission token rejected");
            return Ok(SubmissionOutcome::Rejected { message });
        }
        Err(other) => return Err(other),
    };

    let name = display_name_from_manifest(&manifest_url);
    let entry = AppEntry {
        id: String::new(),
        name,
        description: String::new(),
        manifest_url,
        created_at: chrono::Utc::now(),
        score: None,
        submitted_by: Some(user.id),
    };

    let saved = catalog.create_or_update(entry).await?;
    Ok(SubmissionOutcome::Saved(saved))
}

/// Derives a provisional display name from a manifest URL, used until the
/// manifest itself has been fetched and audited.
fn display_name_from_manifest(manifest_url: &str) -> String {
    manifest_url
        .trim_start_matches("https://")
        .split('/')
        .next()
        .unwrap_or(manifest_url)
        .to_string()
}
