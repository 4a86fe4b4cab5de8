//! View-state resolution from raw request parameters.
//!
//! This module implements the deterministic resolver that turns the raw
//! list/pagination/sort/search parameters of an incoming request into a
//! self-consistent [`ViewState`]. Resolution is purely synchronous and always
//! completes before any collaborator fetch is issued.
//!
//! # Permissive Defaulting
//!
//! Every malformed numeric or enum parameter degrades to its documented
//! default rather than failing the request. Pagination must never produce a
//! server error on a malformed query string, so this module has no error
//! path at all. Window arithmetic saturates at the numeric bounds, so even
//! extreme well-formed values cannot overflow.

use serde::{Deserialize, Serialize};

/// Raw, unvalidated list-request parameters.
///
/// All fields arrive as optional strings exactly as the query string carried
/// them. The resolver owns every parsing decision; callers never pre-validate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListParams {
    /// Requested page number, one-based.
    pub page: Option<String>,

    /// Requested sort order (`"newest"` or `"score"`).
    pub sort: Option<String>,

    /// Explicit window start offset, overriding the page-derived one.
    pub start: Option<String>,

    /// Explicit window size, overriding the configured page size.
    pub limit: Option<String>,

    /// Full-text search query. Presence alone switches the request into
    /// search mode.
    pub query: Option<String>,

    /// Whether to render content without surrounding chrome (used by
    /// client-side partial navigation).
    pub content_only: Option<String>,
}

/// Sort order for catalog listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently submitted entries first. The default.
    #[default]
    Newest,

    /// Highest audit score first.
    Score,
}

impl SortOrder {
    /// Query-string value for this sort order.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Score => "score",
        }
    }
}

/// Normalized, request-scoped view state.
///
/// Immutable once resolved. Invariant: `window_start` equals
/// `(page_number - 1) * page_size` unless the request supplied an explicit
/// `start` parameter, in which case the explicit value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Whether this request is a search rather than a catalog browse.
    pub is_search_mode: bool,

    /// Whether the rendered page carries a backlink to the main listing.
    ///
    /// Always true in search mode, false on the main listing.
    pub has_backlink: bool,

    /// One-based page number, `>= 1`.
    pub page_number: u32,

    /// Resolved sort order.
    pub sort_order: SortOrder,

    /// Zero-based offset of the first entry to fetch.
    pub window_start: usize,

    /// Number of entries to fetch, `> 0`.
    pub window_limit: usize,

    /// Exclusive end of the display range, `page_number * page_size`.
    ///
    /// Informational only; never used for fetching.
    pub window_end: usize,

    /// The search query, present exactly when `is_search_mode`.
    pub search_query: Option<String>,

    /// Whether to render content without surrounding chrome.
    pub content_only: bool,
}

/// Resolves raw request parameters into a normalized [`ViewState`].
///
/// Resolution rules, each overridable by an explicit parameter:
///
/// - search mode iff a `query` parameter is present (backlink follows it)
/// - `page_number`: parsed positive integer, else 1
/// - `sort_order`: `"score"` maps to [`SortOrder::Score`], anything else to
///   the default [`SortOrder::Newest`]
/// - `window_start`: explicit parse wins over `(page_number - 1) * page_size`
/// - `window_limit`: parsed positive integer, else `page_size`
///
/// Never fails; malformed input degrades to defaults.
#[must_use]
pub fn resolve(params: &RawListParams, page_size: usize) -> ViewState {
    let _span = tracing::debug_span!("resolve_view_state", search = params.query.is_some())
        .entered();

    let is_search_mode = params.query.is_some();

    let page_number = params
        .page
        .as_deref()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1);

    let sort_order = match params.sort.as_deref() {
        Some("score") => SortOrder::Score,
        _ => SortOrder::Newest,
    };

    let window_start = params
        .start
        .as_deref()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or_else(|| (page_number as usize - 1).saturating_mul(page_size));

    let window_limit = params
        .limit
        .as_deref()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&l| l > 0)
        .unwrap_or(page_size);

    ViewState {
        is_search_mode,
        has_backlink: is_search_mode,
        page_number,
        sort_order,
        window_start,
        window_limit,
        window_end: (page_number as usize).saturating_mul(page_size),
        search_query: params.query.clone(),
        content_only: matches!(params.content_only.as_deref(), Some("true") | Some("1")),
    }
}
