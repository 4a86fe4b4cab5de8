//! Display model composition.
//!
//! This module combines a resolved [`ViewState`] with an [`EntryPage`]
//! fetched from the catalog (or search) collaborator into the final
//! [`DisplayModel`] handed to the rendering boundary. The composer never
//! performs I/O and never catches collaborator failures; the route handler
//! issues the fetch and propagates its errors.
//!
//! # Link Conventions
//!
//! Two conventions from the site's URL scheme are enforced here:
//!
//! - **Omit-if-default**: a sort order equal to the default (`newest`) is
//!   carried as `None` so templates and [`DisplayModel::page_query`] drop the
//!   redundant query parameter.
//! - **Bare page-one link**: the previous-page link omits its explicit page
//!   number when it would land on page 1, so `previous_page_number` is `None`
//!   for pages 1 and 2.

use super::resolver::{SortOrder, ViewState};
use crate::domain::entry::{AppEntry, EntryPage};

/// Which rendering surface a display model targets.
///
/// The site historically ran two parallel route controllers for its two
/// template engines; they are unified into one composer that carries the
/// target as data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderTarget {
    /// Full page with surrounding chrome.
    #[default]
    Full,

    /// Content fragment only, for client-side partial navigation.
    ContentOnly,
}

/// Final display model for a catalog listing page.
///
/// Built fresh per request from view state plus fetched entries, never
/// mutated after construction, and handed once to the rendering boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    /// Page title for the rendered document.
    pub title: String,

    /// Meta description for the rendered document.
    pub description: String,

    /// Entries in display order.
    pub entries: Vec<AppEntry>,

    /// Whether a next-page link should be rendered.
    pub has_next_page: bool,

    /// Whether a previous-page link should be rendered.
    pub has_previous_page: bool,

    /// Page number the next-page link targets.
    pub next_page_number: u32,

    /// Page number the previous-page link carries explicitly.
    ///
    /// `None` for pages 1 and 2: page 1 has no previous page, and page 2
    /// links back to page 1 without an explicit number.
    pub previous_page_number: Option<u32>,

    /// The page being displayed.
    pub current_page_number: u32,

    /// Sort order for link generation; `None` when it equals the default.
    pub sort_order: Option<SortOrder>,

    /// Whether the "newest" tab is the active one.
    pub show_newest: bool,

    /// Whether the "score" tab is the active one.
    pub show_score: bool,

    /// One-based display index of the first entry in the window.
    pub start_display: usize,

    /// Whether this is the main listing page (not a search result page).
    pub main_page: bool,

    /// Whether the search form chrome should be shown.
    pub search: bool,

    /// Whether a backlink to the main listing should be shown.
    pub backlink: bool,

    /// The query that produced this page, in search mode.
    pub search_query: Option<String>,

    /// Whether to render without surrounding chrome.
    pub content_only: bool,

    /// Rendering surface this model targets.
    pub target: RenderTarget,
}

impl DisplayModel {
    /// Builds the query string for a link to `page`, omitting defaulted
    /// parameters.
    ///
    /// Page 1 and the default sort order are both dropped, so the main
    /// listing link stays bare. Returns an empty string when nothing needs
    /// to be carried.
    #[must_use]
    pub fn page_query(&self, page: u32) -> String {
        let mut parts = Vec::new();
        if page > 1 {
            parts.push(format!("page={page}"));
        }
        if let Some(sort) = self.sort_order {
            parts.push(format!("sort={}", sort.as_str()));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

/// Composes the final display model from resolved view state and a fetched
/// entry page.
///
/// Purely synchronous; the caller has already awaited the collaborator fetch.
#[must_use]
pub fn compose(
    state: &ViewState,
    page: EntryPage,
    target: RenderTarget,
    title: &str,
    description: &str,
) -> DisplayModel {
    let _span = tracing::debug_span!(
        "compose_display_model",
        page_number = state.page_number,
        entries = page.entries.len(),
        has_more = page.has_more,
    )
    .entered();

    DisplayModel {
        title: title.to_string(),
        description: description.to_string(),
        entries: page.entries,
        has_next_page: page.has_more,
        has_previous_page: state.page_number > 1,
        next_page_number: state.page_number.saturating_add(1),
        previous_page_number: if state.page_number <= 2 {
            None
        } else {
            Some(state.page_number - 1)
        },
        current_page_number: state.page_number,
        sort_order: match state.sort_order {
            SortOrder::Newest => None,
            other => Some(other),
        },
        show_newest: state.sort_order == SortOrder::Newest,
        show_score: state.sort_order == SortOrder::Score,
        start_display: state.window_start.saturating_add(1),
        main_page: !state.is_search_mode,
        search: state.is_search_mode,
        backlink: state.has_backlink,
        search_query: state.search_query.clone(),
        content_only: state.content_only,
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::resolver::{resolve, RawListParams};

    const PAGE_SIZE: usize = 32;

    fn state_for_page(page: u32) -> ViewState {
        resolve(
            &RawListParams {
                page: Some(page.to_string()),
                ..RawListParams::default()
            },
            PAGE_SIZE,
        )
    }

    fn compose_page(page: u32, has_more: bool) -> DisplayModel {
        compose(
            &state_for_page(page),
            EntryPage {
                entries: vec![],
                has_more,
            },
            RenderTarget::Full,
            "Appdex",
            "A directory of web applications",
        )
    }

    #[test]
    fn page_one_has_no_previous_link() {
        let model = compose_page(1, true);
        assert!(!model.has_previous_page);
        assert_eq!(model.previous_page_number, None);
        assert_eq!(model.next_page_number, 2);
    }

    #[test]
    fn page_two_links_back_without_explicit_number() {
        let model = compose_page(2, true);
        assert!(model.has_previous_page);
        assert_eq!(model.previous_page_number, None);
    }

    #[test]
    fn deeper_pages_carry_explicit_previous_number() {
        for page in [3, 4, 17] {
            let model = compose_page(page, false);
            assert!(model.has_previous_page);
            assert_eq!(model.previous_page_number, Some(page - 1), "page={page}");
        }
    }

    #[test]
    fn extreme_page_numbers_saturate_link_arithmetic() {
        let model = compose_page(u32::MAX, true);
        assert_eq!(model.next_page_number, u32::MAX);
        assert_eq!(model.previous_page_number, Some(u32::MAX - 1));

        let state = resolve(
            &RawListParams {
                start: Some(usize::MAX.to_string()),
                ..RawListParams::default()
            },
            PAGE_SIZE,
        );
        let model = compose(&state, EntryPage::default(), RenderTarget::Full, "", "");
        assert_eq!(model.start_display, usize::MAX);
    }

    #[test]
    fn default_sort_order_is_omitted() {
        let model = compose_page(1, false);
        assert_eq!(model.sort_order, None);
        assert!(model.show_newest);
        assert!(!model.show_score);
    }

    #[test]
    fn score_sort_order_is_carried_through() {
        let state = resolve(
            &RawListParams {
                sort: Some("score".to_string()),
                ..RawListParams::default()
            },
            PAGE_SIZE,
        );
        let model = compose(
            &state,
            EntryPage::default(),
            RenderTarget::Full,
            "Appdex",
            "",
        );

        assert_eq!(model.sort_order, Some(SortOrder::Score));
        assert!(model.show_score);
        assert!(!model.show_newest);
    }

    #[test]
    fn has_next_page_follows_has_more() {
        assert!(compose_page(1, true).has_next_page);
        assert!(!compose_page(1, false).has_next_page);
    }

    #[test]
    fn start_display_is_one_based() {
        assert_eq!(compose_page(1, false).start_display, 1);
        assert_eq!(compose_page(3, false).start_display, 65);
    }

    #[test]
    fn page_query_omits_defaults() {
        let model = compose_page(3, true);
        assert_eq!(model.page_query(1), "");
        assert_eq!(model.page_query(4), "?page=4");

        let state = resolve(
            &RawListParams {
                sort: Some("score".to_string()),
                ..RawListParams::default()
            },
            PAGE_SIZE,
        );
        let scored = compose(&state, EntryPage::default(), RenderTarget::Full, "", "");
        assert_eq!(scored.page_query(1), "?sort=score");
        assert_eq!(scored.page_query(2), "?page=2&sort=score");
    }

    #[test]
    fn search_state_flows_into_model() {
        let state = resolve(
            &RawListParams {
                query: Some("todo".to_string()),
                ..RawListParams::default()
            },
            PAGE_SIZE,
        );
        let model = compose(&state, EntryPage::default(), RenderTarget::Full, "", "");

        assert!(!model.main_page);
        assert!(model.search);
        assert!(model.backlink);
        assert_eq!(model.search_query.as_deref(), Some("todo"));
    }
}
