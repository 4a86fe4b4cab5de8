//! Appdex: a directory site engine for cataloguing web applications.
//!
//! The crate implements the reactive view-state subsystem of a directory
//! site. Server routes list, search, create and view catalog entries; a
//! browser-side layer keeps visible UI elements consistent with two
//! independently-changing runtime signals (network connectivity and sign-in
//! status) and with the currently active route. Persistence, search
//! indexing, token verification and audit scoring are external collaborators
//! the core only calls through narrow async traits.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Request boundary (routes/)                          │  ← list/search/view/submit
//! └──────────────────────────────────────────────────────┘
//!              │                          │
//! ┌────────────────────────┐  ┌────────────────────────┐
//! │ View pipeline (view/)  │  │ Collaborators          │
//! │ - PaginationResolver   │  │ (collaborators/)       │
//! │ - ListViewComposer     │  │ - catalog, search,     │
//! └────────────────────────┘  │   identity, audit      │
//!                             └────────────────────────┘
//! ┌──────────────────────────────────────────────────────┐
//! │  Browser boundary (client/)                          │  ← event dispatch
//! │  - SignalBus (connectivity, auth)                    │
//! │  - ElementBinder (per-role projections)              │
//! │  - Shell (route → chrome state)                      │
//! │  - SearchToggle                                      │
//! └──────────────────────────────────────────────────────┘
//!              │
//! ┌──────────────────────────────────────────────────────┐
//! │  Domain & Observability (domain/, observability/)    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Entry/user models and error types
//! - [`view`]: Deterministic request-parameter → display-model pipeline
//! - [`collaborators`]: Async collaborator traits plus in-memory
//!   implementations
//! - [`routes`]: Request handlers composing the pipeline with one fetch each
//! - [`client`]: Browser-side signal propagation and route-driven chrome
//! - [`observability`]: Tracing subscriber setup
//!
//! # Concurrency Model
//!
//! Both halves run on a single-threaded cooperative event loop. A request
//! resolves its view state synchronously, suspends exactly once on the
//! collaborator fetch, and only then builds its display model; partial
//! views never reach rendering. Browser events are processed one at a time
//! in delivery order; the signal bus and the shell are plain last-write-wins
//! stores with one writer role each. None of the core operations support
//! cancellation; a slow availability probe simply resolves late.

pub mod client;
pub mod collaborators;
pub mod domain;
pub mod observability;
pub mod routes;
pub mod view;

pub use client::{BrowserEvent, Page};
pub use domain::{AppEntry, DirectoryError, EntryPage, Result};
pub use view::{DisplayModel, RawListParams, SortOrder, ViewState};

use std::collections::BTreeMap;

/// Number of entries shown per listing page.
pub const LIST_PAGE_SIZE: usize = 32;

/// Site configuration.
///
/// Values are provided by the embedding application, typically parsed from
/// its environment or deployment configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entries per listing page. Default: [`LIST_PAGE_SIZE`].
    pub page_size: usize,

    /// Site title used in page titles and branding.
    pub site_title: String,

    /// Site meta description.
    pub site_description: String,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default:
    /// `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: LIST_PAGE_SIZE,
            site_title: "Appdex".to_string(),
            site_description: "Appdex: A Directory of Web Applications".to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map with fallback defaults.
    ///
    /// Parsing is permissive in the same spirit as request-parameter
    /// resolution: a malformed `page_size` falls back to the default instead
    /// of failing startup.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let page_size = map
            .get("page_size")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.page_size);

        Self {
            page_size,
            site_title: map
                .get("site_title")
                .cloned()
                .unwrap_or(defaults.site_title),
            site_description: map
                .get("site_description")
                .cloned()
                .unwrap_or(defaults.site_description),
            trace_level: map.get("trace_level").cloned(),
        }
    }
}
