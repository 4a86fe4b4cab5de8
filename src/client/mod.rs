//! Browser-side state-propagation engine.
//!
//! This layer keeps visible UI elements consistent with two
//! independently-changing runtime signals (network connectivity and sign-in
//! status) and with the currently active route. It runs entirely on the
//! browser's single-threaded cooperative event loop: discrete events arrive
//! one at a time, mutate the owned state, and end in DOM attribute/style
//! mutation with no further propagation.
//!
//! # Organization
//!
//! - [`bus`]: the two-signal state holder with change broadcasts
//! - [`binder`]: reactive element discovery and per-role projection rules
//! - [`shell`]: route → chrome-state machine
//! - [`search`]: the search form toggle
//! - [`Page`]: owns all of the above and dispatches [`BrowserEvent`]s
//!
//! # Event Flow
//!
//! ```text
//! online/offline ─┐
//! auth callback ──┼→ SignalBus ─(SignalChange)→ ElementBinder → visual state
//! navigation ─────┼→ Shell ──────────────────→ chrome state
//! search click ───┴→ SearchToggle ←──────────→ Shell
//! ```

pub mod binder;
pub mod bus;
pub mod search;
pub mod shell;

pub use binder::{BoundElement, ElementBinder, ElementDecl, ElementRole, ElementTag, VisualState};
pub use bus::{Signal, SignalBus, SignalChange};
pub use search::{SearchFormState, SearchToggle};
pub use shell::{RouteState, Shell, Tab};

use crate::collaborators::AvailabilityProbe;

/// Discrete events consumed from the browser boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// The network came up.
    Online,

    /// The network went away.
    Offline,

    /// The auth provider reported a sign-in state.
    ///
    /// Fires once automatically at startup and again on every subsequent
    /// sign-in/out action.
    UserChanged {
        /// Whether a user is signed in.
        signed_in: bool,
    },

    /// The active route changed.
    Navigate(String),

    /// The search toggle control was clicked.
    SearchToggleClick,

    /// The search form's visual transition finished.
    SearchTransitionEnd,
}

/// Tab-lifetime owner of the client-side state.
///
/// Created once at page start, torn down never. All shared mutable state
/// (the two signals and the chrome state) lives here with exactly one writer
/// path per piece, eliminating write-write races by construction.
#[derive(Debug)]
pub struct Page {
    bus: SignalBus,
    binder: ElementBinder,
    shell: Shell,
    toggle: SearchToggle,
}

impl Page {
    /// Creates the page state.
    ///
    /// `initially_online` is the synchronous network-status snapshot taken at
    /// startup. `decls` are the elements discovered in the document scan;
    /// `shell` arrives with its routes already registered.
    #[must_use]
    pub fn new(initially_online: bool, decls: Vec<ElementDecl>, shell: Shell) -> Self {
        Self {
            bus: SignalBus::new(initially_online),
            binder: ElementBinder::bind(decls),
            shell,
            toggle: SearchToggle::new(),
        }
    }

    /// Replays the initial connectivity state to every bound element.
    ///
    /// Elements are stamped `online = false` at bind time, so the startup
    /// snapshot must be delivered as a synthetic broadcast, the same trick
    /// a browser page plays by firing an online/offline event at load.
    pub async fn bootstrap(&mut self, probe: &dyn AvailabilityProbe) {
        let change = SignalChange {
            signal: Signal::Connectivity,
            value: self.bus.online(),
        };
        self.binder.apply(change, probe).await;
    }

    /// Dispatches one browser event.
    ///
    /// Signal events go through the bus (which suppresses duplicate writes)
    /// and on to the binder; navigation goes to the shell and re-syncs the
    /// search toggle; search events go to the toggle.
    ///
    /// # Panics
    ///
    /// Panics when navigating to a route that was never registered with the
    /// shell, which is a page-setup contract violation.
    pub async fn dispatch(&mut self, event: BrowserEvent, probe: &dyn AvailabilityProbe) {
        tracing::debug!(event = ?event, "dispatching browser event");

        match event {
            BrowserEvent::Online => {
                if let Some(change) = self.bus.set_online(true) {
                    self.binder.apply(change, probe).await;
                }
            }
            BrowserEvent::Offline => {
                if let Some(change) = self.bus.set_online(false) {
                    self.binder.apply(change, probe).await;
                }
            }
            BrowserEvent::UserChanged { signed_in } => {
                if let Some(change) = self.bus.set_signed_in(signed_in) {
                    self.binder.apply(change, probe).await;
                }
            }
            BrowserEvent::Navigate(route) => {
                self.shell.on_route_change(&route);
                self.toggle.sync_with_route(&self.shell);
            }
            BrowserEvent::SearchToggleClick => {
                self.toggle.toggle(&mut self.shell);
            }
            BrowserEvent::SearchTransitionEnd => {
                self.toggle.transition_complete();
            }
        }
    }

    /// The signal bus.
    #[must_use]
    pub fn bus(&self) -> &SignalBus {
        &self.bus
    }

    /// The element binder.
    #[must_use]
    pub fn binder(&self) -> &ElementBinder {
        &self.binder
    }

    /// The shell.
    #[must_use]
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// The search toggle.
    #[must_use]
    pub fn search_toggle(&self) -> &SearchToggle {
        &self.toggle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Result;

    struct NeverCached;

    #[async_trait::async_trait]
    impl AvailabilityProbe for NeverCached {
        async fn is_available(&self, _: &str) -> Result<bool> {
            Ok(false)
        }
    }

    fn page() -> Page {
        let decls = vec![
            ElementDecl {
                id: "auth-button".to_string(),
                tag: ElementTag::Button,
                classes: vec![],
                href: None,
                online_aware: true,
                signedin_aware: true,
            },
            ElementDecl {
                id: "save-button".to_string(),
                tag: ElementTag::Button,
                classes: vec![],
                href: None,
                online_aware: true,
                signedin_aware: true,
            },
        ];

        let mut shell = Shell::new();
        shell.register_route(
            "list",
            RouteState {
                show_tabs: true,
                current_tab: Some("newest".to_string()),
                ..RouteState::default()
            },
        );
        shell.register_route(
            "search",
            RouteState {
                backlink: true,
                search: true,
                ..RouteState::default()
            },
        );

        Page::new(true, decls, shell)
    }

    #[tokio::test]
    async fn bootstrap_delivers_the_startup_connectivity_snapshot() {
        let mut page = page();
        // Before bootstrap the auth button still carries its bind-time state.
        assert!(!page.binder().element("auth-button").unwrap().online);

        page.bootstrap(&NeverCached).await;
        assert!(page.binder().element("auth-button").unwrap().online);
        assert!(page.binder().element("auth-button").unwrap().visual.enabled);
    }

    #[tokio::test]
    async fn offline_event_flows_through_to_elements() {
        let mut page = page();
        page.bootstrap(&NeverCached).await;
        page.dispatch(BrowserEvent::UserChanged { signed_in: true }, &NeverCached)
            .await;
        assert!(page.binder().element("save-button").unwrap().visual.enabled);

        page.dispatch(BrowserEvent::Offline, &NeverCached).await;

        assert!(!page.bus().online());
        assert!(!page.binder().element("save-button").unwrap().visual.enabled);
        assert!(!page.binder().element("auth-button").unwrap().visual.enabled);
    }

    #[tokio::test]
    async fn navigation_resyncs_the_search_toggle() {
        let mut page = page();
        page.dispatch(BrowserEvent::Navigate("list".to_string()), &NeverCached)
            .await;
        assert_eq!(page.search_toggle().state(), SearchFormState::Hidden);

        page.dispatch(BrowserEvent::Navigate("search".to_string()), &NeverCached)
            .await;
        assert_eq!(page.search_toggle().state(), SearchFormState::Shown);
    }

    #[tokio::test]
    async fn search_click_and_transition_end_round_trip() {
        let mut page = page();
        page.dispatch(BrowserEvent::Navigate("list".to_string()), &NeverCached)
            .await;

        page.dispatch(BrowserEvent::SearchToggleClick, &NeverCached).await;
        assert_eq!(page.search_toggle().state(), SearchFormState::Shown);
        assert!(page.shell().tabs().iter().all(|tab| !tab.visible));

        page.dispatch(BrowserEvent::SearchTransitionEnd, &NeverCached).await;
        page.dispatch(BrowserEvent::SearchToggleClick, &NeverCached).await;
        assert!(page.shell().tabs().iter().all(|tab| tab.visible));
    }
}
