//! Route-driven chrome state.
//!
//! The shell maps each navigable route to a declarative [`RouteState`]
//! descriptor and applies it to a fixed set of chrome elements (backlink,
//! subtitle, search form and the sort tabs) whenever the active route
//! changes. No history or back-stack is modeled: each transition is
//! idempotent and fully determined by the target route's descriptor.
//!
//! Route registration happens once during page setup. Navigating to an
//! unregistered route is a programming-contract violation and panics; it is
//! not a recoverable runtime condition.

use std::collections::HashMap;

/// Declarative visibility/active-tab descriptor for one route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteState {
    /// Show the backlink chrome element.
    pub backlink: bool,

    /// Show the subtitle chrome element.
    pub subtitle: bool,

    /// Show the search form.
    pub search: bool,

    /// Show the sort tabs.
    pub show_tabs: bool,

    /// Id of the tab to mark active, when tabs are shown.
    pub current_tab: Option<String>,
}

/// One tab in the fixed tab set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Tab element id (`"newest"` or `"score"`).
    pub id: String,

    /// Whether the tab is currently shown.
    pub visible: bool,

    /// Whether the tab is marked as the active one.
    pub active: bool,
}

/// Applies registered route descriptors to the chrome elements.
#[derive(Debug)]
pub struct Shell {
    states: HashMap<String, RouteState>,
    current_route: Option<String>,
    backlink_visible: bool,
    subtitle_visible: bool,
    search_form_visible: bool,
    tabs: Vec<Tab>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Creates the shell with its fixed tab set and everything hidden.
    #[must_use]
    pub fn new() -> Self {
        let tabs = ["newest", "score"]
            .into_iter()
            .map(|id| Tab {
                id: id.to_string(),
                visible: false,
                active: false,
            })
            .collect();

        Self {
            states: HashMap::new(),
            current_route: None,
            backlink_visible: false,
            subtitle_visible: false,
            search_form_visible: false,
            tabs,
        }
    }

    /// Registers the descriptor for a route during setup.
    ///
    /// Registration must be complete before any navigation occurs.
    pub fn register_route(&mut self, route: impl Into<String>, state: RouteState) {
        self.states.insert(route.into(), state);
    }

    /// Applies the registered descriptor for `route` to the chrome elements.
    ///
    /// Idempotent: applying the same route twice produces the same chrome
    /// state as applying it once.
    ///
    /// # Panics
    ///
    /// Panics if `route` was never registered. This is a contract violation
    /// in page setup, not a runtime condition.
    pub fn on_route_change(&mut self, route: &str) {
        let state = self
            .states
            .get(route)
            .unwrap_or_else(|| panic!("route '{route}' was never registered"))
            .clone();

        tracing::debug!(route, ?state, "applying route state");

        self.backlink_visible = state.backlink;
        self.subtitle_visible = state.subtitle;
        self.search_form_visible = state.search;
        for tab in &mut self.tabs {
            tab.visible = state.show_tabs;
            tab.active = state
                .current_tab
                .as_deref()
                .is_some_and(|current| current == tab.id);
        }

        self.current_route = Some(route.to_string());
    }

    /// Descriptor of the currently applied route, if any navigation happened.
    #[must_use]
    pub fn current_state(&self) -> Option<&RouteState> {
        self.current_route
            .as_deref()
            .and_then(|route| self.states.get(route))
    }

    /// Whether the current route wants its tabs shown.
    ///
    /// Re-derived from the registered descriptor, never cached, so callers
    /// restoring tab visibility are always consistent with the active route.
    #[must_use]
    pub fn tabs_wanted(&self) -> bool {
        self.current_state().is_some_and(|state| state.show_tabs)
    }

    /// Shows or hides all tabs, leaving active markers alone.
    ///
    /// Used by the search toggle to hide tabs while the search form is open.
    pub fn set_tabs_visible(&mut self, visible: bool) {
        for tab in &mut self.tabs {
            tab.visible = visible;
        }
    }

    /// Shows or hides the search form chrome element.
    pub fn set_search_form_visible(&mut self, visible: bool) {
        self.search_form_visible = visible;
    }

    /// The fixed tab set, in display order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Whether the backlink chrome element is shown.
    #[must_use]
    pub fn backlink_visible(&self) -> bool {
        self.backlink_visible
    }

    /// Whether the subtitle chrome element is shown.
    #[must_use]
    pub fn subtitle_visible(&self) -> bool {
        self.subtitle_visible
    }

    /// Whether the search form is shown.
    #[must_use]
    pub fn search_form_visible(&self) -> bool {
        self.search_form_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_state() -> RouteState {
        RouteState {
            backlink: false,
            subtitle: true,
            search: false,
            show_tabs: true,
            current_tab: Some("newest".to_string()),
        }
    }

    fn detail_state() -> RouteState {
        RouteState {
            backlink: true,
            subtitle: false,
            search: false,
            show_tabs: false,
            current_tab: None,
        }
    }

    fn shell() -> Shell {
        let mut shell = Shell::new();
        shell.register_route("list", listing_state());
        shell.register_route("entry", detail_state());
        shell
    }

    #[test]
    fn route_change_applies_every_descriptor_field() {
        let mut shell = shell();
        shell.on_route_change("list");

        assert!(!shell.backlink_visible());
        assert!(shell.subtitle_visible());
        assert!(!shell.search_form_visible());
        let newest = &shell.tabs()[0];
        assert!(newest.visible && newest.active);
        let score = &shell.tabs()[1];
        assert!(score.visible && !score.active);
    }

    #[test]
    fn route_change_is_idempotent() {
        let mut shell = shell();
        shell.on_route_change("list");
        let once: Vec<Tab> = shell.tabs().to_vec();
        let chrome_once = (
            shell.backlink_visible(),
            shell.subtitle_visible(),
            shell.search_form_visible(),
        );

        shell.on_route_change("list");
        assert_eq!(shell.tabs(), once.as_slice());
        assert_eq!(
            (
                shell.backlink_visible(),
                shell.subtitle_visible(),
                shell.search_form_visible()
            ),
            chrome_once
        );
    }

    #[test]
    fn navigating_between_routes_reapplies_chrome() {
        let mut shell = shell();
        shell.on_route_change("list");
        shell.on_route_change("entry");

        assert!(shell.backlink_visible());
        assert!(!shell.subtitle_visible());
        assert!(shell.tabs().iter().all(|tab| !tab.visible && !tab.active));

        shell.on_route_change("list");
        assert!(shell.tabs().iter().all(|tab| tab.visible));
    }

    #[test]
    #[should_panic(expected = "never registered")]
    fn unregistered_route_is_a_contract_violation() {
        let mut shell = shell();
        shell.on_route_change("surprise");
    }

    #[test]
    fn tabs_wanted_rederives_from_current_route() {
        let mut shell = shell();
        assert!(!shell.tabs_wanted());

        shell.on_route_change("list");
        assert!(shell.tabs_wanted());

        shell.on_route_change("entry");
        assert!(!shell.tabs_wanted());
    }
}
