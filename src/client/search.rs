//! Search form toggle.
//!
//! A two-state control bound to the search button and its text input. Opening
//! the form focuses the input and hides the shell's tabs; closing it restores
//! tab visibility to whatever the shell's *current* route dictates. The
//! restore is re-derived rather than cached, so closing after a navigation
//! is always consistent with the new route.
//!
//! At most one visual transition is active at a time: a toggle while the
//! previous transition is still running is a no-op until
//! [`SearchToggle::transition_complete`] is called.

use super::shell::Shell;

/// Visibility state of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFormState {
    /// Form is hidden.
    Hidden,

    /// Form is shown and the input has been focused.
    Shown,
}

/// The search form toggle control.
#[derive(Debug)]
pub struct SearchToggle {
    state: SearchFormState,
    transitioning: bool,
    input_focused: bool,
}

impl Default for SearchToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchToggle {
    /// Creates the toggle with the form hidden.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SearchFormState::Hidden,
            transitioning: false,
            input_focused: false,
        }
    }

    /// Current form state.
    #[must_use]
    pub fn state(&self) -> SearchFormState {
        self.state
    }

    /// Whether the text input currently holds focus.
    #[must_use]
    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    /// Whether a visual transition is still in flight.
    #[must_use]
    pub fn transitioning(&self) -> bool {
        self.transitioning
    }

    /// Handles a click on the toggle control.
    ///
    /// Hidden → shown: shows the form, focuses the input, hides the shell's
    /// tabs. Shown → hidden: hides the form and restores tab visibility from
    /// the shell's current route. Ignored while a transition is in flight.
    pub fn toggle(&mut self, shell: &mut Shell) {
        if self.transitioning {
            tracing::debug!("search toggle ignored, transition in flight");
            return;
        }
        self.transitioning = true;

        match self.state {
            SearchFormState::Hidden => {
                self.state = SearchFormState::Shown;
                self.input_focused = true;
                shell.set_search_form_visible(true);
                shell.set_tabs_visible(false);
            }
            SearchFormState::Shown => {
                self.state = SearchFormState::Hidden;
                self.input_focused = false;
                shell.set_search_form_visible(false);
                shell.set_tabs_visible(shell.tabs_wanted());
            }
        }
    }

    /// Marks the current visual transition as finished.
    pub fn transition_complete(&mut self) {
        self.transitioning = false;
    }

    /// Re-syncs the toggle after a navigation.
    ///
    /// The new route's descriptor decides whether the form is shown; any
    /// in-flight transition is abandoned since the shell has already applied
    /// the new chrome state.
    pub fn sync_with_route(&mut self, shell: &Shell) {
        self.transitioning = false;
        self.input_focused = false;
        self.state = if shell.search_form_visible() {
            SearchFormState::Shown
        } else {
            SearchFormState::Hidden
        };
    }
}
