//! Tab-wide signal state.
//!
//! The browser half of the site tracks two independently-changing boolean
//! conditions: network connectivity and sign-in status. [`SignalBus`] is the
//! single holder of both, created once at page start and living for the tab's
//! lifetime as an owned object passed by reference, not ambient module state.
//!
//! # Single Writer
//!
//! Each signal has exactly one authoritative writer: the network status
//! listener calls [`SignalBus::set_online`], the auth-provider callback calls
//! [`SignalBus::set_signed_in`]. No other component mutates the bus; readers
//! observe values through the accessors or through broadcast
//! [`SignalChange`]s.
//!
//! # Duplicate Suppression
//!
//! Writing a value equal to the current one produces no broadcast, so
//! downstream projections only run on real transitions.

/// Identity of a broadcast signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Network connectivity (`online`).
    Connectivity,

    /// Sign-in status (`signedIn`).
    Auth,
}

/// A change notification carrying the signal's identity and new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalChange {
    /// Which signal changed.
    pub signal: Signal,

    /// The value after the write.
    pub value: bool,
}

/// Process-wide (browser-tab-wide) holder of the two signals.
///
/// Last-write-wins; no queued backlog, no coalescing beyond what event
/// delivery naturally provides. Both signals may change back-to-back but are
/// always processed one at a time on the single-threaded event loop.
#[derive(Debug, Clone)]
pub struct SignalBus {
    online: bool,
    signed_in: bool,
}

impl SignalBus {
    /// Creates the bus at page start.
    ///
    /// `initially_online` is taken synchronously from the browser's network
    /// status primitive. Sign-in status is unknown (`false`) until the auth
    /// collaborator's first callback fires, which happens exactly once
    /// automatically at startup.
    #[must_use]
    pub fn new(initially_online: bool) -> Self {
        Self {
            online: initially_online,
            signed_in: false,
        }
    }

    /// Current connectivity value.
    #[must_use]
    pub fn online(&self) -> bool {
        self.online
    }

    /// Current sign-in value.
    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.signed_in
    }

    /// Writes the connectivity signal. Only the network status listener calls
    /// this.
    ///
    /// Returns the broadcast to deliver, or `None` for a duplicate write.
    pub fn set_online(&mut self, value: bool) -> Option<SignalChange> {
        if self.online == value {
            return None;
        }
        self.online = value;
        tracing::debug!(online = value, "connectivity changed");
        Some(SignalChange {
            signal: Signal::Connectivity,
            value,
        })
    }

    /// Writes the sign-in signal. Only the auth-provider callback calls this.
    ///
    /// Returns the broadcast to deliver, or `None` for a duplicate write.
    pub fn set_signed_in(&mut self, value: bool) -> Option<SignalChange> {
        if self.signed_in == value {
            return None;
        }
        self.signed_in = value;
        tracing::debug!(signed_in = value, "sign-in state changed");
        Some(SignalChange {
            signal: Signal::Auth,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_reflects_network_probe_and_unknown_auth() {
        let bus = SignalBus::new(true);
        assert!(bus.online());
        assert!(!bus.signed_in());

        let bus = SignalBus::new(false);
        assert!(!bus.online());
    }

    #[test]
    fn changes_broadcast_with_signal_identity() {
        let mut bus = SignalBus::new(true);

        let change = bus.set_online(false).unwrap();
        assert_eq!(change.signal, Signal::Connectivity);
        assert!(!change.value);

        let change = bus.set_signed_in(true).unwrap();
        assert_eq!(change.signal, Signal::Auth);
        assert!(change.value);
    }

    #[test]
    fn duplicate_writes_are_suppressed() {
        let mut bus = SignalBus::new(true);
        assert!(bus.set_online(true).is_none());
        assert!(bus.set_signed_in(false).is_none());

        assert!(bus.set_online(false).is_some());
        assert!(bus.set_online(false).is_none());
    }

    #[test]
    fn signals_change_independently() {
        let mut bus = SignalBus::new(false);
        bus.set_signed_in(true);
        assert!(!bus.online());
        assert!(bus.signed_in());

        bus.set_online(true);
        assert!(bus.online());
        assert!(bus.signed_in());
    }
}
