//! Tracing initialization.
//!
//! Sets up the `tracing` subscriber used by both halves of the crate. Spans
//! are emitted around view-state resolution, display-model composition,
//! route handling and browser-event dispatch; the subscriber filters them by
//! the configured level.

use tracing_subscriber::EnvFilter;

use crate::Config;

/// Initializes the tracing subscriber.
///
/// The filter directive comes from `config.trace_level`, falling back to
/// `"info"`. Idempotent: only the first call installs a subscriber, later
/// calls are silently ignored.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
