//! Tracing initialization for binaries and test harnesses.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber: env-filtered, formatted to stderr.
/// Falls back to `info` (with `activity_core` at `debug`) when `RUST_LOG`
/// is unset. Calling this twice panics, same as any double `init`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,activity_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
