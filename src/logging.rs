//! Process-wide diagnostic output.
//!
//! The library only emits `tracing` events. Binaries call [`init`] once at
//! start-up to print them: a single colourised stderr sink at DEBUG, which
//! `RUST_LOG` can override.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

const DEFAULT_FILTER: &str = "debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// # Panics
/// If a global subscriber has already been set.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .init();
}

/// Install the global subscriber, failing if one is already set.
pub fn try_init() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .try_init()
}
