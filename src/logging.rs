//! Logging init: stderr, filtered by `RUST_LOG` or the configured filter.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging. `RUST_LOG` takes precedence over `filter`;
/// an unparsable filter falls back to `info`.
pub fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
