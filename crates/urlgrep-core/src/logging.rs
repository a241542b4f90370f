//! Logging init: tracing to stderr, filtered via `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr. Per-URL results and the final
/// total are emitted at INFO; `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
