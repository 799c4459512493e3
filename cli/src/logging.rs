//! Structured logging initialization via `tracing`.

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` picks debug over info.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(false)
        .init();
}
