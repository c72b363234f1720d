use tracing_subscriber::EnvFilter;

/// Initialize tracing for the application.
///
/// The filter is taken from `RUST_LOG` when set, so individual targets can
/// be tuned at runtime; otherwise `default_level` applies globally.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init so tests and libraries can call this repeatedly without panicking
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
