use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `release_hooks=debug`.
pub const LOG_ENV: &str = "RELEASE_HOOKS_LOG";

/// Initialize stderr logging. Logging is off unless [`LOG_ENV`] is set, so
/// stdout carries only the response and stderr stays empty by default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
