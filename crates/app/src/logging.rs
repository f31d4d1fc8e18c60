use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable consulted before the configured level.
pub const LOG_ENV: &str = "DRILL_LOG";

/// Installs the global subscriber. Logs go to stderr so stdout stays the
/// drill surface.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
