use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "TABLESCORE_LOG";

/// Logs go to stderr so they never mix with the table output.
pub fn init_tracing() {
    let env_filter = std::env::var(LOG_ENV)
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
