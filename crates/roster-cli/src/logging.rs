use tracing_subscriber::EnvFilter;

use roster_core::config::LoggingSettings;

/// Installs a stderr subscriber filtered by `RUST_LOG`, else `settings.level`.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore a subscriber installed earlier in the process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
