use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogConfig;

const LOG_FILE_PREFIX: &str = "robot-positions.log";

/// Installs the global subscriber. Keep the guard alive until shutdown or
/// buffered lines are lost.
pub fn init_tracing(config: &LogConfig) -> WorkerGuard {
    let filter = config
        .level
        .as_deref()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let (writer, guard) = match &config.dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX)),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(config.dir.is_none())
        .with_writer(writer)
        .try_init();

    guard
}
