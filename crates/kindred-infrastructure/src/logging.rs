//! Tracing subscriber setup for the binaries.
//!
//! Filter comes from `KINDRED_LOG` (EnvFilter syntax), falling back to the
//! configured level.

use crate::paths::KindredPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "KINDRED_LOG";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Logs to `<config>/logs/<file_prefix>.YYYY-MM-DD`, rolled daily.
///
/// Keeps the terminal free for interactive screens. Hold the returned
/// guard until exit or buffered lines are lost.
pub fn init_file_logging(
    paths: &KindredPaths,
    file_prefix: &str,
    default_level: &str,
) -> anyhow::Result<WorkerGuard> {
    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    let appender = tracing_appender::rolling::daily(&logs_dir, file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::info!(dir = %logs_dir.display(), "file logging started");
    Ok(guard)
}

/// Logs to stderr, for one-shot CLI commands.
pub fn init_stderr_logging(default_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
