//! Tracing subscriber setup.

use std::path::Path;

use anyhow::Result;
use battle_core::{BattleError, GameError};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber.
///
/// Logs always go to stderr. When `log_dir` is set they are also appended to
/// `battle.log` there; the returned guard must be held until exit so the
/// file writer flushes.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "battle.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/battle.log", dir.display());
    }
    Ok(guard)
}

/// Log a failed run, classifying engine errors by severity and code.
pub fn log_failure(error: &anyhow::Error) {
    match classify(error) {
        Some((severity, code)) => {
            tracing::error!(severity, code, "Battle aborted: {error:#}");
        }
        None => tracing::error!("Battle client failed: {error:#}"),
    }
}

/// Severity and code of an engine error, if `error` is one.
fn classify(error: &anyhow::Error) -> Option<(&'static str, &'static str)> {
    error
        .downcast_ref::<BattleError>()
        .map(|battle_error| (battle_error.severity().as_str(), battle_error.error_code()))
}
