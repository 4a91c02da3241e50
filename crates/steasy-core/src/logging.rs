//! Logging configuration using tracing
//!
//! stdout belongs to the headless NDJSON stream, so all diagnostics go to a
//! daily rolling file.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_ENV_VAR: &str = "STEASY_LOG";
const LOG_FILE_PREFIX: &str = "steasy.log";
const DEFAULT_DIRECTIVES: &str = "station_easy=info,steasy_app=info,steasy_device=info,warn";
const VERBOSE_DIRECTIVES: &str = "station_easy=debug,steasy_app=debug,steasy_device=debug,info";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/station-easy/logs/`.
/// `STEASY_LOG` always wins; otherwise `verbose` selects debug-level
/// directives for the workspace crates.
///
/// # Examples
/// ```bash
/// STEASY_LOG=steasy_app=trace steasy
/// ```
pub fn init(verbose: bool) -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_DIRECTIVES
        } else {
            DEFAULT_DIRECTIVES
        })
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Station Easy starting (verbose: {})", verbose);
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(log_dir)
}

/// Directory holding the rolling log files
pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("station-easy").join("logs")
}
