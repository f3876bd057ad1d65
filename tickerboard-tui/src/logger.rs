//! File logging. The terminal is in raw/alternate-screen mode, so all
//! diagnostics go to a daily-rolling file instead of stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TICKERBOARD_LOG";
const DEFAULT_DIRECTIVES: &str = "error,tickerboard=debug";

pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tickerboard")
        .join("logs")
}

/// Install the global subscriber. Keep the returned guard alive for the
/// whole process or buffered lines are lost.
pub fn init(log_dir: PathBuf) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log dir {}", log_dir.display()))?;

    let writer = RollingFileAppender::builder()
        .filename_prefix("tickerboard")
        .filename_suffix("log")
        .max_log_files(5)
        .rotation(Rotation::DAILY)
        .build(&log_dir)
        .context("building rolling log appender")?;
    let (writer, guard) = tracing_appender::non_blocking(writer);

    let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_DIRECTIVES.to_string());
    let layer = fmt::layer()
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(writer)
        .with_filter(EnvFilter::new(directives));

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(guard)
}
