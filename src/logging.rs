//! Tracing setup
//!
//! The TUI owns the terminal, so interactive runs and `--debug` log to a
//! daily-rolling JSON-lines file. One-shot commands log to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::{LoggingConfig, logs_dir};

/// Where log records go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    File,
    Stderr,
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. The returned guard flushes the
/// file writer on drop and must be held until exit.
pub fn init(config: &LoggingConfig, sink: LogSink, debug: bool) -> Result<Option<WorkerGuard>> {
    let level = if debug { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("partnerapply={level}")))
        .context("Invalid log filter")?;

    match sink {
        LogSink::File => {
            let (dir, prefix) = file_target(config.file.as_deref());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {:?}", dir))?;

            let appender = tracing_appender::rolling::daily(&dir, prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .with(filter)
                .try_init()
                .context("Failed to install tracing subscriber")?;

            tracing::debug!(dir = %dir.display(), "file logging initialised");
            Ok(Some(guard))
        }
        LogSink::Stderr => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(None)
        }
    }
}

/// Directory and file-name prefix for the rolling log
fn file_target(configured: Option<&Path>) -> (PathBuf, String) {
    match configured {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let prefix = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "partnerapply.log".to_string());
            (dir, prefix)
        }
        None => (logs_dir(), "partnerapply.log".to_string()),
    }
}
