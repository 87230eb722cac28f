//! Tracing subscriber setup.
//!
//! Filtering comes from `DTREE_LOG` when set, else from the configured
//! level. Events go to the configured log file, else to stderr. The browser
//! owns the terminal, so interactive runs without a log file stay silent.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogConfig, DEFAULT_LOG_LEVEL};
use crate::error::{AppError, Result};

/// Environment variable holding filter directives, e.g. `DTREE_LOG=debug`.
pub const LOG_ENV: &str = "DTREE_LOG";

/// Where log events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    pub fn select(config: &LogConfig, interactive: bool) -> Self {
        match (&config.file, interactive) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, false) => LogTarget::Stderr,
            (None, true) => LogTarget::Disabled,
        }
    }
}

/// `DTREE_LOG` if it parses, else `level`, else the built-in default.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Build a subscriber writing formatted events to `writer`.
pub fn build_subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    tracing_subscriber::registry().with(fmt_layer).with(filter)
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(config: &LogConfig, interactive: bool) -> Result<()> {
    let filter = build_filter(config.level_or_default());

    match LogTarget::select(config, interactive) {
        LogTarget::Disabled => {}
        LogTarget::Stderr => {
            let _ = build_subscriber(filter, std::io::stderr, false).try_init();
        }
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            let _ = build_subscriber(filter, Arc::new(file), false).try_init();
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::OutputDestination {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn target_selection() {
        let none = LogConfig::default();
        assert_eq!(LogTarget::select(&none, false), LogTarget::Stderr);
        assert_eq!(LogTarget::select(&none, true), LogTarget::Disabled);

        let with_file = LogConfig {
            level: None,
            file: Some(PathBuf::from("/tmp/dtree.log")),
        };
        assert_eq!(
            LogTarget::select(&with_file, true),
            LogTarget::File(PathBuf::from("/tmp/dtree.log"))
        );
        assert_eq!(
            LogTarget::select(&with_file, false),
            LogTarget::File(PathBuf::from("/tmp/dtree.log"))
        );
    }

    #[test]
    fn subscriber_writes_to_file() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(
            EnvFilter::new("debug"),
            Arc::new(log_file.reopen().unwrap()),
            false,
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(entries = 3, "walk finished");
            tracing::trace!("too chatty");
        });
        let content = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(content.contains("walk finished"));
        assert!(content.contains("entries=3"));
        assert!(!content.contains("too chatty"));
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dtree.log");
        let err = open_log_file(&path).unwrap_err();
        assert!(matches!(err, AppError::OutputDestination { .. }));
    }
}
