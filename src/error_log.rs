//! Run-scoped error accounting
//!
//! Every non-fatal failure during a run goes through `ErrorAccumulator`: it is
//! kept as a timestamped entry, appended to the durable log file when one is
//! configured, and counted. The count only grows for the lifetime of the
//! accumulator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::ScrapeConfig;
use crate::errors::ScrapeResult;

/// One recorded failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorLogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl fmt::Display for ErrorLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.message
        )
    }
}

struct LogSink {
    path: PathBuf,
    file: File,
}

/// Counter plus append-only log for one run
#[derive(Default)]
pub struct ErrorAccumulator {
    entries: Vec<ErrorLogEntry>,
    sink: Option<LogSink>,
}

impl ErrorAccumulator {
    /// Accumulator without a durable sink
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Accumulator that also appends every entry to `path`
    ///
    /// Parent directories are created. Existing content is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened for appending.
    pub fn with_log_file(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            entries: Vec::new(),
            sink: Some(LogSink { path, file }),
        })
    }

    /// Build from `error_log_path` in the config
    ///
    /// # Errors
    ///
    /// Returns an error if the configured log file cannot be opened.
    pub fn from_config(config: &ScrapeConfig) -> ScrapeResult<Self> {
        match config.error_log_path() {
            Some(path) => Ok(Self::with_log_file(path)?),
            None => Ok(Self::in_memory()),
        }
    }

    /// Record a failure
    ///
    /// A failed write to the log file is reported through `tracing` and does
    /// not stop the entry from being counted.
    pub fn log_error(&mut self, message: impl Into<String>) {
        let entry = ErrorLogEntry {
            timestamp: Utc::now(),
            message: message.into(),
        };
        warn!("{}", entry.message);

        if let Some(sink) = self.sink.as_mut()
            && let Err(e) = writeln!(sink.file, "{entry}")
        {
            warn!(
                "Failed to append to error log {}: {}",
                sink.path.display(),
                e
            );
        }

        self.entries.push(entry);
    }

    /// Number of failures recorded so far
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[ErrorLogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|s| s.path.as_path())
    }

    /// End-of-run aggregate
    #[must_use]
    pub fn report_summary(&self) -> ErrorSummary {
        ErrorSummary {
            total: self.count(),
            log_path: self.log_path().map(Path::to_path_buf),
        }
    }
}

impl fmt::Debug for ErrorAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorAccumulator")
            .field("count", &self.count())
            .field("log_path", &self.log_path())
            .finish()
    }
}

/// Total failures for a run and where to find the details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSummary {
    pub total: usize,
    pub log_path: Option<PathBuf>,
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total errors encountered: {}.", self.total)?;
        if let Some(path) = &self.log_path {
            write!(f, " Check '{}' for details.", path.display())?;
        }
        Ok(())
    }
}
