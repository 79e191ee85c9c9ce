//! Port for writers that receive log entries from the dispatch layer.
//!
//! Unlike `tracing` diagnostics, entries written through this port are the
//! product: every failure is surfaced to the caller so the dispatch layer
//! can decide what to do with it.

use super::request_context::RequestContext;
use crate::config::ConfigError;
use std::io;
use std::path::{Path, PathBuf};
use textlog_domain::LogEntry;
use thiserror::Error;

/// Errors that can occur while constructing a writer or writing an entry.
///
/// None of these are retried by the writer.
#[derive(Error, Debug)]
pub enum LogWriterError {
    /// The writer configuration could not be resolved.
    #[error("Invalid writer configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The directory tree holding the log file could not be created.
    #[error("Failed to create log directory {}: {source}", .path.display())]
    DirectoryCreation { path: PathBuf, source: io::Error },

    /// The log file could not be opened for appending.
    #[error("Failed to open log file {}: {source}", .path.display())]
    FileOpen { path: PathBuf, source: io::Error },

    /// The header of a newly created log file could not be written.
    #[error("Failed to write header to {}: {source}", .path.display())]
    HeaderWrite { path: PathBuf, source: io::Error },

    /// An entry line could not be appended.
    #[error("Failed to write entry to {}: {source}", .path.display())]
    EntryWrite { path: PathBuf, source: io::Error },
}

impl LogWriterError {
    /// The filesystem path involved, for I/O failures
    pub fn path(&self) -> Option<&Path> {
        match self {
            LogWriterError::Configuration(_) => None,
            LogWriterError::DirectoryCreation { path, .. }
            | LogWriterError::FileOpen { path, .. }
            | LogWriterError::HeaderWrite { path, .. }
            | LogWriterError::EntryWrite { path, .. } => Some(path),
        }
    }

    /// Check if this error happened while initializing the log file
    pub fn is_initialization_error(&self) -> bool {
        matches!(
            self,
            LogWriterError::DirectoryCreation { .. }
                | LogWriterError::FileOpen { .. }
                | LogWriterError::HeaderWrite { .. }
        )
    }
}

/// A destination for log entries.
pub trait LogWriter {
    /// Render and write one entry.
    ///
    /// The entry is taken mutably: writers backfill derived fields (client
    /// address, normalized date/time) on the caller's entry.
    fn add_entry(
        &mut self,
        entry: &mut LogEntry,
        context: Option<&dyn RequestContext>,
    ) -> Result<(), LogWriterError>;

    /// Release any resources held by the writer. Calling it again is a no-op.
    fn dispose(&mut self);
}
