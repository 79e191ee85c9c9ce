//! Writer configuration.
//!
//! [`WriterOptions`] is the raw option record a writer is constructed from
//! (deserializable, every field defaulted). [`WriterConfig`] is the resolved,
//! immutable form a writer actually runs with.

use crate::ports::filesystem::LogDirectoryProvider;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use textlog_domain::{DEFAULT_ENTRY_FORMAT, EntryFormat};
use thiserror::Error;

/// Default log file name
pub const DEFAULT_FILE_NAME: &str = "error.php";

/// Configuration resolution errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("file_name cannot be empty")]
    EmptyFileName,

    #[error("file_name must be a plain file name: {0}")]
    InvalidFileName(String),

    #[error("file_path is not set and no default log directory is available")]
    NoLogDirectory,
}

/// Raw writer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Base name of the log file
    pub file_name: String,
    /// Directory holding the log file (defaults to the provider's directory)
    pub file_path: Option<PathBuf>,
    /// Omit the guard lines from the header of new files
    pub suppress_guard_header: bool,
    /// Line template
    pub entry_format: String,
    /// Sync file data to disk after every entry
    pub durable_writes: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            file_path: None,
            suppress_guard_header: false,
            entry_format: DEFAULT_ENTRY_FORMAT.to_string(),
            durable_writes: false,
        }
    }
}

impl WriterOptions {
    /// Options writing `file_name` inside `file_path`, everything else default
    pub fn new(file_path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: Some(file_path.into()),
            ..Default::default()
        }
    }

    /// Builder-style method for setting the line template
    pub fn with_entry_format(mut self, entry_format: impl Into<String>) -> Self {
        self.entry_format = entry_format.into();
        self
    }

    /// Builder-style method for suppressing the header guard lines
    pub fn with_suppressed_guard_header(mut self, suppress: bool) -> Self {
        self.suppress_guard_header = suppress;
        self
    }

    /// Builder-style method for enabling per-entry sync
    pub fn with_durable_writes(mut self, durable: bool) -> Self {
        self.durable_writes = durable;
        self
    }
}

/// Resolved writer configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    path: PathBuf,
    format: EntryFormat,
    suppress_guard_header: bool,
    durable_writes: bool,
}

impl WriterConfig {
    /// Resolve options into a configuration.
    ///
    /// `directories` is only consulted when `file_path` is unset.
    pub fn resolve(
        options: &WriterOptions,
        directories: &dyn LogDirectoryProvider,
    ) -> Result<Self, ConfigError> {
        let file_name = options.file_name.trim();
        if file_name.is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        if Path::new(file_name).file_name() != Some(OsStr::new(file_name)) {
            return Err(ConfigError::InvalidFileName(file_name.to_string()));
        }

        let directory = match &options.file_path {
            Some(path) => path.clone(),
            None => directories
                .default_log_directory()
                .ok_or(ConfigError::NoLogDirectory)?,
        };

        Ok(Self {
            path: directory.join(file_name),
            format: EntryFormat::parse(options.entry_format.as_str()),
            suppress_guard_header: options.suppress_guard_header,
            durable_writes: options.durable_writes,
        })
    }

    /// Full path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the log file lives in
    pub fn directory(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Parsed line template
    pub fn format(&self) -> &EntryFormat {
        &self.format
    }

    pub fn suppress_guard_header(&self) -> bool {
        self.suppress_guard_header
    }

    pub fn durable_writes(&self) -> bool {
        self.durable_writes
    }
}
