//! Directory adapters backed by the local file system.

use std::io;
use std::path::{Path, PathBuf};
use textlog_application::{DirectoryCreator, LogDirectoryProvider};
use tracing::debug;

/// Creates directory trees with [`std::fs::create_dir_all`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryCreator;

impl DirectoryCreator for FsDirectoryCreator {
    fn create_directory_tree(&self, path: &Path) -> io::Result<()> {
        debug!("Creating log directory {}", path.display());
        std::fs::create_dir_all(path)
    }
}

/// Default log directory under the platform's local data directory:
/// `<data_local_dir>/textlog/logs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformLogDirectory;

impl LogDirectoryProvider for PlatformLogDirectory {
    fn default_log_directory(&self) -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join("textlog").join("logs"))
    }
}

/// A fixed, preconfigured log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLogDirectory(PathBuf);

impl FixedLogDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl LogDirectoryProvider for FixedLogDirectory {
    fn default_log_directory(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}
