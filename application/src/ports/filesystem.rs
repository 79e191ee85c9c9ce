//! Filesystem ports used to place log files.
//!
//! - [`DirectoryCreator`]: creates the directory tree a log file lives in
//! - [`LogDirectoryProvider`]: supplies the directory used when none is configured

use std::io;
use std::path::{Path, PathBuf};

/// Creates directory trees.
///
/// Implementations must be idempotent: creating a tree that already exists
/// succeeds.
pub trait DirectoryCreator: Send + Sync {
    /// Create `path` and every missing ancestor.
    fn create_directory_tree(&self, path: &Path) -> io::Result<()>;
}

/// Provides the base directory for log files.
///
/// Consulted once, when a writer is constructed without an explicit
/// `file_path`.
pub trait LogDirectoryProvider: Send + Sync {
    /// The default log directory, or `None` when it cannot be determined.
    fn default_log_directory(&self) -> Option<PathBuf>;
}
