//! Infrastructure layer for textlog
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the text file writer, file system directory
//! handling, and configuration file loading.
//!
//! # Example
//!
//! ```no_run
//! use textlog_application::{LogWriter, WriterOptions};
//! use textlog_domain::{LogEntry, Priority};
//! use textlog_infrastructure::TextLogWriter;
//!
//! # fn main() -> Result<(), textlog_application::LogWriterError> {
//! let options = WriterOptions::new("/var/log/site", "error.php");
//! let mut writer = TextLogWriter::new(&options)?;
//!
//! let mut entry = LogEntry::new("Database unreachable", Priority::Error, "db");
//! writer.add_entry(&mut entry, None)?;
//! writer.dispose();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fs;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use fs::{FixedLogDirectory, FsDirectoryCreator, PlatformLogDirectory};
pub use logging::TextLogWriter;
