//! Domain layer for textlog
//!
//! This crate contains the entities and pure logic of the text log writer.
//! It has no dependencies on infrastructure concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! - **Log entry**: a message with a priority, category and timestamp,
//!   plus any extra attributes the caller attaches
//! - **Entry format**: a line template with `{NAME}` placeholders
//! - **File header**: metadata written once when a log file is created

pub mod entry;
pub mod format;

// Re-export commonly used types
pub use entry::{LogEntry, Priority};
pub use format::{
    DEFAULT_ENTRY_FORMAT, EntryFormat, FileHeader, GUARD_LINE, MISSING_VALUE,
};
