//! Line templates and file headers
//!
//! - [`entry_format::EntryFormat`]: parses `{NAME}` placeholders and renders lines
//! - [`header::FileHeader`]: one-time header for newly created log files

pub mod entry_format;
pub mod header;

pub use entry_format::{DEFAULT_ENTRY_FORMAT, EntryFormat, MISSING_VALUE};
pub use header::{FileHeader, GUARD_LINE};
