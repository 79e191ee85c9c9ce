//! Log entries and their priorities

pub mod log_entry;
pub mod priority;

pub use log_entry::LogEntry;
pub use priority::Priority;
