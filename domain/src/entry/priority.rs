//! Log priority levels.
//!
//! Levels are single-bit flags so a set of accepted priorities can be
//! expressed as a mask by whatever dispatch layer routes entries to writers.

use std::fmt;

/// Severity of a log entry, from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// System is unusable
    Emergency,
    /// Action must be taken immediately
    Alert,
    /// Critical conditions
    Critical,
    /// Error conditions
    Error,
    /// Warning conditions
    Warning,
    /// Normal but significant condition
    Notice,
    /// Informational message
    #[default]
    Info,
    /// Debug-level message
    Debug,
}

impl Priority {
    /// Numeric level of this priority (a single bit).
    pub fn level(&self) -> u32 {
        match self {
            Priority::Emergency => 1,
            Priority::Alert => 2,
            Priority::Critical => 4,
            Priority::Error => 8,
            Priority::Warning => 16,
            Priority::Notice => 32,
            Priority::Info => 64,
            Priority::Debug => 128,
        }
    }

    /// Uppercase label used when rendering entries
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Emergency => "EMERGENCY",
            Priority::Alert => "ALERT",
            Priority::Critical => "CRITICAL",
            Priority::Error => "ERROR",
            Priority::Warning => "WARNING",
            Priority::Notice => "NOTICE",
            Priority::Info => "INFO",
            Priority::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().to_lowercase())
    }
}
