//! Header block written once at the top of a newly created log file.

use super::entry_format::EntryFormat;
use chrono::{DateTime, Utc};
use std::fmt;

/// Line that stops execution if the log file is ever served as a script.
///
/// Log files default to a `.php` name so a web server executes them instead
/// of returning their contents; this line makes that execution a no-op.
pub const GUARD_LINE: &str = "#<?php die('Forbidden.'); ?>";

/// Header describing a log file: creation time and field layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    created_at: DateTime<Utc>,
    field_listing: String,
    include_guard: bool,
}

impl FileHeader {
    /// Header for a file created at `created_at` using `format`
    pub fn new(format: &EntryFormat, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            field_listing: format.field_listing(),
            include_guard: true,
        }
    }

    /// Set whether the guard lines are emitted
    pub fn with_guard(mut self, include_guard: bool) -> Self {
        self.include_guard = include_guard;
        self
    }

    /// Header lines, without line terminators.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(6);

        if self.include_guard {
            lines.push(String::new());
            lines.push(GUARD_LINE.to_string());
        }

        lines.push(format!(
            "Date: {} UTC",
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        ));
        lines.push(String::new());
        lines.push(format!("Fields: {}", self.field_listing));
        lines.push(String::new());

        lines
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
