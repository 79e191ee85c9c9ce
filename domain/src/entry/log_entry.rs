//! The log entry entity handed to writers.

use super::priority::Priority;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

/// Length of a date-only string such as `2024-01-31`.
const DATE_ONLY_LEN: usize = 10;

/// A single log entry.
///
/// Entries are created and populated by the caller. Writers read them and
/// may backfill derived fields in place (`date`, `time`, `datetime`,
/// `client_ip`), so callers observe those changes after the entry was written.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// The log message
    pub message: String,
    /// Severity of the entry
    pub priority: Priority,
    /// Free-form category, e.g. the subsystem that produced the entry
    pub category: String,
    /// Source timestamp every derived date/time string is computed from
    pub timestamp: DateTime<Utc>,
    /// Date-only representation (`YYYY-MM-DD`)
    pub date: Option<String>,
    /// Time-only representation (`HH:MM:SS`)
    pub time: Option<String>,
    /// Combined ISO-8601 representation
    pub datetime: Option<String>,
    /// Address of the client that triggered the entry
    pub client_ip: Option<String>,
    extra: BTreeMap<String, String>,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        message: impl Into<String>,
        priority: Priority,
        category: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            priority,
            category: category.into(),
            timestamp: Utc::now(),
            date: None,
            time: None,
            datetime: None,
            client_ip: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style method for setting the source timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder-style method for setting the client address
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    /// Builder-style method for attaching an extra attribute
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Attach or replace an extra attribute.
    ///
    /// Extra attributes can be referenced from templates by name. They never
    /// shadow the built-in attributes (`message`, `priority`, ...).
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.extra.insert(name.into(), value.into());
    }

    /// Get an extra attribute by its exact name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.extra.get(name).map(String::as_str)
    }

    /// Whether the date/time strings must be recomputed from `timestamp`.
    ///
    /// True when `date` is not a date-only value or `time` is missing.
    pub fn needs_timestamp_normalization(&self) -> bool {
        let date_only = self
            .date
            .as_deref()
            .is_some_and(|d| d.chars().count() == DATE_ONLY_LEN);
        !date_only || self.time.is_none()
    }

    /// Recompute `datetime`, `time` and `date` from `timestamp`, all in UTC.
    ///
    /// Returns `true` when the fields were rewritten.
    pub fn normalize_timestamp(&mut self) -> bool {
        if !self.needs_timestamp_normalization() {
            return false;
        }

        self.datetime = Some(self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true));
        self.time = Some(self.timestamp.format("%H:%M:%S").to_string());
        self.date = Some(self.timestamp.format("%Y-%m-%d").to_string());
        true
    }

    /// Attribute name/value pairs that templates can reference.
    ///
    /// Extra attributes come first so that the built-in attributes win when
    /// a consumer folds the pairs into a map. `priority` is the numeric level;
    /// unset optional attributes are omitted.
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attrs: Vec<(String, String)> = self
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        attrs.push(("message".to_string(), self.message.clone()));
        attrs.push(("priority".to_string(), self.priority.level().to_string()));
        attrs.push(("category".to_string(), self.category.clone()));

        let optional = [
            ("date", &self.date),
            ("time", &self.time),
            ("datetime", &self.datetime),
            ("clientip", &self.client_ip),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                attrs.push((name.to_string(), value.clone()));
            }
        }

        attrs
    }
}
