//! Render entry use case
//!
//! Turns a [`LogEntry`] into one line of text according to an
//! [`EntryFormat`]:
//!
//! 1. **Backfill** the client address from the request context, if the entry has none
//! 2. **Normalize** `date`/`time`/`datetime` from the entry timestamp, in UTC
//! 3. **Map** entry attributes to uppercase field names, labelling the priority
//! 4. **Substitute** placeholders, writing `-` for fields the entry lacks
//!
//! Steps 1 and 2 mutate the caller's entry.

use crate::ports::priority_labels::PriorityLabelResolver;
use crate::ports::request_context::RequestContext;
use std::collections::HashMap;
use std::sync::Arc;
use textlog_domain::{EntryFormat, LogEntry};
use tracing::trace;

/// Renders entries into lines for one template.
#[derive(Clone)]
pub struct EntryRenderer {
    format: EntryFormat,
    labels: Arc<dyn PriorityLabelResolver>,
}

impl EntryRenderer {
    pub fn new(format: EntryFormat, labels: Arc<dyn PriorityLabelResolver>) -> Self {
        Self { format, labels }
    }

    /// The template this renderer substitutes into
    pub fn format(&self) -> &EntryFormat {
        &self.format
    }

    /// Backfill derived fields on the entry.
    pub fn prepare(&self, entry: &mut LogEntry, context: Option<&dyn RequestContext>) {
        if entry.client_ip.is_none()
            && let Some(address) = context.and_then(|c| c.client_address())
        {
            entry.client_ip = Some(address.to_string());
        }

        if entry.normalize_timestamp() {
            trace!("Normalized timestamp fields from {}", entry.timestamp);
        }
    }

    /// Uppercase field name -> rendered value for an entry.
    pub fn field_values(&self, entry: &LogEntry) -> HashMap<String, String> {
        let mut values: HashMap<String, String> = entry
            .attributes()
            .into_iter()
            .map(|(name, value)| (name.to_uppercase(), value))
            .collect();

        values.insert(
            "PRIORITY".to_string(),
            self.labels.label(entry.priority).into_owned(),
        );

        values
    }

    /// Render a prepared entry into a line, without terminator.
    pub fn render(&self, entry: &LogEntry) -> String {
        self.format.render(&self.field_values(entry))
    }

    /// Prepare and render in one step, returning the newline-terminated line.
    pub fn render_line(
        &self,
        entry: &mut LogEntry,
        context: Option<&dyn RequestContext>,
    ) -> String {
        self.prepare(entry, context);
        let mut line = self.render(entry);
        line.push('\n');
        line
    }
}

impl std::fmt::Debug for EntryRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryRenderer")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
