//! Port for turning priorities into the labels written to log lines.

use std::borrow::Cow;
use textlog_domain::Priority;

/// Resolves the human-readable label rendered for a priority.
///
/// Writers hold this as an injected capability so label tables can be
/// swapped (localized, shortened) without touching the writer.
pub trait PriorityLabelResolver: Send + Sync {
    /// Label for the given priority.
    fn label(&self, priority: Priority) -> Cow<'_, str>;
}

/// The standard uppercase label table (`ERROR`, `WARNING`, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPriorityLabels;

impl PriorityLabelResolver for StandardPriorityLabels {
    fn label(&self, priority: Priority) -> Cow<'_, str> {
        Cow::Borrowed(priority.label())
    }
}
