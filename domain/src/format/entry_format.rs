//! Line templates with `{NAME}` placeholders.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches one `{NAME}` placeholder, non-greedy between the braces.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("placeholder pattern is valid"));

/// Value rendered for a placeholder the entry has no attribute for.
pub const MISSING_VALUE: &str = "-";

/// Tab-separated layout used when no template is configured.
pub const DEFAULT_ENTRY_FORMAT: &str = "{DATETIME}\t{PRIORITY}\t{CATEGORY}\t{MESSAGE}";

/// A parsed line template.
///
/// Placeholder names are case-insensitive: `{message}` and `{MESSAGE}` refer
/// to the same field. The field list is computed once, in first-occurrence
/// order with duplicates removed, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFormat {
    template: String,
    fields: Vec<String>,
}

impl EntryFormat {
    /// Parse a template and cache its field list.
    pub fn parse(template: impl Into<String>) -> Self {
        let template = template.into();
        let mut fields: Vec<String> = Vec::new();

        for caps in PLACEHOLDER.captures_iter(&template) {
            let name = caps[1].to_uppercase();
            if !fields.contains(&name) {
                fields.push(name);
            }
        }

        Self { template, fields }
    }

    /// The template as configured
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Uppercase field names in first-occurrence order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Check whether the template references a field (case-insensitive)
    pub fn has_field(&self, name: &str) -> bool {
        let name = name.to_uppercase();
        self.fields.iter().any(|f| *f == name)
    }

    /// Substitute every placeholder with its value.
    ///
    /// `values` is keyed by uppercase field name. Fields without a value
    /// render as [`MISSING_VALUE`]. Substitution is a single pass over the
    /// template, so values that themselves contain `{NAME}` are written
    /// verbatim.
    pub fn render(&self, values: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures| {
                values
                    .get(&caps[1].to_uppercase())
                    .map(String::as_str)
                    .unwrap_or(MISSING_VALUE)
                    .to_string()
            })
            .into_owned()
    }

    /// The template lower-cased with braces stripped.
    ///
    /// Separators between placeholders are kept exactly as configured.
    pub fn field_listing(&self) -> String {
        self.template.replace(['{', '}'], "").to_lowercase()
    }
}

impl Default for EntryFormat {
    fn default() -> Self {
        Self::parse(DEFAULT_ENTRY_FORMAT)
    }
}
