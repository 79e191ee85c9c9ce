//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Writer options are deserialized directly into the application type.

use serde::{Deserialize, Serialize};
use textlog_application::WriterOptions;

/// Root of a textlog configuration file
///
/// ```toml
/// [writer]
/// file_name = "site.log"
/// file_path = "/var/log/site"
/// suppress_guard_header = true
/// entry_format = "{DATE} {TIME} {CLIENTIP} {MESSAGE}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Options for the text log writer
    pub writer: WriterOptions,
}
