//! Application layer for textlog
//!
//! This crate contains the entry rendering use case, port definitions for
//! every external collaborator of a writer, and writer configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConfigError, DEFAULT_FILE_NAME, WriterConfig, WriterOptions};
pub use ports::{
    filesystem::{DirectoryCreator, LogDirectoryProvider},
    log_writer::{LogWriter, LogWriterError},
    priority_labels::{PriorityLabelResolver, StandardPriorityLabels},
    request_context::{NoRequestContext, RequestContext, RequestSignals},
};
pub use use_cases::render_entry::EntryRenderer;
