//! Logging infrastructure: formatted text log files.
//!
//! Provides [`TextLogWriter`], a template-driven text file writer that
//! implements the [`LogWriter`](textlog_application::LogWriter) port.

mod text_writer;

pub use text_writer::TextLogWriter;
