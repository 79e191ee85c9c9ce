//! Configuration file loading for textlog
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TEXTLOG_*` environment variables
//! 2. Explicitly specified file
//! 3. Project root: `./textlog.toml` or `./.textlog.toml`
//! 4. Global config: `<config dir>/textlog/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::FileConfig;
pub use loader::ConfigLoader;
