//! File system adapters for the directory ports.

mod directory;

pub use directory::{FixedLogDirectory, FsDirectoryCreator, PlatformLogDirectory};
