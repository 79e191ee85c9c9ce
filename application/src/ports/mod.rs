//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement,
//! and the contract writers expose to the dispatch layer.

pub mod filesystem;
pub mod log_writer;
pub mod priority_labels;
pub mod request_context;
