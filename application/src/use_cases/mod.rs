//! Use cases

pub mod render_entry;
