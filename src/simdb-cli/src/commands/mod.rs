//! Command handlers for simdb CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod build;
pub mod stats;
pub mod talents;
