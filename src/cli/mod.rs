//! CLI module
//!
//! Command-line interface for running the table sink outside a cluster.
//!
//! # Commands
//!
//! - `validate` - Run the job pre-flight check
//! - `write` - Write a typed-bytes key/value stream to a table
//! - `inspect` - Print a typed-bytes key/value stream as JSON

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
