//! # Solidafy Table Sink
//!
//! Output connector that writes reducer output into a column-family store.
//!
//! Each reducer emits a key and a nested value of the shape
//! `family → qualifier → cell`. The sink turns every pair into a single put:
//! the key becomes the row, every present cell becomes one
//! `(family, qualifier, value)` triple, and scalars are encoded the way the
//! store encodes them (big-endian numbers, one-byte booleans, UTF-8 text).
//!
//! ## Quick Start
//!
//! ```rust
//! use solidafy_table_sink::config::{JobConfig, OUTPUT_TABLE};
//! use solidafy_table_sink::output::TableOutputFormat;
//! use solidafy_table_sink::store::MemoryStore;
//! use solidafy_table_sink::{Result, Value};
//!
//! fn main() -> Result<()> {
//!     let store = MemoryStore::with_tables(["events"]);
//!     let format = TableOutputFormat::new(store.clone());
//!     let config = JobConfig::new().with(OUTPUT_TABLE, "events");
//!
//!     // Job-level check, before any task runs
//!     format.check_output_specs(&config)?;
//!
//!     // One writer per task
//!     let mut writer = format.get_record_writer(&config, "task-0")?;
//!     let value = Value::map([("cf", Value::map([("q", "v")]))]);
//!     writer.write(Value::from("rowkey"), value)?;
//!     writer.close()?;
//!
//!     assert_eq!(store.mutations("events").len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    TableOutputFormat                      │
//! │  check_output_specs(config)   get_record_writer(config)   │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴──────┬─────────────┬─────────┐
//! │  typedbytes  │      record        │  mutation   │  store  │
//! ├──────────────┼────────────────────┼─────────────┼─────────┤
//! │ wire decode  │ Value → Record     │ Record →    │ Memory  │
//! │              │ (type checks once) │ Mutation    │ JSONL   │
//! │              │                    │ via encode  │         │
//! └──────────────┴────────────────────┴─────────────┴─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the sink
pub mod error;

/// Dynamic values, scalars and shared utilities
pub mod types;

/// Scalar to store bytes encoding
pub mod encode;

/// Typed-bytes wire format
pub mod typedbytes;

/// Typed records built from dynamic values
pub mod record;

/// Store mutations
pub mod mutation;

/// Store client seam and implementations
pub mod store;

/// Job configuration
pub mod config;

/// Output format and record writer
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{Scalar, Value};

pub use output::{TableOutputFormat, TableRecordWriter, WriterStats};
pub use record::Record;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
