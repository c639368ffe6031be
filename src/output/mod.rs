//! Output module
//!
//! The output format the batch framework talks to.
//!
//! # Overview
//!
//! - `TableOutputFormat` - validates job configuration and opens writers
//! - `TableRecordWriter` - translates records into mutations for one task
//! - `WriterStats` - what a writer wrote and what it skipped

mod format;
mod writer;

pub use format::TableOutputFormat;
pub use writer::{TableRecordWriter, WriterStats};
