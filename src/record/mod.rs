//! Record module
//!
//! Converts the framework's dynamic key/value pair into a typed record.
//!
//! # Overview
//!
//! Type checks happen once, here, at ingestion. Absent values are kept as
//! `None` so the writer can skip and count them; any other shape that is not
//! a `family → qualifier → cell` mapping of scalars is rejected.

mod types;

pub use types::{Family, Qualifier, Record};
