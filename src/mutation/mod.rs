//! Mutation module
//!
//! Turns a typed record into a single put for the column store.
//!
//! # Overview
//!
//! - `Mutation` - one row key with its `(family, qualifier, value)` cells
//! - `build_mutation` - encodes every present cell of a record, skipping
//!   absent families and cells

mod builder;
mod types;

pub use builder::{build_mutation, SkipCounts};
pub use types::{Cell, Mutation};
