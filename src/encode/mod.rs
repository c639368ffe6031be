//! Byte encoder module
//!
//! Maps scalars to the canonical byte layout used by the column store.
//!
//! # Overview
//!
//! - Booleans are one byte, `0xFF` for true and `0x00` for false
//! - Integers and floats are fixed-width big-endian, so encoded numbers
//!   compare the way the store compares row keys
//! - Text is UTF-8 without prefix or terminator
//! - Raw bytes pass through unchanged
//!
//! The `decode_*` functions invert the fixed-width layouts.

mod encoder;

pub use encoder::{
    decode_bool, decode_f32, decode_f64, decode_i32, decode_i64, decode_string, encode,
    encode_value, BOOL_FALSE, BOOL_TRUE,
};
