//! Typed bytes module
//!
//! Reader and writer for the typed-bytes serialization that streaming
//! jobs use to hand typed key/value pairs to an output format.
//!
//! # Format
//!
//! Every item starts with a one-byte type code. Numbers are big-endian.
//!
//! | Code | Type   | Payload                              |
//! |------|--------|--------------------------------------|
//! | 0    | bytes  | i32 length + data                    |
//! | 1    | byte   | 1 byte                               |
//! | 2    | bool   | 1 byte, non-zero is true             |
//! | 3    | int    | 4 bytes                              |
//! | 4    | long   | 8 bytes                              |
//! | 5    | float  | 4 bytes                              |
//! | 6    | double | 8 bytes                              |
//! | 7    | string | i32 length + UTF-8                   |
//! | 8    | vector | i32 count + items                    |
//! | 9    | list   | items until the 255 marker           |
//! | 10   | map    | i32 count + key/value item pairs     |
//! | 255  | marker | ends a list; anywhere else it is null |

mod reader;
mod writer;

pub use reader::TypedBytesReader;
pub use writer::{write_pair, write_value};

/// Type codes used on the wire
pub mod code {
    pub const BYTES: u8 = 0;
    pub const BYTE: u8 = 1;
    pub const BOOL: u8 = 2;
    pub const INT: u8 = 3;
    pub const LONG: u8 = 4;
    pub const FLOAT: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const STRING: u8 = 7;
    pub const VECTOR: u8 = 8;
    pub const LIST: u8 = 9;
    pub const MAP: u8 = 10;
    pub const MARKER: u8 = 255;
}

#[cfg(test)]
mod tests;
