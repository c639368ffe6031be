//! Typed bytes reader
//!
//! Decodes a buffer of typed-bytes items into [`Value`]s.

use super::code;
use crate::error::{Error, Result};
use crate::types::Value;
use bytes::{Buf, Bytes};
use std::io::Read;

/// Nesting limit for vectors, lists and maps
const MAX_DEPTH: usize = 64;

/// Reader over an in-memory typed-bytes stream
///
/// Iterating the reader yields alternating key/value items as pairs,
/// which is how a reducer's output stream is laid out.
#[derive(Debug, Clone)]
pub struct TypedBytesReader {
    data: Bytes,
    len: usize,
    failed: bool,
}

impl TypedBytesReader {
    /// Create a reader over a buffer
    pub fn new(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let len = data.len();
        Self {
            data,
            len,
            failed: false,
        }
    }

    /// Read the whole input into memory and create a reader over it
    pub fn from_reader(mut input: impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        input.read_to_end(&mut buf)?;
        Ok(Self::new(buf))
    }

    /// Position of the next unread byte
    pub fn offset(&self) -> usize {
        self.len - self.data.remaining()
    }

    /// Whether all input has been consumed
    pub fn is_empty(&self) -> bool {
        !self.data.has_remaining()
    }

    /// Read the next item, or `None` at the end of input
    pub fn read_value(&mut self) -> Result<Option<Value>> {
        if self.is_empty() {
            return Ok(None);
        }
        let type_code = self.data.get_u8();
        self.read_item(type_code, 0).map(Some)
    }

    /// Read the next key/value pair, or `None` at the end of input
    pub fn read_pair(&mut self) -> Result<Option<(Value, Value)>> {
        let Some(key) = self.read_value()? else {
            return Ok(None);
        };
        match self.read_value()? {
            Some(value) => Ok(Some((key, value))),
            None => Err(self.error("key without a value")),
        }
    }

    fn read_item(&mut self, type_code: u8, depth: usize) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {MAX_DEPTH}")));
        }

        match type_code {
            // Outside of a list the marker stands for an absent value
            code::MARKER => Ok(Value::Null),
            code::BYTES => {
                let len = self.read_len()?;
                Ok(Value::Bytes(self.data.split_to(len)))
            }
            code::BYTE => {
                self.need(1)?;
                Ok(Value::Byte(self.data.get_i8()))
            }
            code::BOOL => {
                self.need(1)?;
                Ok(Value::Bool(self.data.get_u8() != 0))
            }
            code::INT => {
                self.need(4)?;
                Ok(Value::Int(self.data.get_i32()))
            }
            code::LONG => {
                self.need(8)?;
                Ok(Value::Long(self.data.get_i64()))
            }
            code::FLOAT => {
                self.need(4)?;
                Ok(Value::Float(self.data.get_f32()))
            }
            code::DOUBLE => {
                self.need(8)?;
                Ok(Value::Double(self.data.get_f64()))
            }
            code::STRING => {
                let len = self.read_len()?;
                let start = self.offset();
                let raw = self.data.split_to(len);
                String::from_utf8(raw.to_vec())
                    .map(Value::String)
                    .map_err(|e| Error::typed_bytes(start, format!("invalid UTF-8: {e}")))
            }
            code::VECTOR => {
                let count = self.read_count()?;
                let mut items = Vec::with_capacity(count.min(self.data.remaining()));
                for _ in 0..count {
                    let item_code = self.read_code()?;
                    items.push(self.read_item(item_code, depth + 1)?);
                }
                Ok(Value::Vector(items))
            }
            code::LIST => {
                let mut items = Vec::new();
                loop {
                    let item_code = self.read_code()?;
                    if item_code == code::MARKER {
                        break;
                    }
                    items.push(self.read_item(item_code, depth + 1)?);
                }
                Ok(Value::List(items))
            }
            code::MAP => {
                let count = self.read_count()?;
                let mut pairs = Vec::with_capacity(count.min(self.data.remaining()));
                for _ in 0..count {
                    let key_code = self.read_code()?;
                    let key = self.read_item(key_code, depth + 1)?;
                    let value_code = self.read_code()?;
                    let value = self.read_item(value_code, depth + 1)?;
                    pairs.push((key, value));
                }
                Ok(Value::Map(pairs))
            }
            other => Err(Error::typed_bytes(
                self.offset() - 1,
                format!("unknown type code {other}"),
            )),
        }
    }

    fn read_code(&mut self) -> Result<u8> {
        self.need(1)?;
        Ok(self.data.get_u8())
    }

    /// Read a length prefix and make sure that many bytes follow
    fn read_len(&mut self) -> Result<usize> {
        let len = self.read_count()?;
        self.need(len)?;
        Ok(len)
    }

    fn read_count(&mut self) -> Result<usize> {
        self.need(4)?;
        let count = self.data.get_i32();
        usize::try_from(count).map_err(|_| self.error(format!("negative length {count}")))
    }

    fn need(&self, n: usize) -> Result<()> {
        if self.data.remaining() < n {
            return Err(self.error(format!(
                "truncated input, need {n} bytes but {} remain",
                self.data.remaining()
            )));
        }
        Ok(())
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::typed_bytes(self.offset(), message)
    }
}

impl Iterator for TypedBytesReader {
    type Item = Result<(Value, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_pair() {
            Ok(pair) => pair.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
