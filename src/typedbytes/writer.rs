//! Typed bytes writer

use super::code;
use crate::error::{Error, Result};
use crate::types::Value;
use bytes::{BufMut, BytesMut};

/// Append one value in typed-bytes form
///
/// Fails when a length does not fit the wire's signed 32-bit prefix; the
/// buffer may then hold a partial item.
pub fn write_value(value: &Value, buf: &mut BytesMut) -> Result<()> {
    match value {
        Value::Null => buf.put_u8(code::MARKER),
        Value::Bytes(b) => {
            buf.put_u8(code::BYTES);
            put_len(buf, b.len())?;
            buf.put_slice(b);
        }
        Value::Byte(v) => {
            buf.put_u8(code::BYTE);
            buf.put_i8(*v);
        }
        Value::Bool(v) => {
            buf.put_u8(code::BOOL);
            buf.put_u8(u8::from(*v));
        }
        Value::Int(v) => {
            buf.put_u8(code::INT);
            buf.put_i32(*v);
        }
        Value::Long(v) => {
            buf.put_u8(code::LONG);
            buf.put_i64(*v);
        }
        Value::Float(v) => {
            buf.put_u8(code::FLOAT);
            buf.put_f32(*v);
        }
        Value::Double(v) => {
            buf.put_u8(code::DOUBLE);
            buf.put_f64(*v);
        }
        Value::String(s) => {
            buf.put_u8(code::STRING);
            put_len(buf, s.len())?;
            buf.put_slice(s.as_bytes());
        }
        Value::Vector(items) => {
            buf.put_u8(code::VECTOR);
            put_len(buf, items.len())?;
            for item in items {
                write_value(item, buf)?;
            }
        }
        Value::List(items) => {
            buf.put_u8(code::LIST);
            // A null item would read back as the end of the list
            for item in items.iter().filter(|item| !item.is_null()) {
                write_value(item, buf)?;
            }
            buf.put_u8(code::MARKER);
        }
        Value::Map(pairs) => {
            buf.put_u8(code::MAP);
            put_len(buf, pairs.len())?;
            for (k, v) in pairs {
                write_value(k, buf)?;
                write_value(v, buf)?;
            }
        }
    }
    Ok(())
}

/// Append a key/value pair
pub fn write_pair(key: &Value, value: &Value, buf: &mut BytesMut) -> Result<()> {
    write_value(key, buf)?;
    write_value(value, buf)
}

fn put_len(buf: &mut BytesMut, len: usize) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| {
        Error::typed_bytes(buf.len(), format!("length {len} exceeds the 32-bit limit"))
    })?;
    buf.put_i32(len);
    Ok(())
}
