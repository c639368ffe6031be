//! Scalar encoding and store-native decoding

use crate::error::{Error, Result};
use crate::types::{Scalar, Value};
use bytes::{BufMut, Bytes, BytesMut};

/// Encoded form of `true`
pub const BOOL_TRUE: u8 = 0xFF;

/// Encoded form of `false`
pub const BOOL_FALSE: u8 = 0x00;

// ============================================================================
// Encoding
// ============================================================================

/// Encode a scalar into its canonical bytes
pub fn encode(scalar: &Scalar) -> Bytes {
    match scalar {
        Scalar::Bool(true) => Bytes::from_static(&[BOOL_TRUE]),
        Scalar::Bool(false) => Bytes::from_static(&[BOOL_FALSE]),
        Scalar::Int(v) => fixed(4, |buf| buf.put_i32(*v)),
        Scalar::Long(v) => fixed(8, |buf| buf.put_i64(*v)),
        Scalar::Float(v) => fixed(4, |buf| buf.put_f32(*v)),
        Scalar::Double(v) => fixed(8, |buf| buf.put_f64(*v)),
        Scalar::Text(s) => Bytes::copy_from_slice(s.as_bytes()),
        Scalar::Bytes(b) => b.clone(),
    }
}

/// Encode a dynamic value, rejecting anything that is not a scalar
///
/// Fails with [`Error::UnsupportedScalarType`] naming the runtime type.
pub fn encode_value(value: &Value) -> Result<Bytes> {
    let scalar = Scalar::try_from(value.clone())?;
    Ok(encode(&scalar))
}

fn fixed(width: usize, put: impl FnOnce(&mut BytesMut)) -> Bytes {
    let mut buf = BytesMut::with_capacity(width);
    put(&mut buf);
    buf.freeze()
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a boolean; any non-zero byte is true
pub fn decode_bool(bytes: &[u8]) -> Result<bool> {
    let [b] = exact::<1>(bytes, "bool")?;
    Ok(b != BOOL_FALSE)
}

/// Decode a big-endian 32-bit integer
pub fn decode_i32(bytes: &[u8]) -> Result<i32> {
    exact(bytes, "int").map(i32::from_be_bytes)
}

/// Decode a big-endian 64-bit integer
pub fn decode_i64(bytes: &[u8]) -> Result<i64> {
    exact(bytes, "long").map(i64::from_be_bytes)
}

/// Decode a big-endian 32-bit float
pub fn decode_f32(bytes: &[u8]) -> Result<f32> {
    exact(bytes, "float").map(f32::from_be_bytes)
}

/// Decode a big-endian 64-bit float
pub fn decode_f64(bytes: &[u8]) -> Result<f64> {
    exact(bytes, "double").map(f64::from_be_bytes)
}

/// Decode UTF-8 text
pub fn decode_string(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::decode(format!("invalid UTF-8: {e}")))
}

fn exact<const N: usize>(bytes: &[u8], type_name: &str) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| {
        Error::decode(format!(
            "{type_name} needs {N} bytes, got {}",
            bytes.len()
        ))
    })
}
