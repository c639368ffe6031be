//! Tests for typedbytes module

use super::*;
use crate::error::Error;
use crate::types::Value;
use bytes::{Bytes, BytesMut};
use pretty_assertions::assert_eq;

fn encoded(values: &[Value]) -> Bytes {
    let mut buf = BytesMut::new();
    for value in values {
        write_value(value, &mut buf).unwrap();
    }
    buf.freeze()
}

// ============================================================================
// Reader Tests
// ============================================================================

#[test]
fn test_read_scalars_from_raw_bytes() {
    let raw: &[u8] = &[
        3, 0, 0, 0, 42, // int 42
        7, 0, 0, 0, 2, b'c', b'f', // string "cf"
        2, 1, // bool true
        4, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // long -1
    ];
    let mut reader = TypedBytesReader::new(Bytes::copy_from_slice(raw));

    assert_eq!(reader.read_value().unwrap(), Some(Value::Int(42)));
    assert_eq!(reader.read_value().unwrap(), Some(Value::from("cf")));
    assert_eq!(reader.read_value().unwrap(), Some(Value::Bool(true)));
    assert_eq!(reader.read_value().unwrap(), Some(Value::Long(-1)));
    assert_eq!(reader.read_value().unwrap(), None);
    assert!(reader.is_empty());
    assert_eq!(reader.offset(), raw.len());
}

#[test]
fn test_read_nested_record() {
    let value = Value::map([(
        "cf",
        Value::map([("q", Value::from("v")), ("n", Value::Long(9))]),
    )]);
    let mut reader = TypedBytesReader::new(encoded(&[Value::from("rowkey"), value.clone()]));

    let (key, read) = reader.read_pair().unwrap().unwrap();
    assert_eq!(key, Value::from("rowkey"));
    assert_eq!(read, value);
    assert!(reader.read_pair().unwrap().is_none());
}

#[test]
fn test_marker_reads_as_null() {
    let value = Value::map([("cf", Value::Null), ("other", Value::map([("q", Value::Null)]))]);
    let mut reader = TypedBytesReader::new(encoded(&[value.clone()]));
    assert_eq!(reader.read_value().unwrap(), Some(value));

    let mut reader = TypedBytesReader::new(Bytes::from_static(&[code::MARKER]));
    assert_eq!(reader.read_value().unwrap(), Some(Value::Null));
}

#[test]
fn test_read_list_and_vector() {
    let raw: &[u8] = &[
        9, 3, 0, 0, 0, 1, 3, 0, 0, 0, 2, 255, // list [1, 2]
        8, 0, 0, 0, 1, 1, 0xFE, // vector [byte -2]
    ];
    let mut reader = TypedBytesReader::new(Bytes::copy_from_slice(raw));

    assert_eq!(
        reader.read_value().unwrap(),
        Some(Value::List(vec![Value::Int(1), Value::Int(2)]))
    );
    assert_eq!(
        reader.read_value().unwrap(),
        Some(Value::Vector(vec![Value::Byte(-2)]))
    );
}

#[test]
fn test_iterate_pairs() {
    let reader = TypedBytesReader::new(encoded(&[
        Value::from("a"),
        Value::Int(1),
        Value::from("b"),
        Value::Int(2),
    ]));

    let pairs: Vec<(Value, Value)> = reader.map(|pair| pair.unwrap()).collect();
    assert_eq!(
        pairs,
        vec![
            (Value::from("a"), Value::Int(1)),
            (Value::from("b"), Value::Int(2)),
        ]
    );
}

#[test]
fn test_from_reader() {
    let data = encoded(&[Value::Double(0.5)]);
    let mut reader = TypedBytesReader::from_reader(data.as_ref()).unwrap();
    assert_eq!(reader.read_value().unwrap(), Some(Value::Double(0.5)));
}

// ============================================================================
// Malformed Input Tests
// ============================================================================

#[test]
fn test_truncated_long() {
    let mut reader = TypedBytesReader::new(Bytes::from_static(&[4, 0, 0, 1]));
    match reader.read_value() {
        Err(Error::TypedBytes { offset, message }) => {
            assert_eq!(offset, 1);
            assert!(message.contains("truncated"));
        }
        other => panic!("Expected TypedBytes error, got {other:?}"),
    }
}

#[test]
fn test_string_length_past_end() {
    let mut reader = TypedBytesReader::new(Bytes::from_static(&[7, 0, 0, 0, 9, b'x']));
    assert!(matches!(
        reader.read_value(),
        Err(Error::TypedBytes { .. })
    ));
}

#[test]
fn test_negative_length() {
    let mut reader = TypedBytesReader::new(Bytes::from_static(&[0, 0xFF, 0xFF, 0xFF, 0xFF]));
    let err = reader.read_value().unwrap_err();
    assert!(err.to_string().contains("negative length -1"));
}

#[test]
fn test_unknown_type_code() {
    let mut reader = TypedBytesReader::new(Bytes::from_static(&[3, 0, 0, 0, 1, 42]));
    assert_eq!(reader.read_value().unwrap(), Some(Value::Int(1)));
    match reader.read_value() {
        Err(Error::TypedBytes { offset, message }) => {
            assert_eq!(offset, 5);
            assert_eq!(message, "unknown type code 42");
        }
        other => panic!("Expected TypedBytes error, got {other:?}"),
    }
}

#[test]
fn test_key_without_value() {
    let mut reader = TypedBytesReader::new(encoded(&[Value::from("lonely")]));
    let err = reader.read_pair().unwrap_err();
    assert!(err.to_string().contains("key without a value"));
}

#[test]
fn test_iterator_stops_after_error() {
    let mut reader = TypedBytesReader::new(Bytes::from_static(&[42]));
    assert!(reader.next().unwrap().is_err());
    assert!(reader.next().is_none());
}

#[test]
fn test_invalid_utf8_string() {
    let mut reader = TypedBytesReader::new(Bytes::from_static(&[7, 0, 0, 0, 1, 0xC3]));
    let err = reader.read_value().unwrap_err();
    assert!(err.to_string().contains("invalid UTF-8"));
}

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn test_write_layout() {
    let mut buf = BytesMut::new();
    write_pair(&Value::from("k"), &Value::Int(258), &mut buf).unwrap();
    assert_eq!(buf.as_ref(), &[7, 0, 0, 0, 1, b'k', 3, 0, 0, 1, 2]);
}

#[test]
fn test_write_list_drops_null_items() {
    let mut buf = BytesMut::new();
    write_value(
        &Value::List(vec![Value::Null, Value::Bool(false)]),
        &mut buf,
    )
    .unwrap();
    assert_eq!(buf.as_ref(), &[9, 2, 0, 255]);
}
