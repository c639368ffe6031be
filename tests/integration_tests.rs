//! Integration tests
//!
//! Tests the full flow: typed-bytes stream → records → mutations → store

use bytes::{Bytes, BytesMut};
use pretty_assertions::assert_eq;
use solidafy_table_sink::config::{JobConfig, OUTPUT_TABLE};
use solidafy_table_sink::encode::{decode_f64, decode_i64, decode_string};
use solidafy_table_sink::store::{JsonlStore, MemoryStore};
use solidafy_table_sink::typedbytes::{write_pair, TypedBytesReader};
use solidafy_table_sink::{Error, TableOutputFormat, Value};
use tempfile::tempdir;

fn reducer_output(pairs: &[(Value, Value)]) -> Bytes {
    let mut buf = BytesMut::new();
    for (key, value) in pairs {
        write_pair(key, value, &mut buf).unwrap();
    }
    buf.freeze()
}

fn job() -> JobConfig {
    JobConfig::from_yaml("output.table: metrics\n").unwrap()
}

// ============================================================================
// Typed Bytes → Memory Store
// ============================================================================

#[test]
fn test_reducer_stream_to_store() {
    let input = reducer_output(&[
        (
            Value::from("host-1"),
            Value::map([(
                "m",
                Value::map([
                    ("requests", Value::Long(1200)),
                    ("latency", Value::Double(12.5)),
                    ("region", Value::from("eu")),
                ]),
            )]),
        ),
        // padding record emitted by the reducer
        (Value::Null, Value::Null),
        (
            Value::from("host-2"),
            Value::map([("m", Value::Null), ("tags", Value::map([("env", "prod")]))]),
        ),
    ]);

    let store = MemoryStore::with_tables(["metrics"]);
    let format = TableOutputFormat::new(store.clone());
    let config = job();
    format.check_output_specs(&config).unwrap();

    let mut writer = format.get_record_writer(&config, "reduce-0").unwrap();
    for pair in TypedBytesReader::new(input) {
        let (key, value) = pair.unwrap();
        writer.write(key, value).unwrap();
    }
    let stats = writer.close().unwrap();

    assert_eq!(stats.records_written, 2);
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(stats.families_skipped, 1);
    assert_eq!(stats.cells_written, 4);

    let mutations = store.mutations("metrics");
    assert_eq!(mutations.len(), 2);

    let first = &mutations[0];
    assert_eq!(decode_string(first.row()).unwrap(), "host-1");
    assert_eq!(decode_i64(&first.cells()[0].value).unwrap(), 1200);
    assert_eq!(decode_f64(&first.cells()[1].value).unwrap(), 12.5);
    assert_eq!(first.cells()[2].value.as_ref(), b"eu");

    let second = &mutations[1];
    assert_eq!(second.len(), 1);
    assert_eq!(second.cells()[0].family.as_ref(), b"tags");
}

#[test]
fn test_bad_record_fails_task_and_releases_connection() {
    let input = reducer_output(&[
        (Value::from("ok"), Value::map([("cf", Value::map([("q", "v")]))])),
        (Value::Vector(vec![Value::Int(1)]), Value::map([("cf", Value::map([("q", "v")]))])),
    ]);

    let store = MemoryStore::with_tables(["metrics"]);
    let format = TableOutputFormat::new(store.clone());

    let result = (|| -> solidafy_table_sink::Result<()> {
        let mut writer = format.get_record_writer(&job(), "reduce-0")?;
        for pair in TypedBytesReader::new(input) {
            let (key, value) = pair?;
            writer.write(key, value)?;
        }
        writer.close()?;
        Ok(())
    })();

    match result {
        Err(Error::InvalidKey { source }) => {
            assert_eq!(source.to_string(), "Unsupported scalar type: vector");
        }
        other => panic!("Expected InvalidKey, got {other:?}"),
    }
    // The first record was buffered and is flushed when the writer is dropped
    assert_eq!(store.mutations("metrics").len(), 1);
    assert_eq!(store.open_connections(), 0);
}

#[test]
fn test_missing_table_fails_before_any_write() {
    let store = MemoryStore::with_tables(["metrics"]);
    let format = TableOutputFormat::new(store.clone());
    let config = JobConfig::new().with("store.cluster.address", "zk1");

    assert!(matches!(
        format.check_output_specs(&config),
        Err(Error::MissingTableName { .. })
    ));
    assert!(matches!(
        format.get_record_writer(&config, "reduce-0"),
        Err(Error::MissingTableName { .. })
    ));
    assert!(store.opened_with().is_empty());
}

// ============================================================================
// JSONL Store
// ============================================================================

#[test]
fn test_writer_with_jsonl_store() {
    let dir = tempdir().unwrap();
    let store = JsonlStore::new(dir.path());
    let format = TableOutputFormat::new(store.clone());
    let config = JobConfig::new().with(OUTPUT_TABLE, "events");

    let mut writer = format.get_record_writer(&config, "reduce-0").unwrap();
    writer
        .write(
            Value::from("rowkey"),
            Value::map([("cf", Value::map([("q", "v")]))]),
        )
        .unwrap();
    writer.close().unwrap();

    let contents = std::fs::read_to_string(store.table_path("events")).unwrap();
    let line: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
    assert_eq!(line["row"], "cm93a2V5");
    assert_eq!(line["cells"][0]["family"], "Y2Y=");
}
