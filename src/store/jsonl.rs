//! JSON-lines file store
//!
//! Writes each mutation as one JSON object per line to `<dir>/<table>.jsonl`.
//! Byte fields are base64 encoded.

use super::{StoreClient, StoreConnection, StoreSettings};
use crate::error::{Error, Result};
use crate::mutation::Mutation;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Store that appends mutations to local files
#[derive(Debug, Clone)]
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    /// Create a store rooted at a directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File a table's mutations are appended to
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.jsonl"))
    }
}

impl StoreClient for JsonlStore {
    type Connection = JsonlConnection;

    fn open(&self, settings: &StoreSettings, table: &str) -> Result<JsonlConnection> {
        if table.contains(['/', '\\']) || table == "." || table == ".." {
            return Err(Error::store_connection(table, "invalid table name"));
        }
        if let Some(address) = &settings.cluster_address {
            debug!(%address, "Cluster address has no effect on the file store");
        }

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::store_connection(table, format!("Failed to create directory: {e}")))?;
        let path = self.table_path(table);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::store_connection(table, format!("Failed to open file: {e}")))?;

        Ok(JsonlConnection {
            table: table.to_string(),
            path,
            writer: Some(BufWriter::new(file)),
            buffered: false,
        })
    }
}

/// Connection appending to one table file
#[derive(Debug)]
pub struct JsonlConnection {
    table: String,
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    buffered: bool,
}

impl JsonlConnection {
    /// Path of the table file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Serialize)]
struct MutationLine {
    row: String,
    cells: Vec<CellLine>,
}

#[derive(Serialize)]
struct CellLine {
    family: String,
    qualifier: String,
    value: String,
}

impl From<&Mutation> for MutationLine {
    fn from(mutation: &Mutation) -> Self {
        Self {
            row: STANDARD.encode(mutation.row()),
            cells: mutation
                .cells()
                .iter()
                .map(|cell| CellLine {
                    family: STANDARD.encode(&cell.family),
                    qualifier: STANDARD.encode(&cell.qualifier),
                    value: STANDARD.encode(&cell.value),
                })
                .collect(),
        }
    }
}

impl StoreConnection for JsonlConnection {
    fn table(&self) -> &str {
        &self.table
    }

    fn set_buffered_writes(&mut self, enabled: bool) {
        self.buffered = enabled;
    }

    fn submit(&mut self, mutation: Mutation) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| Error::store_write("connection is closed"))?;

        let line = serde_json::to_string(&MutationLine::from(&mutation))
            .map_err(|e| Error::store_write(format!("Failed to serialize mutation: {e}")))?;
        writeln!(writer, "{line}")
            .map_err(|e| Error::store_write(format!("Failed to append mutation: {e}")))?;

        if !self.buffered {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer
                .flush()
                .map_err(|e| Error::store_write(format!("Failed to flush: {e}"))),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> Result<()> {
        let flushed = self.flush();
        self.writer = None;
        flushed
    }
}
