//! Record writer
//!
//! Translates reducer output into mutations and submits them over a store
//! connection owned for the duration of one output task.

use crate::error::{Error, Result};
use crate::mutation::build_mutation;
use crate::record::Record;
use crate::store::StoreConnection;
use crate::types::Value;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Counters for one writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriterStats {
    /// Mutations submitted to the store
    pub records_written: usize,
    /// Records with a null key or value
    pub records_skipped: usize,
    /// Families that mapped to null
    pub families_skipped: usize,
    /// Qualifiers that mapped to null
    pub cells_skipped: usize,
    /// Cells submitted to the store
    pub cells_written: usize,
}

/// Writer for one output task
///
/// The connection is opened before the writer exists and released when it
/// is closed. `close` consumes the writer, so nothing can be written after
/// it. A writer dropped without `close`, for example after a failed write,
/// still closes its connection.
pub struct TableRecordWriter<C: StoreConnection> {
    connection: Option<C>,
    stats: WriterStats,
}

impl<C: StoreConnection> TableRecordWriter<C> {
    /// Wrap an open connection, switching it to buffered writes
    pub fn new(mut connection: C) -> Self {
        connection.set_buffered_writes(true);
        Self {
            connection: Some(connection),
            stats: WriterStats::default(),
        }
    }

    /// Write one key/value pair
    ///
    /// A null key or value is skipped without error. Anything else must be a
    /// scalar key and a `family → qualifier → cell` mapping: a bad key fails
    /// with [`Error::InvalidKey`], a bad mapping with
    /// [`Error::InvalidColumnData`], and in both cases nothing is submitted.
    /// Null families and null cells inside the mapping are skipped.
    pub fn write(&mut self, key: Value, value: Value) -> Result<()> {
        match Record::from_values(key, value)? {
            Some(record) => self.write_record(&record),
            None => {
                self.stats.records_skipped += 1;
                debug!("Skipping record with null key or value");
                Ok(())
            }
        }
    }

    /// Write a record that has already been validated
    ///
    /// Each call submits its own mutation; writing the same record twice
    /// submits it twice. A mutation without cells is submitted too, and the
    /// store decides whether it is acceptable.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let (mutation, skipped) = build_mutation(record);
        self.stats.families_skipped += skipped.families;
        self.stats.cells_skipped += skipped.cells;

        let cells = mutation.len();
        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| Error::store_write("writer is closed"))?;
        connection.submit(mutation).map_err(|e| match e {
            e @ Error::StoreWriteFailure { .. } => e,
            other => Error::store_write(other.to_string()),
        })?;

        self.stats.records_written += 1;
        self.stats.cells_written += cells;
        Ok(())
    }

    /// Counters so far
    pub fn stats(&self) -> WriterStats {
        self.stats
    }

    /// Table this writer targets
    pub fn table(&self) -> Option<&str> {
        self.connection.as_ref().map(|c| c.table())
    }

    /// Flush buffered mutations and release the connection
    pub fn close(mut self) -> Result<WriterStats> {
        if let Some(mut connection) = self.connection.take() {
            connection.close()?;
            info!(
                table = connection.table(),
                records = self.stats.records_written,
                skipped = self.stats.records_skipped,
                "Closed table writer"
            );
        }
        Ok(self.stats)
    }
}

impl<C: StoreConnection> Drop for TableRecordWriter<C> {
    fn drop(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            warn!(
                table = connection.table(),
                "Table writer dropped without close, closing connection"
            );
            if let Err(e) = connection.close() {
                error!(table = connection.table(), error = %e, "Failed to close connection");
            }
        }
    }
}

impl<C: StoreConnection> std::fmt::Debug for TableRecordWriter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRecordWriter")
            .field("table", &self.table())
            .field("stats", &self.stats)
            .finish()
    }
}
