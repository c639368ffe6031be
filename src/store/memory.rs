//! In-memory store
//!
//! Tables live behind a shared lock so that several connections, one per
//! task, can write to the same store. Buffered mutations only become
//! visible once their connection flushes.

use super::{StoreClient, StoreConnection, StoreSettings};
use crate::error::{Error, Result};
use crate::mutation::Mutation;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<String, TableState>,
    /// When set, every submit fails with this message
    write_failure: Option<String>,
    /// Settings of every successful open, in order
    opened: Vec<StoreSettings>,
    open_connections: usize,
}

#[derive(Debug, Default)]
struct TableState {
    submits: usize,
    rows: Vec<Mutation>,
}

/// Shared in-memory column store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create a store with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the given tables
    pub fn with_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for table in tables {
            store.create_table(table);
        }
        store
    }

    /// Create an empty table; existing tables are left untouched
    pub fn create_table(&self, table: impl Into<String>) {
        self.lock().tables.entry(table.into()).or_default();
    }

    /// Make every later submit fail with the given message
    pub fn fail_writes(&self, message: impl Into<String>) {
        self.lock().write_failure = Some(message.into());
    }

    /// Mutations applied to a table, in the order they were flushed
    pub fn mutations(&self, table: &str) -> Vec<Mutation> {
        self.lock()
            .tables
            .get(table)
            .map(|state| state.rows.clone())
            .unwrap_or_default()
    }

    /// Number of submit calls that reached a table, rejected puts included
    pub fn submit_count(&self, table: &str) -> usize {
        self.lock()
            .tables
            .get(table)
            .map_or(0, |state| state.submits)
    }

    /// Settings passed to each successful open
    pub fn opened_with(&self) -> Vec<StoreSettings> {
        self.lock().opened.clone()
    }

    /// Connections opened and not yet closed
    pub fn open_connections(&self) -> usize {
        self.lock().open_connections
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StoreClient for MemoryStore {
    type Connection = MemoryConnection;

    fn open(&self, settings: &StoreSettings, table: &str) -> Result<MemoryConnection> {
        let mut inner = self.lock();
        if !inner.tables.contains_key(table) {
            return Err(Error::store_connection(table, "table does not exist"));
        }
        inner.opened.push(settings.clone());
        inner.open_connections += 1;

        Ok(MemoryConnection {
            inner: Arc::clone(&self.inner),
            table: table.to_string(),
            buffered: false,
            buffer: Vec::new(),
            closed: false,
        })
    }
}

/// Connection to a [`MemoryStore`] table
#[derive(Debug)]
pub struct MemoryConnection {
    inner: Arc<Mutex<Inner>>,
    table: String,
    buffered: bool,
    buffer: Vec<Mutation>,
    closed: bool,
}

impl MemoryConnection {
    /// Mutations submitted but not yet flushed
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn apply(&self, mutations: Vec<Mutation>) -> Result<()> {
        let mut inner = lock(&self.inner);
        let state = inner
            .tables
            .get_mut(&self.table)
            .ok_or_else(|| Error::store_write(format!("table '{}' was dropped", self.table)))?;
        state.rows.extend(mutations);
        Ok(())
    }
}

impl StoreConnection for MemoryConnection {
    fn table(&self) -> &str {
        &self.table
    }

    fn set_buffered_writes(&mut self, enabled: bool) {
        self.buffered = enabled;
    }

    fn submit(&mut self, mutation: Mutation) -> Result<()> {
        if self.closed {
            return Err(Error::store_write("connection is closed"));
        }

        {
            let mut inner = lock(&self.inner);
            if let Some(message) = &inner.write_failure {
                return Err(Error::store_write(message.clone()));
            }
            if let Some(state) = inner.tables.get_mut(&self.table) {
                state.submits += 1;
            }
        }

        if mutation.is_empty() {
            return Err(Error::store_write("put must have at least one column"));
        }

        if self.buffered {
            self.buffer.push(mutation);
            Ok(())
        } else {
            self.apply(vec![mutation])
        }
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.buffer);
        debug!(table = %self.table, count = pending.len(), "Flushing buffered mutations");
        self.apply(pending)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let flushed = self.flush();
        lock(&self.inner).open_connections -= 1;
        flushed
    }
}
