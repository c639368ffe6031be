//! Store module
//!
//! The seam between the writer and the column store client.
//!
//! # Overview
//!
//! - `StoreClient` - opens a connection to one table
//! - `StoreConnection` - submits mutations, flushes and closes
//! - `MemoryStore` - in-process store, used by tests and embedders
//! - `JsonlStore` - appends mutations to `<table>.jsonl` files for dry runs
//!
//! Connections are synchronous. With buffered writes enabled a connection
//! may hold mutations client-side until `flush` or `close`.

mod jsonl;
mod memory;

pub use jsonl::{JsonlConnection, JsonlStore};
pub use memory::{MemoryConnection, MemoryStore};

use crate::error::Result;
use crate::mutation::Mutation;

/// Connection parameters handed to a store client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSettings {
    /// Coordination endpoint override; `None` uses the client's discovery
    pub cluster_address: Option<String>,
}

/// Factory for table connections
pub trait StoreClient {
    /// Connection type produced by this client
    type Connection: StoreConnection;

    /// Open a connection to a table
    fn open(&self, settings: &StoreSettings, table: &str) -> Result<Self::Connection>;
}

/// An open connection to one table
pub trait StoreConnection: Send {
    /// Name of the table this connection writes to
    fn table(&self) -> &str;

    /// Enable or disable client-side buffering of submitted mutations
    fn set_buffered_writes(&mut self, enabled: bool);

    /// Submit a mutation
    ///
    /// Fails with [`crate::Error::StoreWriteFailure`]; no retry is attempted.
    fn submit(&mut self, mutation: Mutation) -> Result<()>;

    /// Send any buffered mutations to the store
    fn flush(&mut self) -> Result<()>;

    /// Flush and release the connection; later calls are no-ops
    fn close(&mut self) -> Result<()>;
}
