//! Table output format
//!
//! Entry point used by the batch framework: a pre-flight check run once
//! per job, and a writer factory run once per task.

use super::writer::TableRecordWriter;
use crate::config::JobConfig;
use crate::error::Result;
use crate::store::StoreClient;
use tracing::{error, info};

/// Output format writing to a column store table
#[derive(Debug, Clone)]
pub struct TableOutputFormat<S> {
    client: S,
}

impl<S: StoreClient> TableOutputFormat<S> {
    /// Create an output format backed by a store client
    pub fn new(client: S) -> Self {
        Self { client }
    }

    /// Validate the job before any task runs
    ///
    /// Fails with [`crate::Error::MissingTableName`] when no table is
    /// configured, failing the whole job rather than a single task.
    pub fn check_output_specs(&self, config: &JobConfig) -> Result<()> {
        config.table_name().map(|_| ())
    }

    /// Open a writer for one task
    ///
    /// Repeats the table name check, then opens the table with buffered
    /// writes.
    pub fn get_record_writer(
        &self,
        config: &JobConfig,
        task: &str,
    ) -> Result<TableRecordWriter<S::Connection>> {
        let table = config.table_name()?;
        let settings = config.store_settings();

        let connection = self.client.open(&settings, &table).map_err(|e| {
            error!(%table, %task, error = %e, "Failed to open table");
            e
        })?;

        info!(
            %table,
            %task,
            cluster = settings.cluster_address.as_deref().unwrap_or("default"),
            "Opened table writer"
        );
        Ok(TableRecordWriter::new(connection))
    }
}
