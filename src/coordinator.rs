//! Batch request coordinator.
//!
//! Binds a [`BatchBackend`] to a set of [`BatchSettings`] and exposes the
//! three top-level operations.

use crate::backend::BatchBackend;
use crate::batch_operations::{self, BatchSettings};
use crate::client::DynamoClient;
use crate::config::ClientConfig;
use crate::errors::Result;
use crate::table_operations::{self, CreateTableOutcome, TableDefinition};
use crate::types::{BatchGetRequest, BatchGetResponse, BatchWriteRequest};

pub struct Coordinator<B> {
    backend: B,
    settings: BatchSettings,
}

impl<B: BatchBackend> Coordinator<B> {
    pub fn new(backend: B, settings: BatchSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { backend, settings })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    pub fn set_batch_size(&mut self, batch_size: usize) -> Result<()> {
        let settings = self.settings.clone().with_batch_size(batch_size);
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Read every requested key, merged per table in request order.
    pub fn batch_get_items(&self, request: &BatchGetRequest) -> Result<BatchGetResponse> {
        batch_operations::batch_get(&self.backend, request, &self.settings)
    }

    /// Apply every put and delete.
    pub fn batch_write_items(&self, request: &BatchWriteRequest) -> Result<()> {
        batch_operations::batch_write(&self.backend, request, &self.settings)
    }

    /// Create a table; an existing table counts as success.
    pub fn create_table(&self, definition: &TableDefinition) -> Result<CreateTableOutcome> {
        table_operations::create_table(&self.backend, definition)
    }
}

impl Coordinator<DynamoClient> {
    /// Connect to DynamoDB using `config`, including its batch settings.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let client = DynamoClient::new(config)?;
        Self::new(client, config.batch.clone())
    }
}
