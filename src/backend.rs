//! The remote side of batch operations.
//!
//! Coordinators only talk to DynamoDB through this trait, one blocking call
//! at a time. [`crate::client::DynamoClient`] is the SDK implementation.

use crate::errors::Result;
use crate::table_operations::TableDefinition;
use crate::types::{BatchGetOutput, BatchGetRequest, BatchWriteOutput, BatchWriteRequest};

pub trait BatchBackend {
    /// One `BatchGetItem` call.
    fn batch_get(&self, request: &BatchGetRequest) -> Result<BatchGetOutput>;

    /// One `BatchWriteItem` call.
    fn batch_write(&self, request: &BatchWriteRequest) -> Result<BatchWriteOutput>;

    /// One `CreateTable` call. Errors come back as the service reported them.
    fn create_table(&self, definition: &TableDefinition) -> Result<()>;
}

impl<B: BatchBackend + ?Sized> BatchBackend for &B {
    fn batch_get(&self, request: &BatchGetRequest) -> Result<BatchGetOutput> {
        (**self).batch_get(request)
    }

    fn batch_write(&self, request: &BatchWriteRequest) -> Result<BatchWriteOutput> {
        (**self).batch_write(request)
    }

    fn create_table(&self, definition: &TableDefinition) -> Result<()> {
        (**self).create_table(definition)
    }
}
