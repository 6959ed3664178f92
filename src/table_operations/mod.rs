//! Table management operations for DynamoDB.
//!
//! This module provides:
//! - `definition` - Table definition model and local validation
//! - `index` - GSI and LSI definitions
//! - `create` - Idempotent table creation

mod create;
mod definition;
mod index;

pub use create::{CreateTableOutcome, create_table};
pub use definition::{
    AttributeDefinition, AttributeType, Capacity, KeySchemaElement, KeyType, TableDefinition,
    Throughput,
};
pub use index::{GlobalSecondaryIndex, LocalSecondaryIndex, Projection};
