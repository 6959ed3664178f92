//! Batch reads, batch writes and idempotent table creation for DynamoDB.
//!
//! Large batch requests are split into chunks the service accepts,
//! unprocessed keys/items are resubmitted until none remain, and the items
//! of every call are merged into one result per table.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use aws_sdk_dynamodb::types::AttributeValue;
//! use dynobatch::{BatchGetRequest, ClientConfig, Coordinator, ReadRequest};
//!
//! let coordinator = Coordinator::connect(&ClientConfig::default())?;
//!
//! let key = HashMap::from([("id".to_string(), AttributeValue::S("42".to_string()))]);
//! let mut request = BatchGetRequest::new();
//! request.insert("User".to_string(), ReadRequest::new(vec![key]));
//!
//! let items = coordinator.batch_get_items(&request)?;
//! # Ok::<(), dynobatch::Error>(())
//! ```

pub mod backend;
pub mod batch_operations;
pub mod client;
pub mod config;
pub mod conversions;
pub mod coordinator;
pub mod errors;
pub mod logging;
pub mod table_operations;
pub mod types;

pub use backend::BatchBackend;
pub use batch_operations::{BatchSettings, batch_get, batch_write};
pub use client::DynamoClient;
pub use config::ClientConfig;
pub use coordinator::Coordinator;
pub use errors::{Error, Result};
pub use logging::init_logging;
pub use table_operations::{
    AttributeType, Capacity, CreateTableOutcome, GlobalSecondaryIndex, LocalSecondaryIndex,
    Projection, TableDefinition, Throughput, create_table,
};
pub use types::{
    BatchGetOutput, BatchGetRequest, BatchGetResponse, BatchWriteOutput, BatchWriteRequest, Item,
    ReadRequest, WriteOp,
};
