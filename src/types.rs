//! Request and response model for batch operations.
//!
//! Requests are grouped by collection (table name). Collections are kept in a
//! `BTreeMap` so chunking walks them in a stable order.

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::{BTreeMap, HashMap};

/// A DynamoDB item or key.
pub type Item = HashMap<String, AttributeValue>;

/// Keys to read from one collection, plus the read flags sent with them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadRequest {
    pub keys: Vec<Item>,
    pub consistent_read: bool,
    pub projection_expression: Option<String>,
    pub expression_attribute_names: Option<HashMap<String, String>>,
}

impl ReadRequest {
    pub fn new(keys: Vec<Item>) -> Self {
        Self {
            keys,
            ..Default::default()
        }
    }

    pub fn consistent(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }

    pub fn projection(mut self, expression: impl Into<String>) -> Self {
        self.projection_expression = Some(expression.into());
        self
    }

    /// Same flags, different keys.
    pub(crate) fn with_keys(&self, keys: Vec<Item>) -> Self {
        Self {
            keys,
            consistent_read: self.consistent_read,
            projection_expression: self.projection_expression.clone(),
            expression_attribute_names: self.expression_attribute_names.clone(),
        }
    }
}

/// A single write inside a batch write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Put { item: Item },
    Delete { key: Item },
}

impl WriteOp {
    pub fn put(item: Item) -> Self {
        WriteOp::Put { item }
    }

    pub fn delete(key: Item) -> Self {
        WriteOp::Delete { key }
    }
}

pub type BatchGetRequest = BTreeMap<String, ReadRequest>;

pub type BatchWriteRequest = BTreeMap<String, Vec<WriteOp>>;

/// Items returned per collection.
pub type BatchGetResponse = BTreeMap<String, Vec<Item>>;

/// Result of one remote batch-get call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchGetOutput {
    pub responses: BatchGetResponse,
    pub unprocessed_keys: BatchGetRequest,
}

/// Result of one remote batch-write call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchWriteOutput {
    pub unprocessed_items: BatchWriteRequest,
}

/// Number of keys across all collections.
pub fn key_count(request: &BatchGetRequest) -> usize {
    request.values().map(|r| r.keys.len()).sum()
}

/// Number of write operations across all collections.
pub fn write_count(request: &BatchWriteRequest) -> usize {
    request.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str) -> Item {
        HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
    }

    #[test]
    fn test_counts_span_collections() {
        let mut get = BatchGetRequest::new();
        get.insert("a".into(), ReadRequest::new(vec![key("1"), key("2")]));
        get.insert("b".into(), ReadRequest::new(vec![key("3")]));
        assert_eq!(key_count(&get), 3);

        let mut write = BatchWriteRequest::new();
        write.insert("a".into(), vec![WriteOp::put(key("1")), WriteOp::delete(key("2"))]);
        assert_eq!(write_count(&write), 2);
    }

    #[test]
    fn test_with_keys_keeps_flags() {
        let original = ReadRequest::new(vec![key("1")])
            .consistent(true)
            .projection("id");
        let copy = original.with_keys(vec![key("2")]);
        assert!(copy.consistent_read);
        assert_eq!(copy.projection_expression.as_deref(), Some("id"));
        assert_eq!(copy.keys, vec![key("2")]);
    }
}
