//! Secondary index definitions.

use serde::{Deserialize, Serialize};

use super::definition::{Capacity, KeySchemaElement, KeyType};

/// Which attributes an index copies from the table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Projection {
    #[default]
    All,
    KeysOnly,
    Include { non_key_attributes: Vec<String> },
}

/// A global secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSecondaryIndex {
    pub index_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    #[serde(default)]
    pub projection: Projection,
    /// Only for provisioned tables. Defaults to the table's capacity.
    #[serde(default)]
    pub provisioned_throughput: Option<Capacity>,
}

impl GlobalSecondaryIndex {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            key_schema: Vec::new(),
            projection: Projection::All,
            provisioned_throughput: None,
        }
    }

    pub fn hash_key(mut self, attribute: impl Into<String>) -> Self {
        self.key_schema.push(KeySchemaElement::new(attribute, KeyType::Hash));
        self
    }

    pub fn range_key(mut self, attribute: impl Into<String>) -> Self {
        self.key_schema.push(KeySchemaElement::new(attribute, KeyType::Range));
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn throughput(mut self, capacity: Capacity) -> Self {
        self.provisioned_throughput = Some(capacity);
        self
    }
}

/// A local secondary index. Shares the table's hash key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSecondaryIndex {
    pub index_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    #[serde(default)]
    pub projection: Projection,
}

impl LocalSecondaryIndex {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            key_schema: Vec::new(),
            projection: Projection::All,
        }
    }

    pub fn hash_key(mut self, attribute: impl Into<String>) -> Self {
        self.key_schema.push(KeySchemaElement::new(attribute, KeyType::Hash));
        self
    }

    pub fn range_key(mut self, attribute: impl Into<String>) -> Self {
        self.key_schema.push(KeySchemaElement::new(attribute, KeyType::Range));
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}
