//! Table definitions.
//!
//! A [`TableDefinition`] carries everything `CreateTable` needs. It can be
//! built in code or deserialized from JSON, and is validated locally before
//! any call goes out.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::index::{GlobalSecondaryIndex, LocalSecondaryIndex};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    #[serde(rename = "S")]
    String,
    #[serde(rename = "N")]
    Number,
    #[serde(rename = "B")]
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Hash,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub attribute_name: String,
    pub attribute_type: AttributeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub key_type: KeyType,
}

impl KeySchemaElement {
    pub fn new(attribute_name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            key_type,
        }
    }
}

/// Read/write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl Capacity {
    pub fn new(read_capacity_units: i64, write_capacity_units: i64) -> Self {
        Self {
            read_capacity_units,
            write_capacity_units,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "billing_mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Throughput {
    Provisioned(Capacity),
    PayPerRequest,
}

impl Default for Throughput {
    fn default() -> Self {
        Throughput::Provisioned(Capacity::new(1, 1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub table_name: String,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub key_schema: Vec<KeySchemaElement>,
    #[serde(default)]
    pub global_secondary_indexes: Vec<GlobalSecondaryIndex>,
    #[serde(default)]
    pub local_secondary_indexes: Vec<LocalSecondaryIndex>,
    #[serde(default)]
    pub throughput: Throughput,
}

impl TableDefinition {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            attribute_definitions: Vec::new(),
            key_schema: Vec::new(),
            global_secondary_indexes: Vec::new(),
            local_secondary_indexes: Vec::new(),
            throughput: Throughput::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidTableDefinition(format!("bad JSON: {}", e)))
    }

    pub fn attribute(mut self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        self.attribute_definitions.push(AttributeDefinition {
            attribute_name: name.into(),
            attribute_type,
        });
        self
    }

    pub fn hash_key(mut self, attribute: impl Into<String>) -> Self {
        self.key_schema.push(KeySchemaElement::new(attribute, KeyType::Hash));
        self
    }

    pub fn range_key(mut self, attribute: impl Into<String>) -> Self {
        self.key_schema.push(KeySchemaElement::new(attribute, KeyType::Range));
        self
    }

    pub fn global_index(mut self, index: GlobalSecondaryIndex) -> Self {
        self.global_secondary_indexes.push(index);
        self
    }

    pub fn local_index(mut self, index: LocalSecondaryIndex) -> Self {
        self.local_secondary_indexes.push(index);
        self
    }

    pub fn throughput(mut self, throughput: Throughput) -> Self {
        self.throughput = throughput;
        self
    }

    /// Capacity for a GSI: its own, or the table's when provisioned.
    pub fn index_capacity(&self, index: &GlobalSecondaryIndex) -> Option<Capacity> {
        match self.throughput {
            Throughput::Provisioned(table) => Some(index.provisioned_throughput.unwrap_or(table)),
            Throughput::PayPerRequest => None,
        }
    }

    /// Check the definition the way DynamoDB would, without a round trip.
    pub fn validate(&self) -> Result<()> {
        if self.table_name.trim().is_empty() {
            return Err(invalid("table name is empty"));
        }

        let mut declared = HashSet::new();
        for attr in &self.attribute_definitions {
            if !declared.insert(attr.attribute_name.as_str()) {
                return Err(invalid(format!(
                    "attribute '{}' is defined twice",
                    attr.attribute_name
                )));
            }
        }

        let mut used = HashSet::new();
        check_key_schema("table", &self.key_schema, &declared, &mut used)?;

        let table_hash = &self.key_schema[0].attribute_name;
        let mut index_names = HashSet::new();

        for gsi in &self.global_secondary_indexes {
            if !index_names.insert(gsi.index_name.as_str()) {
                return Err(invalid(format!("index '{}' is defined twice", gsi.index_name)));
            }
            check_key_schema(&gsi.index_name, &gsi.key_schema, &declared, &mut used)?;
            if gsi.provisioned_throughput.is_some()
                && matches!(self.throughput, Throughput::PayPerRequest)
            {
                return Err(invalid(format!(
                    "index '{}' sets throughput on a PAY_PER_REQUEST table",
                    gsi.index_name
                )));
            }
        }

        for lsi in &self.local_secondary_indexes {
            if !index_names.insert(lsi.index_name.as_str()) {
                return Err(invalid(format!("index '{}' is defined twice", lsi.index_name)));
            }
            check_key_schema(&lsi.index_name, &lsi.key_schema, &declared, &mut used)?;
            if &lsi.key_schema[0].attribute_name != table_hash || lsi.key_schema.len() != 2 {
                return Err(invalid(format!(
                    "local index '{}' needs the table hash key '{}' and a range key",
                    lsi.index_name, table_hash
                )));
            }
        }

        if let Some(unused) = declared.iter().find(|name| !used.contains(*name)) {
            return Err(invalid(format!(
                "attribute '{}' is defined but not used in any key schema",
                unused
            )));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidTableDefinition(msg.into())
}

/// One HASH key first, then at most one RANGE key, all declared.
fn check_key_schema<'a>(
    owner: &str,
    schema: &'a [KeySchemaElement],
    declared: &HashSet<&str>,
    used: &mut HashSet<&'a str>,
) -> Result<()> {
    match schema {
        [hash] if hash.key_type == KeyType::Hash => {}
        [hash, range] if hash.key_type == KeyType::Hash && range.key_type == KeyType::Range => {}
        _ => {
            return Err(invalid(format!(
                "{}: key schema must be a HASH key optionally followed by a RANGE key",
                owner
            )));
        }
    }

    for element in schema {
        if !declared.contains(element.attribute_name.as_str()) {
            return Err(invalid(format!(
                "{}: key attribute '{}' has no attribute definition",
                owner, element.attribute_name
            )));
        }
        used.insert(element.attribute_name.as_str());
    }
    Ok(())
}
