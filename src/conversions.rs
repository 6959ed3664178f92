//! Type conversions between the request model and AWS SDK types.

use aws_sdk_dynamodb::operation::batch_get_item::BatchGetItemOutput;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemOutput;
use aws_sdk_dynamodb::types as sdk;
use std::collections::HashMap;

use crate::errors::{Error, Result};
use crate::table_operations::{
    AttributeType, Capacity, GlobalSecondaryIndex, KeySchemaElement, KeyType,
    LocalSecondaryIndex, Projection, TableDefinition, Throughput,
};
use crate::types::{
    BatchGetOutput, BatchGetRequest, BatchWriteOutput, BatchWriteRequest, ReadRequest, WriteOp,
};

fn build_err(what: &str, e: impl std::fmt::Display) -> Error {
    Error::Build(format!("{}: {}", what, e))
}

// ========== BATCH GET ==========

/// Convert a batch get request into `RequestItems`.
pub fn to_sdk_request_items(
    request: &BatchGetRequest,
) -> Result<HashMap<String, sdk::KeysAndAttributes>> {
    request
        .iter()
        .map(|(table, read)| -> Result<_> {
            let keys_and_attributes = sdk::KeysAndAttributes::builder()
                .set_keys(Some(read.keys.clone()))
                .consistent_read(read.consistent_read)
                .set_projection_expression(read.projection_expression.clone())
                .set_expression_attribute_names(read.expression_attribute_names.clone())
                .build()
                .map_err(|e| build_err("keys and attributes", e))?;
            Ok((table.clone(), keys_and_attributes))
        })
        .collect()
}

fn from_sdk_keys_and_attributes(kaa: sdk::KeysAndAttributes) -> ReadRequest {
    ReadRequest {
        keys: kaa.keys,
        consistent_read: kaa.consistent_read.unwrap_or(false),
        projection_expression: kaa.projection_expression,
        expression_attribute_names: kaa.expression_attribute_names,
    }
}

pub fn from_sdk_batch_get_output(output: BatchGetItemOutput) -> BatchGetOutput {
    BatchGetOutput {
        responses: output.responses.unwrap_or_default().into_iter().collect(),
        unprocessed_keys: output
            .unprocessed_keys
            .unwrap_or_default()
            .into_iter()
            .map(|(table, kaa)| (table, from_sdk_keys_and_attributes(kaa)))
            .collect(),
    }
}

// ========== BATCH WRITE ==========

fn to_sdk_write_request(op: &WriteOp) -> Result<sdk::WriteRequest> {
    match op {
        WriteOp::Put { item } => {
            let put_request = sdk::PutRequest::builder()
                .set_item(Some(item.clone()))
                .build()
                .map_err(|e| build_err("put request", e))?;
            Ok(sdk::WriteRequest::builder().put_request(put_request).build())
        }
        WriteOp::Delete { key } => {
            let delete_request = sdk::DeleteRequest::builder()
                .set_key(Some(key.clone()))
                .build()
                .map_err(|e| build_err("delete request", e))?;
            Ok(sdk::WriteRequest::builder()
                .delete_request(delete_request)
                .build())
        }
    }
}

/// Convert a batch write request into `RequestItems`.
pub fn to_sdk_write_items(
    request: &BatchWriteRequest,
) -> Result<HashMap<String, Vec<sdk::WriteRequest>>> {
    request
        .iter()
        .map(|(table, ops)| -> Result<_> {
            let requests = ops
                .iter()
                .map(to_sdk_write_request)
                .collect::<Result<Vec<_>>>()?;
            Ok((table.clone(), requests))
        })
        .collect()
}

fn from_sdk_write_request(request: sdk::WriteRequest) -> Result<WriteOp> {
    match (request.put_request, request.delete_request) {
        (Some(put), _) => Ok(WriteOp::Put { item: put.item }),
        (None, Some(delete)) => Ok(WriteOp::Delete { key: delete.key }),
        (None, None) => Err(Error::Request(
            "unprocessed write request has neither a put nor a delete".to_string(),
        )),
    }
}

pub fn from_sdk_batch_write_output(output: BatchWriteItemOutput) -> Result<BatchWriteOutput> {
    let unprocessed_items: BatchWriteRequest = output
        .unprocessed_items
        .unwrap_or_default()
        .into_iter()
        .map(|(table, requests)| -> Result<_> {
            let ops = requests
                .into_iter()
                .map(from_sdk_write_request)
                .collect::<Result<Vec<_>>>()?;
            Ok((table, ops))
        })
        .collect::<Result<_>>()?;
    Ok(BatchWriteOutput { unprocessed_items })
}

// ========== CREATE TABLE ==========

/// The pieces of a `CreateTable` call.
#[derive(Debug, Clone)]
pub struct CreateTableParts {
    pub table_name: String,
    pub attribute_definitions: Vec<sdk::AttributeDefinition>,
    pub key_schema: Vec<sdk::KeySchemaElement>,
    pub global_secondary_indexes: Option<Vec<sdk::GlobalSecondaryIndex>>,
    pub local_secondary_indexes: Option<Vec<sdk::LocalSecondaryIndex>>,
    pub provisioned_throughput: Option<sdk::ProvisionedThroughput>,
    pub billing_mode: sdk::BillingMode,
}

fn to_sdk_key_schema(schema: &[KeySchemaElement]) -> Result<Vec<sdk::KeySchemaElement>> {
    schema
        .iter()
        .map(|element| {
            let key_type = match element.key_type {
                KeyType::Hash => sdk::KeyType::Hash,
                KeyType::Range => sdk::KeyType::Range,
            };
            sdk::KeySchemaElement::builder()
                .attribute_name(&element.attribute_name)
                .key_type(key_type)
                .build()
                .map_err(|e| build_err("key schema", e))
        })
        .collect()
}

fn to_sdk_projection(projection: &Projection) -> sdk::Projection {
    match projection {
        Projection::All => sdk::Projection::builder()
            .projection_type(sdk::ProjectionType::All)
            .build(),
        Projection::KeysOnly => sdk::Projection::builder()
            .projection_type(sdk::ProjectionType::KeysOnly)
            .build(),
        Projection::Include { non_key_attributes } => sdk::Projection::builder()
            .projection_type(sdk::ProjectionType::Include)
            .set_non_key_attributes(Some(non_key_attributes.clone()))
            .build(),
    }
}

fn to_sdk_throughput(capacity: Capacity) -> Result<sdk::ProvisionedThroughput> {
    sdk::ProvisionedThroughput::builder()
        .read_capacity_units(capacity.read_capacity_units)
        .write_capacity_units(capacity.write_capacity_units)
        .build()
        .map_err(|e| build_err("provisioned throughput", e))
}

fn to_sdk_gsi(
    definition: &TableDefinition,
    gsi: &GlobalSecondaryIndex,
) -> Result<sdk::GlobalSecondaryIndex> {
    let throughput = definition
        .index_capacity(gsi)
        .map(to_sdk_throughput)
        .transpose()?;
    sdk::GlobalSecondaryIndex::builder()
        .index_name(&gsi.index_name)
        .set_key_schema(Some(to_sdk_key_schema(&gsi.key_schema)?))
        .projection(to_sdk_projection(&gsi.projection))
        .set_provisioned_throughput(throughput)
        .build()
        .map_err(|e| build_err("global secondary index", e))
}

fn to_sdk_lsi(lsi: &LocalSecondaryIndex) -> Result<sdk::LocalSecondaryIndex> {
    sdk::LocalSecondaryIndex::builder()
        .index_name(&lsi.index_name)
        .set_key_schema(Some(to_sdk_key_schema(&lsi.key_schema)?))
        .projection(to_sdk_projection(&lsi.projection))
        .build()
        .map_err(|e| build_err("local secondary index", e))
}

/// Translate a table definition into `CreateTable` parameters.
///
/// Empty index lists are left unset; DynamoDB rejects empty lists.
pub fn to_sdk_create_table(definition: &TableDefinition) -> Result<CreateTableParts> {
    let attribute_definitions = definition
        .attribute_definitions
        .iter()
        .map(|attr| {
            let attribute_type = match attr.attribute_type {
                AttributeType::String => sdk::ScalarAttributeType::S,
                AttributeType::Number => sdk::ScalarAttributeType::N,
                AttributeType::Binary => sdk::ScalarAttributeType::B,
            };
            sdk::AttributeDefinition::builder()
                .attribute_name(&attr.attribute_name)
                .attribute_type(attribute_type)
                .build()
                .map_err(|e| build_err("attribute definition", e))
        })
        .collect::<Result<Vec<_>>>()?;

    let global_secondary_indexes = if definition.global_secondary_indexes.is_empty() {
        None
    } else {
        Some(
            definition
                .global_secondary_indexes
                .iter()
                .map(|gsi| to_sdk_gsi(definition, gsi))
                .collect::<Result<Vec<_>>>()?,
        )
    };

    let local_secondary_indexes = if definition.local_secondary_indexes.is_empty() {
        None
    } else {
        Some(
            definition
                .local_secondary_indexes
                .iter()
                .map(to_sdk_lsi)
                .collect::<Result<Vec<_>>>()?,
        )
    };

    let (provisioned_throughput, billing_mode) = match definition.throughput {
        Throughput::Provisioned(capacity) => (
            Some(to_sdk_throughput(capacity)?),
            sdk::BillingMode::Provisioned,
        ),
        Throughput::PayPerRequest => (None, sdk::BillingMode::PayPerRequest),
    };

    Ok(CreateTableParts {
        table_name: definition.table_name.clone(),
        attribute_definitions,
        key_schema: to_sdk_key_schema(&definition.key_schema)?,
        global_secondary_indexes,
        local_secondary_indexes,
        provisioned_throughput,
        billing_mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;
    use aws_sdk_dynamodb::types::AttributeValue;

    fn key(id: &str) -> Item {
        HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
    }

    #[test]
    fn test_request_items_carry_read_flags() {
        let mut request = BatchGetRequest::new();
        request.insert(
            "User".to_string(),
            ReadRequest::new(vec![key("1"), key("2")]).consistent(true),
        );

        let items = to_sdk_request_items(&request).unwrap();
        let user = &items["User"];
        assert_eq!(user.keys, vec![key("1"), key("2")]);
        assert_eq!(user.consistent_read, Some(true));
        assert_eq!(user.projection_expression, None);
    }

    #[test]
    fn test_unprocessed_keys_round_back_into_request() {
        let kaa = sdk::KeysAndAttributes::builder()
            .keys(key("1"))
            .consistent_read(false)
            .build()
            .unwrap();
        let output = BatchGetItemOutput::builder()
            .responses("User", vec![key("2")])
            .unprocessed_keys("User", kaa)
            .build();

        let output = from_sdk_batch_get_output(output);
        assert_eq!(output.responses["User"], vec![key("2")]);
        assert_eq!(output.unprocessed_keys["User"], ReadRequest::new(vec![key("1")]));
    }

    #[test]
    fn test_write_items_keep_op_order() {
        let mut request = BatchWriteRequest::new();
        request.insert(
            "User".to_string(),
            vec![WriteOp::put(key("1")), WriteOp::delete(key("2"))],
        );

        let items = to_sdk_write_items(&request).unwrap();
        let user = &items["User"];
        assert_eq!(user.len(), 2);
        assert!(user[0].put_request.is_some());
        assert!(user[1].delete_request.is_some());
    }

    #[test]
    fn test_unprocessed_items_convert_back() {
        let put = sdk::WriteRequest::builder()
            .put_request(
                sdk::PutRequest::builder()
                    .set_item(Some(key("1")))
                    .build()
                    .unwrap(),
            )
            .build();
        let output = BatchWriteItemOutput::builder()
            .unprocessed_items("User", vec![put])
            .build();

        let output = from_sdk_batch_write_output(output).unwrap();
        assert_eq!(output.unprocessed_items["User"], vec![WriteOp::put(key("1"))]);
    }

    #[test]
    fn test_empty_write_request_is_an_error() {
        let output = BatchWriteItemOutput::builder()
            .unprocessed_items("User", vec![sdk::WriteRequest::builder().build()])
            .build();
        assert!(matches!(
            from_sdk_batch_write_output(output),
            Err(Error::Request(_))
        ));
    }

    #[test]
    fn test_create_table_parts_for_user_table() {
        let definition = TableDefinition::new("User")
            .attribute("id", AttributeType::String)
            .attribute("email", AttributeType::String)
            .hash_key("id")
            .global_index(GlobalSecondaryIndex::new("by_email").hash_key("email"));

        let parts = to_sdk_create_table(&definition).unwrap();
        assert_eq!(parts.table_name, "User");
        assert_eq!(parts.attribute_definitions.len(), 2);
        assert_eq!(parts.attribute_definitions[1].attribute_name, "email");
        assert_eq!(parts.attribute_definitions[1].attribute_type, sdk::ScalarAttributeType::S);
        assert_eq!(parts.key_schema[0].attribute_name, "id");
        assert_eq!(parts.key_schema[0].key_type, sdk::KeyType::Hash);
        assert_eq!(parts.billing_mode, sdk::BillingMode::Provisioned);

        let throughput = parts.provisioned_throughput.unwrap();
        assert_eq!(throughput.read_capacity_units, 1);
        assert_eq!(throughput.write_capacity_units, 1);

        let gsis = parts.global_secondary_indexes.unwrap();
        assert_eq!(gsis.len(), 1);
        assert_eq!(gsis[0].index_name, "by_email");
        assert_eq!(gsis[0].key_schema[0].attribute_name, "email");
        assert_eq!(
            gsis[0].projection.as_ref().and_then(|p| p.projection_type.clone()),
            Some(sdk::ProjectionType::All)
        );
        assert_eq!(
            gsis[0]
                .provisioned_throughput
                .as_ref()
                .map(|t| t.read_capacity_units),
            Some(1)
        );
        assert!(parts.local_secondary_indexes.is_none());
    }

    #[test]
    fn test_on_demand_table_has_no_throughput() {
        let definition = TableDefinition::new("Events")
            .attribute("pk", AttributeType::String)
            .hash_key("pk")
            .throughput(Throughput::PayPerRequest);

        let parts = to_sdk_create_table(&definition).unwrap();
        assert!(parts.provisioned_throughput.is_none());
        assert_eq!(parts.billing_mode, sdk::BillingMode::PayPerRequest);
        assert!(parts.global_secondary_indexes.is_none());
    }
}
