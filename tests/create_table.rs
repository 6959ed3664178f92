mod common;

use common::{Call, MockBackend, service_error};
use dynobatch::{
    AttributeType, BatchSettings, Coordinator, CreateTableOutcome, Error, GlobalSecondaryIndex,
    TableDefinition, create_table,
};

fn user_table() -> TableDefinition {
    TableDefinition::new("User")
        .attribute("id", AttributeType::String)
        .attribute("email", AttributeType::String)
        .hash_key("id")
        .global_index(GlobalSecondaryIndex::new("by_email").hash_key("email"))
}

#[test]
fn test_create_table() {
    let mock = MockBackend::new();

    let outcome = create_table(&mock, &user_table()).unwrap();

    assert_eq!(outcome, CreateTableOutcome::Created);
    assert_eq!(mock.calls(), vec![Call::CreateTable(user_table())]);
}

#[test]
fn test_create_raises_unknown() {
    let mock = MockBackend::new();
    mock.push_create(Err(service_error("FooError", "FooMessage")));

    let err = create_table(&mock, &user_table()).unwrap_err();

    assert_eq!(err.code(), Some("FooError"));
    assert_eq!(err.message(), Some("FooMessage"));
}

#[test]
fn test_create_already_exists() {
    let mock = MockBackend::new();
    mock.push_create(Err(service_error("ResourceInUseException", "FooMessage")));

    let outcome = create_table(&mock, &user_table()).unwrap();

    assert_eq!(outcome, CreateTableOutcome::AlreadyExists);
    assert_eq!(mock.call_count(), 1);
}

#[test]
fn test_create_non_service_error_propagates() {
    let mock = MockBackend::new();
    mock.push_create(Err(Error::Connection("connection refused".to_string())));

    let err = create_table(&mock, &user_table()).unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
}

#[test]
fn test_invalid_definition_never_calls_service() {
    let mock = MockBackend::new();
    let table = TableDefinition::new("User").hash_key("id");

    let err = create_table(&mock, &table).unwrap_err();

    assert!(matches!(err, Error::InvalidTableDefinition(_)));
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_coordinator_create_table_from_json() {
    let mock = MockBackend::new();
    mock.push_create(Err(service_error("ResourceInUseException", "Table exists")));
    let coordinator = Coordinator::new(&mock, BatchSettings::default()).unwrap();

    let table = TableDefinition::from_json_str(
        r#"{"table_name": "User",
            "attribute_definitions": [{"attribute_name": "id", "attribute_type": "S"}],
            "key_schema": [{"attribute_name": "id", "key_type": "HASH"}]}"#,
    )
    .unwrap();

    assert_eq!(
        coordinator.create_table(&table).unwrap(),
        CreateTableOutcome::AlreadyExists
    );
}
