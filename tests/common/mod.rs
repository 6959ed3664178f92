#![allow(dead_code)]

use aws_sdk_dynamodb::types::AttributeValue;
use dynobatch::{
    BatchBackend, BatchGetOutput, BatchGetRequest, BatchWriteOutput, BatchWriteRequest, Error,
    Item, Result, TableDefinition,
};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// One recorded call to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(BatchGetRequest),
    Write(BatchWriteRequest),
    CreateTable(TableDefinition),
}

/// Scripted backend: replays queued responses and records every call.
///
/// With nothing queued, gets return no items, writes process everything and
/// create-table succeeds.
#[derive(Default)]
pub struct MockBackend {
    calls: RefCell<Vec<Call>>,
    get_responses: RefCell<VecDeque<Result<BatchGetOutput>>>,
    write_responses: RefCell<VecDeque<Result<BatchWriteOutput>>>,
    create_responses: RefCell<VecDeque<Result<()>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_get(&self, response: Result<BatchGetOutput>) -> &Self {
        self.get_responses.borrow_mut().push_back(response);
        self
    }

    pub fn push_write(&self, response: Result<BatchWriteOutput>) -> &Self {
        self.write_responses.borrow_mut().push_back(response);
        self
    }

    pub fn push_create(&self, response: Result<()>) -> &Self {
        self.create_responses.borrow_mut().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn get_calls(&self) -> Vec<BatchGetRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Get(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn write_calls(&self) -> Vec<BatchWriteRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Write(r) => Some(r),
                _ => None,
            })
            .collect()
    }
}

impl BatchBackend for MockBackend {
    fn batch_get(&self, request: &BatchGetRequest) -> Result<BatchGetOutput> {
        self.calls.borrow_mut().push(Call::Get(request.clone()));
        self.get_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(BatchGetOutput::default()))
    }

    fn batch_write(&self, request: &BatchWriteRequest) -> Result<BatchWriteOutput> {
        self.calls.borrow_mut().push(Call::Write(request.clone()));
        self.write_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(BatchWriteOutput::default()))
    }

    fn create_table(&self, definition: &TableDefinition) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::CreateTable(definition.clone()));
        self.create_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn key(id: &str) -> Item {
    HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
}

pub fn user(id: &str, age: u32) -> Item {
    HashMap::from([
        ("id".to_string(), AttributeValue::S(id.to_string())),
        ("age".to_string(), AttributeValue::N(age.to_string())),
    ])
}

pub fn service_error(code: &str, message: &str) -> Error {
    Error::service(code, message)
}
