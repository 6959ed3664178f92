//! Create table operation.

use tracing::info;

use super::TableDefinition;
use crate::backend::BatchBackend;
use crate::errors::Result;

/// What `create_table` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateTableOutcome {
    Created,
    /// The service reported `ResourceInUseException`.
    AlreadyExists,
}

/// Create a table, treating "already exists" as success.
///
/// The definition is validated first; an invalid one never reaches the
/// service. Any other service error is returned with its original code and
/// message.
pub fn create_table<B>(backend: &B, definition: &TableDefinition) -> Result<CreateTableOutcome>
where
    B: BatchBackend + ?Sized,
{
    definition.validate()?;

    match backend.create_table(definition) {
        Ok(()) => {
            info!(table = %definition.table_name, "created table");
            Ok(CreateTableOutcome::Created)
        }
        Err(e) if e.is_already_exists() => {
            info!(table = %definition.table_name, "table already exists");
            Ok(CreateTableOutcome::AlreadyExists)
        }
        Err(e) => Err(e),
    }
}
