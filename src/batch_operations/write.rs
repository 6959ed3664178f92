//! Batch write operations for DynamoDB.

use tracing::{debug, warn};

use super::{BATCH_WRITE_MAX_ITEMS, BatchSettings, split_into_chunks};
use crate::backend::BatchBackend;
use crate::errors::{Error, Result};
use crate::types::{BatchWriteRequest, write_count};

/// Batch write items to one or more tables.
///
/// Handles:
/// - Splitting puts and deletes into chunks of at most the batch size
/// - Resubmitting unprocessed items until none remain
///
/// # Returns
///
/// Ok(()) once every chunk has been fully applied, or the first error.
pub fn batch_write<B>(
    backend: &B,
    request: &BatchWriteRequest,
    settings: &BatchSettings,
) -> Result<()>
where
    B: BatchBackend + ?Sized,
{
    let batch_size = settings.effective_batch_size(BATCH_WRITE_MAX_ITEMS)?;

    let chunks = split_into_chunks(
        request.iter().map(|(table, ops)| (table, ops.as_slice())),
        batch_size,
    );

    for chunk in chunks {
        let mut pending: BatchWriteRequest = chunk;
        let mut retries = 0;

        loop {
            debug!(
                tables = pending.len(),
                items = write_count(&pending),
                "batch_write_item"
            );
            let output = backend.batch_write(&pending)?;

            let remaining = write_count(&output.unprocessed_items);
            if remaining == 0 {
                break;
            }
            if !settings.may_retry(retries) {
                return Err(Error::UnprocessedRetriesExhausted {
                    operation: "batch_write",
                    remaining,
                    retries,
                });
            }

            retries += 1;
            warn!(remaining, retry = retries, "resubmitting unprocessed items");
            let delay = settings.backoff(retries);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            pending = output
                .unprocessed_items
                .into_iter()
                .filter(|(_, ops)| !ops.is_empty())
                .collect();
        }
    }

    Ok(())
}
