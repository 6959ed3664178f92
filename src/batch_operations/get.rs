//! Batch get operations for DynamoDB.

use tracing::{debug, warn};

use super::{BATCH_GET_MAX_ITEMS, BatchSettings, split_into_chunks};
use crate::backend::BatchBackend;
use crate::errors::{Error, Result};
use crate::types::{BatchGetRequest, BatchGetResponse, key_count};

/// Batch get keys from one or more tables.
///
/// Handles:
/// - Splitting keys into chunks of at most the batch size, keeping each
///   table's read flags on every chunk
/// - Resubmitting unprocessed keys until none remain
///
/// Returned items are concatenated per table in call order. The first
/// remote error is returned as is.
pub fn batch_get<B>(
    backend: &B,
    request: &BatchGetRequest,
    settings: &BatchSettings,
) -> Result<BatchGetResponse>
where
    B: BatchBackend + ?Sized,
{
    let batch_size = settings.effective_batch_size(BATCH_GET_MAX_ITEMS)?;
    let mut responses = BatchGetResponse::new();

    let chunks = split_into_chunks(
        request.iter().map(|(table, read)| (table, read.keys.as_slice())),
        batch_size,
    );

    for chunk in chunks {
        let mut pending: BatchGetRequest = chunk
            .into_iter()
            .map(|(table, keys)| {
                let read = request[&table].with_keys(keys);
                (table, read)
            })
            .collect();
        let mut retries = 0;

        loop {
            debug!(
                tables = pending.len(),
                keys = key_count(&pending),
                "batch_get_item"
            );
            let output = backend.batch_get(&pending)?;

            for (table, items) in output.responses {
                responses.entry(table).or_default().extend(items);
            }

            let remaining = key_count(&output.unprocessed_keys);
            if remaining == 0 {
                break;
            }
            if !settings.may_retry(retries) {
                return Err(Error::UnprocessedRetriesExhausted {
                    operation: "batch_get",
                    remaining,
                    retries,
                });
            }

            retries += 1;
            warn!(remaining, retry = retries, "resubmitting unprocessed keys");
            let delay = settings.backoff(retries);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            pending = output
                .unprocessed_keys
                .into_iter()
                .filter(|(_, read)| !read.keys.is_empty())
                .collect();
        }
    }

    Ok(responses)
}
