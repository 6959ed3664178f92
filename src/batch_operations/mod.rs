//! Batch operations module for DynamoDB.
//!
//! This module provides batch operations:
//! - `batch_get` - Read keys from one or more tables
//! - `batch_write` - Put and delete items across one or more tables
//!
//! Both split requests into chunks that respect the batch size and resubmit
//! unprocessed keys/items until the service has handled all of them.

mod get;
mod write;

pub use get::batch_get;
pub use write::batch_write;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::errors::{Error, Result};

/// Maximum keys per batch get request (DynamoDB limit).
pub const BATCH_GET_MAX_ITEMS: usize = 100;

/// Maximum items per batch write request (DynamoDB limit).
pub const BATCH_WRITE_MAX_ITEMS: usize = 25;

/// How batches are sized and how unprocessed items are retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Items per call. `None` uses the DynamoDB maximum for each operation.
    pub batch_size: Option<usize>,
    /// Resubmission rounds allowed per chunk. `None` retries until empty.
    pub max_unprocessed_retries: Option<u32>,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: None,
            max_unprocessed_retries: Some(10),
            initial_backoff_ms: 50,
            max_backoff_ms: 2_000,
        }
    }
}

impl BatchSettings {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_max_unprocessed_retries(mut self, retries: Option<u32>) -> Self {
        self.max_unprocessed_retries = retries;
        self
    }

    /// Disable sleeping between resubmissions.
    pub fn without_backoff(mut self) -> Self {
        self.initial_backoff_ms = 0;
        self.max_backoff_ms = 0;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == Some(0) {
            return Err(Error::InvalidConfig(
                "batch_size must be a positive integer".to_string(),
            ));
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(Error::InvalidConfig(format!(
                "initial_backoff_ms ({}) exceeds max_backoff_ms ({})",
                self.initial_backoff_ms, self.max_backoff_ms
            )));
        }
        Ok(())
    }

    /// Chunk size for an operation whose service limit is `provider_max`.
    ///
    /// An explicit `batch_size` is used as given; the limit is only the
    /// fallback when none is set.
    pub(crate) fn effective_batch_size(&self, provider_max: usize) -> Result<usize> {
        self.validate()?;
        Ok(self.batch_size.unwrap_or(provider_max))
    }

    /// Exponential backoff before resubmission round `attempt` (1-based).
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        let delay = self.initial_backoff_ms.saturating_mul(factor);
        Duration::from_millis(delay.min(self.max_backoff_ms))
    }

    /// Whether another resubmission round is allowed after `retries` rounds.
    pub(crate) fn may_retry(&self, retries: u32) -> bool {
        self.max_unprocessed_retries.is_none_or(|max| retries < max)
    }
}

/// Split grouped items into chunks of at most `batch_size` items.
///
/// Groups are walked in order and items keep their order, so concatenating
/// the chunks per group gives back the input.
pub(crate) fn split_into_chunks<'a, T, I>(groups: I, batch_size: usize) -> Vec<BTreeMap<String, Vec<T>>>
where
    T: Clone + 'a,
    I: IntoIterator<Item = (&'a String, &'a [T])>,
{
    let mut chunks = Vec::new();
    let mut current: BTreeMap<String, Vec<T>> = BTreeMap::new();
    let mut current_len = 0;

    for (name, items) in groups {
        for item in items {
            if current_len == batch_size {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.entry(name.clone()).or_default().push(item.clone());
            current_len += 1;
        }
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}
