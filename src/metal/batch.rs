//! Batch-compute execution backend built on [`GpuOracle`].

use std::ops::Range;

use super::gpu::GpuOracle;
use crate::error::Result;
use crate::search::{ExecutionBackend, SearchJob, SearchState};

/// GPU backend. The coordinator hands it the whole candidate set in one
/// call; internally it dispatches device-sized batches in index order.
/// Within a batch the lowest matching lane wins, and batches run in
/// order, so the reported match is the lowest-index match overall.
pub struct BatchComputeBackend {
    oracle: GpuOracle,
}

impl BatchComputeBackend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            oracle: GpuOracle::new()?,
        })
    }

    pub fn max_batch_size(&self) -> usize {
        self.oracle.max_batch_size()
    }
}

impl ExecutionBackend for BatchComputeBackend {
    fn name(&self) -> &'static str {
        "batch-compute"
    }

    fn partition_hint(&self) -> Option<usize> {
        None
    }

    fn evaluate_range(
        &self,
        job: &SearchJob<'_>,
        range: Range<usize>,
        state: &SearchState,
    ) -> Result<Option<usize>> {
        let max_batch = self.oracle.max_batch_size();
        let mut start = range.start;

        while start < range.end {
            // Batch-granular cancellation: a dispatched batch always runs
            // to completion, the flag only stops the next one.
            if state.cancelled() {
                return Ok(None);
            }

            let end = range.end.min(start + max_batch);
            let batch = &job.candidates[start..end];

            let lane = self.oracle.dispatch(job.target, batch)?;
            state.record_attempts(batch.len() as u64);

            if let Some(lane) = lane {
                let index = start + lane;
                state.record_match(index);
                return Ok(Some(index));
            }

            start = end;
        }

        Ok(None)
    }
}
