//! Thread backend: sequential oracle evaluation per worker range.

use std::ops::Range;

use crate::error::Result;
use crate::oracle;
use crate::search::{ExecutionBackend, SearchJob, SearchState};

/// CPU-parallel backend. The coordinator spawns one worker per
/// partition; each worker walks its range in original order, checking
/// the cancellation flag before every candidate.
pub struct ThreadBackend {
    workers: usize,
}

impl ThreadBackend {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl ExecutionBackend for ThreadBackend {
    fn name(&self) -> &'static str {
        "thread"
    }

    fn partition_hint(&self) -> Option<usize> {
        Some(self.workers)
    }

    fn evaluate_range(
        &self,
        job: &SearchJob<'_>,
        range: Range<usize>,
        state: &SearchState,
    ) -> Result<Option<usize>> {
        for index in range {
            if state.cancelled() {
                return Ok(None);
            }
            state.record_attempt();
            if oracle::verify(&job.candidates[index], job.target) {
                state.record_match(index);
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}
