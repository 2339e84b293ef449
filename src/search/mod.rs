//! Search coordinator
//!
//! Owns the per-run shared state (cancellation flag, attempt counter,
//! first-writer-wins match slot) and drives candidate evaluation through
//! an execution backend. The coordinator knows nothing about a backend
//! beyond the [`ExecutionBackend`] contract; in particular it does not
//! know whether cancellation is candidate-granular (threads) or only
//! batch-granular (GPU offload).

pub mod partition;
pub mod thread;

use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::token::CrackTarget;

/// Sentinel for "no match recorded" in the shared found slot.
const NO_MATCH: usize = usize::MAX;

/// Read-only inputs shared by every worker for one run.
pub struct SearchJob<'a> {
    pub candidates: &'a [Vec<u8>],
    pub target: &'a CrackTarget,
}

/// Shared mutable state for one run. Atomics only, no locks: the flag is
/// write-once, the counter is increment-only, the found slot is a single
/// compare-exchange.
pub struct SearchState {
    cancel: AtomicBool,
    attempts: AtomicU64,
    found: AtomicUsize,
}

impl SearchState {
    fn new() -> Self {
        Self {
            cancel: AtomicBool::new(false),
            attempts: AtomicU64::new(0),
            found: AtomicUsize::new(NO_MATCH),
        }
    }

    /// Workers check this before starting each candidate (or each batch).
    pub fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_attempts(&self, n: u64) {
        self.attempts.fetch_add(n, Ordering::Relaxed);
    }

    /// Record a match and cancel the run. First writer wins; a later
    /// match against an already-set slot is discarded.
    pub fn record_match(&self, index: usize) {
        let _ = self
            .found
            .compare_exchange(NO_MATCH, index, Ordering::SeqCst, Ordering::SeqCst);
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Attempts so far; a lower bound while workers are still running.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    fn match_index(&self) -> Option<usize> {
        match self.found.load(Ordering::SeqCst) {
            NO_MATCH => None,
            index => Some(index),
        }
    }
}

/// Contract shared by the thread and batch-compute backends.
///
/// `evaluate_range` tests `job.candidates[range]` in index order against
/// the target, observing `state` for cancellation and attempt counting,
/// and records any match through [`SearchState::record_match`] so that
/// other workers stop promptly. The returned index is global.
pub trait ExecutionBackend: Sync {
    /// Backend name for diagnostics and reporting.
    fn name(&self) -> &'static str;

    /// `Some(n)`: the coordinator partitions the candidate set into `n`
    /// ranges and drives one worker thread per range. `None`: the backend
    /// consumes the whole set in a single call on the coordinator's
    /// thread (batch offload with its own internal batching).
    fn partition_hint(&self) -> Option<usize>;

    fn evaluate_range(
        &self,
        job: &SearchJob<'_>,
        range: Range<usize>,
        state: &SearchState,
    ) -> Result<Option<usize>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Found { secret: String, index: usize },
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub verdict: Verdict,
    /// Lower bound when cancellation cut the run short.
    pub attempts: u64,
    pub elapsed: Duration,
}

/// Run one search: partition the candidates, drive the backend, join all
/// workers, aggregate the outcome.
pub fn search(
    candidates: &[Vec<u8>],
    target: &CrackTarget,
    backend: &dyn ExecutionBackend,
) -> Result<SearchOutcome> {
    if candidates.is_empty() {
        return Err(Error::EmptyCandidateSet);
    }

    let job = SearchJob { candidates, target };
    let state = SearchState::new();
    let started = Instant::now();

    match backend.partition_hint() {
        Some(workers) => {
            let ranges = partition::partition(candidates.len(), workers);
            std::thread::scope(|scope| -> Result<()> {
                let mut handles = Vec::with_capacity(ranges.len());
                for range in ranges {
                    let job = &job;
                    let state = &state;
                    handles.push(scope.spawn(move || backend.evaluate_range(job, range, state)));
                }
                for handle in handles {
                    let result = match handle.join() {
                        Ok(result) => result,
                        Err(payload) => std::panic::resume_unwind(payload),
                    };
                    if let Some(index) = result? {
                        state.record_match(index);
                    }
                }
                Ok(())
            })?;
        }
        None => {
            if let Some(index) = backend.evaluate_range(&job, 0..candidates.len(), &state)? {
                state.record_match(index);
            }
        }
    }

    let verdict = match state.match_index() {
        Some(index) => Verdict::Found {
            secret: String::from_utf8_lossy(&candidates[index]).into_owned(),
            index,
        },
        None => Verdict::Exhausted,
    };

    Ok(SearchOutcome {
        verdict,
        attempts: state.attempts(),
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_match_first_writer_wins() {
        let state = SearchState::new();
        state.record_match(7);
        state.record_match(2);
        assert_eq!(state.match_index(), Some(7));
        assert!(state.cancelled());
    }

    #[test]
    fn test_attempts_accumulate() {
        let state = SearchState::new();
        state.record_attempt();
        state.record_attempts(41);
        assert_eq!(state.attempts(), 42);
    }
}
