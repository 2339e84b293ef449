//! Candidate-range partitioning for the thread backend.

use std::ops::Range;

/// Split `0..n` into `workers` contiguous, non-overlapping ranges that
/// cover every index exactly once. Sizes differ by at most one: the
/// first `n % workers` ranges take one extra element.
pub fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = n / workers;
    let extra = n % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let len = base + usize::from(i < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}
