//! Splitting a 1-D index domain across a fixed set of workers.
//!
//! Every phase of the pipeline uses [`partition`] for every split (working
//! image rows, lattice rows, lattice columns) so that boundaries always agree.

use std::ops::Range;

/// Half-open range of `0..domain` owned by `worker_id` out of `worker_count`.
///
/// `start = floor(id * n / P)`, `end = min(floor((id + 1) * n / P), n)`. The
/// products are formed in 128-bit integers so the division is exact. The union
/// over all ids is exactly `0..domain` with no overlap; when
/// `worker_count > domain` some workers receive an empty range.
///
/// # Panics
/// If `worker_count` is zero.
#[inline]
pub fn partition(worker_id: usize, worker_count: usize, domain: usize) -> Range<usize> {
    assert!(worker_count > 0, "worker_count must be positive");
    let n = domain as u128;
    let p = worker_count as u128;
    let start = (worker_id as u128 * n / p).min(n) as usize;
    let end = ((worker_id as u128 + 1) * n / p).min(n) as usize;
    start..end.max(start)
}

/// Position of one worker within the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerIndex {
    pub id: usize,
    pub count: usize,
}

impl WorkerIndex {
    pub fn new(id: usize, count: usize) -> Self {
        debug_assert!(id < count, "worker {} out of pool of {}", id, count);
        Self { id, count }
    }

    /// This worker's share of `0..domain`.
    #[inline]
    pub fn partition(&self, domain: usize) -> Range<usize> {
        partition(self.id, self.count, domain)
    }

    /// Worker 0 takes care of cells that belong to no partition.
    #[inline]
    pub fn is_leader(&self) -> bool {
        self.id == 0
    }
}
