// src/mc/driver.rs
//! Parallel driver: a fixed-size worker pool created per pricing call,
//! splitting N simulations across W workers and aggregating their results.
//!
//! Scoped, not global (§5): `ThreadPoolBuilder::new().num_threads(w).build()`
//! constructs a pool owned entirely by one call to [`run_chunked`], which is
//! torn down (dropped) when the call returns. Each of the `w` chunks is
//! submitted as exactly one rayon task; `rayon`'s `Result`-collecting
//! `par_iter` short-circuits on the first `Err`, which is this engine's
//! cancel-on-first-failure policy (§4.7) — once one chunk task returns an
//! error, rayon stops handing out new work to the pool's idle threads, and
//! any chunk not yet started never runs. In-flight chunks still finish their
//! current path, matching §5's "in-flight workers may complete their current
//! path but no new path is started."

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::error::{EngineResult, PricingError};

/// Splits `n` items into `w` chunk sizes differing by at most 1, in
/// ascending order of worker index (earlier workers get the extra item when
/// `n` does not divide evenly).
pub fn chunk_sizes(n: usize, w: usize) -> Vec<usize> {
    let base = n / w;
    let remainder = n % w;
    (0..w)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Converts chunk sizes into `(start_index, count)` pairs over `0..n`.
pub fn chunk_ranges(n: usize, w: usize) -> Vec<(usize, usize)> {
    let sizes = chunk_sizes(n, w);
    let mut start = 0;
    sizes
        .into_iter()
        .map(|count| {
            let range = (start, count);
            start += count;
            range
        })
        .collect()
}

/// Runs `task` once per chunk of `n` items split across a scoped pool of `w`
/// threads, returning the per-chunk results in worker-index order.
///
/// `task` receives `(worker_index, start_index, count)` for its chunk.
/// Constructing the pool itself can fail (e.g. the OS refuses to spawn `w`
/// threads); this surfaces as [`PricingError::WorkerFailure`], matching any
/// in-task failure.
pub fn run_chunked<T, F>(n: usize, w: usize, task: F) -> EngineResult<Vec<T>>
where
    F: Fn(usize, usize, usize) -> EngineResult<T> + Sync,
    T: Send,
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(w)
        .build()
        .map_err(|e| PricingError::WorkerFailure {
            reason: format!("failed to build worker pool of size {}: {}", w, e),
        })?;

    let ranges = chunk_ranges(n, w);
    pool.install(|| {
        ranges
            .into_par_iter()
            .enumerate()
            .map(|(worker_index, (start, count))| task(worker_index, start, count))
            .collect::<EngineResult<Vec<T>>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_sizes_differ_by_at_most_one() {
        let sizes = chunk_sizes(10, 3);
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(sizes.iter().sum::<usize>(), 10);
    }

    #[test]
    fn chunk_sizes_handles_exact_division() {
        assert_eq!(chunk_sizes(9, 3), vec![3, 3, 3]);
    }

    #[test]
    fn chunk_sizes_handles_more_workers_than_items() {
        let sizes = chunk_sizes(2, 5);
        assert_eq!(sizes, vec![1, 1, 0, 0, 0]);
        assert_eq!(sizes.iter().sum::<usize>(), 2);
    }

    #[test]
    fn chunk_ranges_cover_zero_to_n_without_overlap() {
        let ranges = chunk_ranges(10, 3);
        assert_eq!(ranges, vec![(0, 4), (4, 3), (7, 3)]);
    }

    #[test]
    fn run_chunked_aggregates_all_chunk_results() {
        let result = run_chunked(100, 4, |_worker, start, count| Ok(start + count)).unwrap();
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn run_chunked_propagates_first_failure() {
        let result: EngineResult<Vec<()>> = run_chunked(10, 4, |worker, _start, _count| {
            if worker == 2 {
                Err(PricingError::WorkerFailure {
                    reason: "synthetic failure".to_string(),
                })
            } else {
                Ok(())
            }
        });
        assert!(result.is_err());
    }
}
