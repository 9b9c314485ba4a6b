mod algorithms;
mod budget;
mod config;
mod error;
mod spawn;

use std::cmp::Ordering;

pub use algorithms::parallel_quick_sort::ParallelQuickSort;
pub use budget::{SortStats, ThreadBudget};
pub use config::{BudgetPolicy, DEFAULT_SMALL_THRESHOLD, SortConfig};
pub use error::{SortError, SortResult};
pub use spawn::{Spawn, ThreadSpawner};

/// Sorts `data` with at most `max_threads` spawned workers (`0` stays on the calling thread).
pub fn sort<T>(data: &mut [T], max_threads: usize) -> SortResult<SortStats>
where
    T: Ord + Send,
{
    ParallelQuickSort::new(SortConfig::new(max_threads), T::cmp).sort(data)
}

pub fn sort_by<T, F>(data: &mut [T], max_threads: usize, compare: F) -> SortResult<SortStats>
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    ParallelQuickSort::new(SortConfig::new(max_threads), compare).sort(data)
}

/// The small-range sorter on its own. Stable, quadratic.
pub fn insertion_sort_by<T, F>(data: &mut [T], compare: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    algorithms::common::insertion_sort_by(data, &compare);
}
