use std::cmp::Ordering;
use std::sync::mpsc;
use std::thread::{self, Scope, ScopedJoinHandle};

use log::{debug, trace, warn};

use crate::budget::{SortStats, ThreadBudget};
use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use crate::spawn::{Spawn, ThreadSpawner};

use super::common;

/// Recursive quicksort that hands sub-ranges to worker threads while a
/// [`ThreadBudget`] allows it and recurses on the current thread otherwise.
///
/// Ranges with `len - 1 <= small_threshold` are finished by insertion sort, and
/// ranges still unsorted after `2.5 * log2(n)` partition levels by heap sort.
/// Every call joins the workers it spawned before returning, so a returned
/// slice is fully sorted and no worker still touches it.
#[derive(Debug)]
pub struct ParallelQuickSort<F, S = ThreadSpawner> {
    config: SortConfig,
    compare: F,
    spawner: S,
}

enum Task<'scope> {
    Spawned(ScopedJoinHandle<'scope, SortResult<()>>),
    Inline(SortResult<()>),
}

impl<F> ParallelQuickSort<F> {
    pub fn new(config: SortConfig, compare: F) -> Self {
        Self {
            config,
            compare,
            spawner: ThreadSpawner::new(config.stack_size),
        }
    }
}

impl<F, S> ParallelQuickSort<F, S> {
    pub fn with_spawner<S2: Spawn>(self, spawner: S2) -> ParallelQuickSort<F, S2> {
        ParallelQuickSort {
            config: self.config,
            compare: self.compare,
            spawner,
        }
    }

    #[inline]
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    #[inline]
    pub fn spawner(&self) -> &S {
        &self.spawner
    }
}

impl<F, S: Spawn> ParallelQuickSort<F, S> {
    /// Sorts `data` in place. The thread budget is fresh for every call.
    pub fn sort<T>(&self, data: &mut [T]) -> SortResult<SortStats>
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        let budget = ThreadBudget::new(self.config.max_threads, self.config.policy);
        let depth_limit = common::depth_limit(data.len());
        self.sort_range(data, &budget, depth_limit)?;
        debug_assert!(common::is_sorted_by(data, &self.compare));

        let stats = budget.stats()?;
        debug!(
            "sorted {} elements with max_threads={} ({:?}): spawned={} inline={} spawn_failures={} peak_live={}",
            data.len(),
            budget.max(),
            budget.policy(),
            stats.spawned,
            stats.inline,
            stats.spawn_failures,
            stats.peak_live,
        );
        Ok(stats)
    }

    pub fn sort_prefix<T>(&self, data: &mut [T], count: usize) -> SortResult<SortStats>
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        let len = data.len();
        let prefix = data
            .get_mut(..count)
            .ok_or(SortError::CountOutOfBounds { count, len })?;
        self.sort(prefix)
    }

    fn sort_range<T>(
        &self,
        mut data: &mut [T],
        budget: &ThreadBudget,
        mut depth_limit: usize,
    ) -> SortResult<()>
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        loop {
            if self.config.is_small(data.len()) {
                common::insertion_sort_by(data, &self.compare);
                return Ok(());
            }
            if depth_limit == 0 {
                trace!(
                    "partition depth exhausted, heap sorting {} elements",
                    data.len()
                );
                common::heap_sort_by(data, &self.compare);
                return Ok(());
            }
            depth_limit -= 1;

            let (left_end, right_start) = common::partition_hoare_by(data, &self.compare);
            let (left, rest) = data.split_at_mut(left_end);
            let right = &mut rest[right_start - left_end..];

            if !budget.is_spent()? {
                return thread::scope(|scope| {
                    let left_task = self.dispatch(scope, left, budget, depth_limit);
                    let right_task = self.dispatch(scope, right, budget, depth_limit);
                    let left_done = self.finish(left_task, budget);
                    let right_done = self.finish(right_task, budget);
                    left_done.and(right_done)
                });
            }

            // No worker can be had any more: recurse into the smaller side, loop on the larger.
            if left.len() < right.len() {
                self.sort_range(left, budget, depth_limit)?;
                data = right;
            } else {
                self.sort_range(right, budget, depth_limit)?;
                data = left;
            }
        }
    }

    fn dispatch<'scope, T>(
        &'scope self,
        scope: &'scope Scope<'scope, '_>,
        part: &'scope mut [T],
        budget: &'scope ThreadBudget,
        depth_limit: usize,
    ) -> Task<'scope>
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        match budget.try_acquire() {
            Ok(true) => {}
            Ok(false) => {
                trace!("budget spent, sorting {} elements inline", part.len());
                return Task::Inline(self.sort_range(part, budget, depth_limit));
            }
            Err(err) => return Task::Inline(Err(err)),
        }

        // The range only travels to the worker once it exists; a failed spawn
        // leaves it with us.
        let (tx, rx) = mpsc::sync_channel::<&'scope mut [T]>(1);
        let spawned = self.spawner.spawn(scope, move || match rx.recv() {
            Ok(part) => self.sort_range(part, budget, depth_limit),
            Err(_) => Ok(()),
        });

        match spawned {
            Ok(handle) => match tx.send(part) {
                Ok(()) => {
                    trace!("spawned worker");
                    Task::Spawned(handle)
                }
                Err(mpsc::SendError(part)) => {
                    warn!(
                        "worker exited before receiving its range; sorting {} elements inline",
                        part.len()
                    );
                    let joined = join_worker(handle);
                    Task::Inline(
                        joined
                            .and(budget.cancel())
                            .and_then(|()| self.sort_range(part, budget, depth_limit)),
                    )
                }
            },
            Err(err) => {
                warn!(
                    "failed to spawn sort worker ({err}); sorting {} elements inline",
                    part.len()
                );
                Task::Inline(
                    budget
                        .cancel()
                        .and_then(|()| self.sort_range(part, budget, depth_limit)),
                )
            }
        }
    }

    fn finish(&self, task: Task<'_>, budget: &ThreadBudget) -> SortResult<()> {
        match task {
            Task::Inline(result) => result,
            Task::Spawned(handle) => {
                let joined = join_worker(handle);
                joined.and(budget.release())
            }
        }
    }
}

fn join_worker(handle: ScopedJoinHandle<'_, SortResult<()>>) -> SortResult<()> {
    handle.join().map_err(|_| SortError::WorkerPanicked)?
}
