use std::num::NonZeroUsize;
use std::thread;

use crate::error::{SortError, SortResult};

/// Ranges with `right - left <= DEFAULT_SMALL_THRESHOLD` go to insertion sort.
pub const DEFAULT_SMALL_THRESHOLD: usize = 40;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum BudgetPolicy {
    /// Slot returned on join: the budget caps workers alive at once.
    #[default]
    Reclaim,
    /// Slot never returned: the budget caps workers spawned per sort call.
    Monotonic,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortConfig {
    /// `0` keeps the whole sort on the calling thread.
    pub max_threads: usize,
    pub small_threshold: usize,
    pub policy: BudgetPolicy,
    pub stack_size: Option<usize>,
}

impl SortConfig {
    pub fn new(max_threads: usize) -> Self {
        Self {
            max_threads,
            small_threshold: DEFAULT_SMALL_THRESHOLD,
            policy: BudgetPolicy::default(),
            stack_size: None,
        }
    }

    pub fn sequential() -> Self {
        Self::new(0)
    }

    pub fn with_small_threshold(mut self, small_threshold: usize) -> Self {
        self.small_threshold = small_threshold;
        self
    }

    pub fn with_policy(mut self, policy: BudgetPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    /// Empty, negative and non-numeric input is rejected; `"0"` is accepted.
    pub fn parse_threads(input: &str) -> SortResult<usize> {
        input
            .trim()
            .parse::<usize>()
            .map_err(|_| SortError::InvalidThreadCount {
                input: input.to_string(),
            })
    }

    #[inline]
    pub(crate) fn is_small(&self, len: usize) -> bool {
        len.saturating_sub(1) <= self.small_threshold
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        let threads = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self::new(threads)
    }
}
