use std::sync::{Mutex, MutexGuard};

use crate::config::BudgetPolicy;
use crate::error::{SortError, SortResult};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SortStats {
    pub spawned: usize,
    pub inline: usize,
    pub spawn_failures: usize,
    pub peak_live: usize,
}

#[derive(Debug, Default)]
struct BudgetState {
    live: usize,
    reserved: usize,
    inline: usize,
    failed: usize,
    peak: usize,
}

// The lock only ever guards counter updates, never sort work.
#[derive(Debug)]
pub struct ThreadBudget {
    max: usize,
    policy: BudgetPolicy,
    state: Mutex<BudgetState>,
}

impl ThreadBudget {
    pub fn new(max: usize, policy: BudgetPolicy) -> Self {
        Self {
            max,
            policy,
            state: Mutex::new(BudgetState::default()),
        }
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub fn policy(&self) -> BudgetPolicy {
        self.policy
    }

    pub fn try_acquire(&self) -> SortResult<bool> {
        let mut state = self.lock()?;
        if state.live < self.max {
            state.live += 1;
            state.reserved += 1;
            state.peak = state.peak.max(state.live);
            Ok(true)
        } else {
            state.inline += 1;
            Ok(false)
        }
    }

    /// Hands back a slot whose spawn failed, under either policy.
    pub fn cancel(&self) -> SortResult<()> {
        let mut state = self.lock()?;
        debug_assert!(state.live > 0, "cancel without a reservation");
        state.live -= 1;
        state.failed += 1;
        Ok(())
    }

    pub fn release(&self) -> SortResult<()> {
        if self.policy == BudgetPolicy::Monotonic {
            return Ok(());
        }
        let mut state = self.lock()?;
        debug_assert!(state.live > 0, "release without a reservation");
        state.live -= 1;
        Ok(())
    }

    /// True when no slot can ever become free again during this sort call.
    pub fn is_spent(&self) -> SortResult<bool> {
        if self.policy == BudgetPolicy::Reclaim {
            return Ok(self.max == 0);
        }
        Ok(self.lock()?.live >= self.max)
    }

    pub fn live(&self) -> SortResult<usize> {
        Ok(self.lock()?.live)
    }

    pub fn stats(&self) -> SortResult<SortStats> {
        let state = self.lock()?;
        Ok(SortStats {
            spawned: state.reserved - state.failed,
            inline: state.inline,
            spawn_failures: state.failed,
            peak_live: state.peak,
        })
    }

    fn lock(&self) -> SortResult<MutexGuard<'_, BudgetState>> {
        self.state.lock().map_err(|_| SortError::BudgetPoisoned)
    }
}
