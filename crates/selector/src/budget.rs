//! Time budget tracking for the greedy walk.

use serde::{Deserialize, Serialize};

/// Minutes available for one plan, and how many are already committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBudget {
    available: u32,
    used: u64,
}

impl TimeBudget {
    /// Create a budget with nothing committed yet.
    pub fn new(available_minutes: u32) -> Self {
        Self {
            available: available_minutes,
            used: 0,
        }
    }

    /// Total minutes in the budget.
    pub fn available(&self) -> u32 {
        self.available
    }

    /// Minutes committed so far.
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Minutes still free.
    pub fn remaining(&self) -> u64 {
        u64::from(self.available).saturating_sub(self.used)
    }

    /// Check if `minutes` fit in what is left.
    pub fn fits(&self, minutes: u32) -> bool {
        u64::from(minutes) <= self.remaining()
    }

    /// Commit `minutes` if they fit. Returns whether they were committed.
    pub fn consume(&mut self, minutes: u32) -> bool {
        if !self.fits(minutes) {
            return false;
        }
        self.used += u64::from(minutes);
        true
    }

    /// Whether nothing more can be committed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// `used / available`, or 0 for an empty budget.
    pub fn utilization(&self) -> f64 {
        utilization(self.used, self.available)
    }
}

/// `used / available`, defined as 0 when `available` is 0.
pub fn utilization(used: u64, available: u32) -> f64 {
    if available == 0 {
        return 0.0;
    }
    used as f64 / f64::from(available)
}
