//! Bounded snapshot history with exponentially weighted averaging
//!
//! History is a FIFO ring: once `capacity` snapshots are held, recording a
//! new one evicts the oldest. Averages weight the newest snapshot at 1 and
//! multiply by `decay` for each step into the past.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::VecDeque;

use super::types::{MetricAverages, PriorMomentum, TrackedMetric};
use crate::snapshot::Snapshot;

/// Configuration for momentum tracking
#[derive(Debug, Clone, Deserialize)]
pub struct MomentumConfig {
    /// Maximum number of prior snapshots kept (default: 5)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Weight multiplier per step into the past (default: 0.6)
    #[serde(default = "default_decay")]
    pub decay: Decimal,
}

fn default_capacity() -> usize {
    MomentumTracker::DEFAULT_CAPACITY
}
fn default_decay() -> Decimal {
    MomentumTracker::DEFAULT_DECAY
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            decay: default_decay(),
        }
    }
}

/// Rolling snapshot history for one position
///
/// Not shared between positions: every session owns its own tracker.
#[derive(Debug, Clone)]
pub struct MomentumTracker {
    capacity: usize,
    history: VecDeque<Snapshot>,
}

impl MomentumTracker {
    pub const DEFAULT_CAPACITY: usize = 5;
    pub const DEFAULT_DECAY: Decimal = dec!(0.6);

    /// Create a tracker holding at most `capacity` snapshots
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            history: VecDeque::with_capacity(capacity),
        }
    }

    /// Create a tracker with the default capacity of 5
    pub fn with_defaults() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }

    /// Append a snapshot, evicting the oldest once full
    pub fn record(&mut self, snapshot: Snapshot) {
        while self.history.len() >= self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
    }

    /// Drop all history
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Exponentially weighted mean of the tracked metrics
    ///
    /// Returns `None` for an empty history and the lone snapshot's metrics
    /// verbatim when only one is held. `decay` is clamped to [0, 1], so the
    /// weight sum is at least 1.
    pub fn weighted_average(&self, decay: Decimal) -> Option<MetricAverages> {
        match self.history.len() {
            0 => return None,
            1 => return self.history.front().map(MetricAverages::from_snapshot),
            _ => {}
        }

        let decay = decay.clamp(Decimal::ZERO, Decimal::ONE);
        let mut sums = MetricAverages::default();
        let mut weight_sum = Decimal::ZERO;
        let mut weight = Decimal::ONE;

        for snapshot in self.history.iter().rev() {
            for metric in TrackedMetric::ALL {
                let slot = sums.slot_mut(metric);
                *slot = slot.saturating_add(weight * metric.value(snapshot));
            }
            weight_sum += weight;
            weight *= decay;
        }

        for metric in TrackedMetric::ALL {
            let slot = sums.slot_mut(metric);
            *slot /= weight_sum;
        }
        Some(sums)
    }

    /// Weighted average paired with the history length it was computed from
    pub fn prior_momentum(&self, decay: Decimal) -> Option<PriorMomentum> {
        self.weighted_average(decay).map(|averages| PriorMomentum {
            averages,
            history_len: self.history.len(),
        })
    }

    /// Recorded snapshots, oldest first
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MomentumTracker {
    fn default() -> Self {
        Self::with_defaults()
    }
}
