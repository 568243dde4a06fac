//! Momentum tracking module
//!
//! Keeps a bounded history of prior snapshots and produces an exponentially
//! weighted average of the tracked match statistics. The decision evaluator
//! compares the current snapshot against this average to spot one side
//! gaining quickly between evaluations.

mod tracker;
mod types;

pub use tracker::{MomentumConfig, MomentumTracker};
pub use types::{MetricAverages, PriorMomentum, TrackedMetric};
