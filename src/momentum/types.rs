//! Momentum tracking types

use crate::snapshot::Snapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// The six statistics the tracker averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedMetric {
    SotFav,
    SotUnderdog,
    XgFav,
    XgUnderdog,
    PossessionFav,
    PossessionUnderdog,
}

impl TrackedMetric {
    pub const ALL: [TrackedMetric; 6] = [
        TrackedMetric::SotFav,
        TrackedMetric::SotUnderdog,
        TrackedMetric::XgFav,
        TrackedMetric::XgUnderdog,
        TrackedMetric::PossessionFav,
        TrackedMetric::PossessionUnderdog,
    ];

    /// Read this metric off a snapshot
    pub fn value(&self, snapshot: &Snapshot) -> Decimal {
        match self {
            TrackedMetric::SotFav => Decimal::from(snapshot.sot_fav),
            TrackedMetric::SotUnderdog => Decimal::from(snapshot.sot_underdog),
            TrackedMetric::XgFav => snapshot.xg_fav,
            TrackedMetric::XgUnderdog => snapshot.xg_underdog,
            TrackedMetric::PossessionFav => snapshot.possession_fav,
            TrackedMetric::PossessionUnderdog => snapshot.possession_underdog,
        }
    }
}

/// Weighted averages of the tracked metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricAverages {
    pub sot_fav: Decimal,
    pub sot_underdog: Decimal,
    pub xg_fav: Decimal,
    pub xg_underdog: Decimal,
    pub possession_fav: Decimal,
    pub possession_underdog: Decimal,
}

impl MetricAverages {
    /// The snapshot's own metrics, unsmoothed
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut averages = Self::default();
        for metric in TrackedMetric::ALL {
            *averages.slot_mut(metric) = metric.value(snapshot);
        }
        averages
    }

    pub(crate) fn slot_mut(&mut self, metric: TrackedMetric) -> &mut Decimal {
        match metric {
            TrackedMetric::SotFav => &mut self.sot_fav,
            TrackedMetric::SotUnderdog => &mut self.sot_underdog,
            TrackedMetric::XgFav => &mut self.xg_fav,
            TrackedMetric::XgUnderdog => &mut self.xg_underdog,
            TrackedMetric::PossessionFav => &mut self.possession_fav,
            TrackedMetric::PossessionUnderdog => &mut self.possession_underdog,
        }
    }
}

impl Index<TrackedMetric> for MetricAverages {
    type Output = Decimal;

    fn index(&self, metric: TrackedMetric) -> &Decimal {
        match metric {
            TrackedMetric::SotFav => &self.sot_fav,
            TrackedMetric::SotUnderdog => &self.sot_underdog,
            TrackedMetric::XgFav => &self.xg_fav,
            TrackedMetric::XgUnderdog => &self.xg_underdog,
            TrackedMetric::PossessionFav => &self.possession_fav,
            TrackedMetric::PossessionUnderdog => &self.possession_underdog,
        }
    }
}

/// Momentum as it stood before the current snapshot was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorMomentum {
    /// Weighted averages over the prior history
    pub averages: MetricAverages,
    /// Number of snapshots the averages were computed from
    pub history_len: usize,
}

impl PriorMomentum {
    /// Per-step rate of change of `metric` from the prior average to `snapshot`
    ///
    /// The divisor is `max(1, history_len - 1)`.
    pub fn rate(&self, metric: TrackedMetric, snapshot: &Snapshot) -> Decimal {
        let steps = self.history_len.saturating_sub(1).max(1);
        metric
            .value(snapshot)
            .saturating_sub(self.averages[metric])
            / Decimal::from(steps)
    }
}
