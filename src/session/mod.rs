//! Evaluation session
//!
//! One session tracks one position. It owns the momentum history for that
//! position and is the call boundary a presentation layer talks to.

mod render;

pub use render::{DisplayColor, RenderedError, RenderedResult};

use crate::decision::{Decision, DecisionEvaluator};
use crate::momentum::{MomentumConfig, MomentumTracker};
use crate::snapshot::{InputError, LayChoice, Snapshot};
use crate::telemetry;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

/// Stateful evaluator for a single position's snapshot stream
pub struct Session {
    id: Uuid,
    tracker: MomentumTracker,
    decay: Decimal,
    evaluator: DecisionEvaluator,
}

impl Session {
    /// Create a session from momentum configuration
    pub fn new(config: &MomentumConfig) -> Self {
        Self::with_evaluator(config, DecisionEvaluator::default())
    }

    /// Create a session with a custom evaluator
    pub fn with_evaluator(config: &MomentumConfig, evaluator: DecisionEvaluator) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            tracker: MomentumTracker::new(config.capacity),
            decay: config.decay,
            evaluator,
        };
        tracing::debug!(
            session = %session.id,
            capacity = session.tracker.capacity(),
            decay = %session.decay,
            "Session created"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tracker(&self) -> &MomentumTracker {
        &self.tracker
    }

    /// Parse, evaluate and record one set of input fields
    ///
    /// On any input error nothing is recorded.
    pub fn evaluate_position(
        &mut self,
        fields: &HashMap<String, String>,
        lay_choice: LayChoice,
    ) -> Result<RenderedResult, InputError> {
        let snapshot = Snapshot::from_fields(fields, lay_choice).inspect_err(|e| {
            tracing::warn!(session = %self.id, error = %e, "Rejected input");
            telemetry::record_input_error();
        })?;

        self.evaluate_snapshot(snapshot).map(RenderedResult::from)
    }

    /// Evaluate an already-parsed snapshot, then record it
    ///
    /// Momentum is taken from the history before this snapshot is added.
    pub fn evaluate_snapshot(&mut self, snapshot: Snapshot) -> Result<Decision, InputError> {
        let prior = self.tracker.prior_momentum(self.decay);
        let decision = self
            .evaluator
            .evaluate(&snapshot, prior.as_ref())
            .inspect_err(|e| {
                tracing::warn!(session = %self.id, error = %e, "Rejected snapshot");
                telemetry::record_input_error();
            })?;

        tracing::info!(
            session = %self.id,
            minute = snapshot.match_time,
            lay = snapshot.lay_choice.as_str(),
            decision = decision.label.as_str(),
            rule = decision.triggered_by.unwrap_or("default"),
            p_goal = %decision.p_goal,
            history = self.tracker.len(),
            "Position evaluated"
        );

        self.tracker.record(snapshot);
        telemetry::record_decision(&decision, self.tracker.len());

        Ok(decision)
    }

    /// Forget all momentum history, e.g. when switching to a new match
    pub fn reset_session(&mut self) {
        tracing::info!(session = %self.id, dropped = self.tracker.len(), "Session reset");
        self.tracker.reset();
        telemetry::record_session_reset();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&MomentumConfig::default())
    }
}
