//! Decision evaluation

use super::probability::{bookmaker_edge, estimate_goal_probability, updated_edge, valuation};
use super::rules::{RuleCascade, RuleContext};
use super::types::Decision;
use crate::momentum::PriorMomentum;
use crate::snapshot::{InputError, Snapshot};
use chrono::Utc;

/// Evaluates snapshots against a rule cascade
///
/// Stateless between calls; momentum history lives with the caller.
pub struct DecisionEvaluator {
    cascade: RuleCascade,
}

impl DecisionEvaluator {
    pub fn new(cascade: RuleCascade) -> Self {
        Self { cascade }
    }

    /// Evaluate one snapshot
    ///
    /// Fails only when [`Snapshot::validate`] does, which
    /// [`Snapshot::from_fields`] already rules out.
    pub fn evaluate(
        &self,
        snapshot: &Snapshot,
        momentum: Option<&PriorMomentum>,
    ) -> Result<Decision, InputError> {
        snapshot.validate()?;
        let updated_edge = updated_edge(snapshot)?;
        let bookmaker_edge = bookmaker_edge(snapshot)?;
        let estimate = estimate_goal_probability(snapshot);
        let valuation = valuation(snapshot, estimate.p_goal)?;

        let ctx = RuleContext {
            snapshot,
            estimate: &estimate,
            valuation: &valuation,
            momentum,
        };
        let verdict = self.cascade.decide(&ctx);

        Ok(Decision {
            label: verdict.label,
            updated_edge,
            bookmaker_edge,
            p_goal: estimate.p_goal,
            goal_source: estimate.goal_source,
            ev_hold: valuation.ev_hold,
            ev_cashout: valuation.ev_cashout,
            triggered_by: verdict.triggered_by,
            fired_rules: verdict.fired,
            evaluated_at: Utc::now(),
        })
    }
}

impl Default for DecisionEvaluator {
    fn default() -> Self {
        Self::new(RuleCascade::standard())
    }
}

/// Evaluate with the standard rule cascade
pub fn evaluate(
    snapshot: &Snapshot,
    momentum: Option<&PriorMomentum>,
) -> Result<Decision, InputError> {
    DecisionEvaluator::default().evaluate(snapshot, momentum)
}
