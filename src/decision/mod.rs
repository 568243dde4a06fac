//! Decision module
//!
//! Turns a snapshot plus prior momentum into a hold / cash-out
//! recommendation: goal probability, expected values, then an ordered
//! cascade of override rules.

mod evaluator;
pub mod probability;
mod rules;
mod types;

pub use evaluator::{evaluate, DecisionEvaluator};
pub use rules::{
    DecisionRule, EvGapRule, LateGameRule, LayReversalRule, LikelyDrawRule, MomentumShiftRule,
    MomentumThresholds, RuleCascade, RuleContext, Verdict,
};
pub use types::{Decision, DecisionLabel, GoalEstimate, GoalSource, Valuation};
