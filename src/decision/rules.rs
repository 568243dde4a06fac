//! Override rule cascade
//!
//! Rules run in a fixed order after the default `Hold`. Each may propose a
//! label; the last proposal wins.

use super::types::{DecisionLabel, GoalEstimate, Valuation};
use crate::momentum::{PriorMomentum, TrackedMetric};
use crate::snapshot::{LayChoice, Snapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Probability below which a goal is considered unlikely
const LOW_GOAL_PROBABILITY: Decimal = dec!(0.12);

const LATE_GAME_MINUTE: u32 = 80;
const FINAL_MINUTES: u32 = 85;

const DRAW_MAX_POSSESSION_GAP: Decimal = dec!(10);
const DRAW_MAX_XG_GAP: Decimal = dec!(0.3);
const DRAW_MAX_SOT_GAP: u32 = 2;

const EV_GAP_MARGIN: Decimal = dec!(0.07);

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub snapshot: &'a Snapshot,
    pub estimate: &'a GoalEstimate,
    pub valuation: &'a Valuation,
    /// Pre-update momentum, `None` on the first evaluation of a session
    pub momentum: Option<&'a PriorMomentum>,
}

/// A single override in the cascade
pub trait DecisionRule: Send + Sync {
    /// Stable identifier reported in decisions and logs
    fn name(&self) -> &'static str;

    /// Proposed label, or `None` when the rule does not apply
    fn apply(&self, ctx: &RuleContext<'_>) -> Option<DecisionLabel>;
}

/// Level, evenly matched game late on with little goal threat
#[derive(Debug, Clone, Copy, Default)]
pub struct LikelyDrawRule;

impl DecisionRule for LikelyDrawRule {
    fn name(&self) -> &'static str {
        "likely_draw"
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Option<DecisionLabel> {
        let s = ctx.snapshot;
        let likely_draw = ctx.estimate.p_goal < LOW_GOAL_PROBABILITY
            && (s.possession_fav - s.possession_underdog).abs() <= DRAW_MAX_POSSESSION_GAP
            && (s.xg_fav - s.xg_underdog).abs() < DRAW_MAX_XG_GAP
            && s.sot_fav.abs_diff(s.sot_underdog) <= DRAW_MAX_SOT_GAP
            && s.match_time >= LATE_GAME_MINUTE
            && s.is_level();

        likely_draw.then_some(DecisionLabel::CashOut)
    }
}

/// Cashing out beats holding by a clear margin late in the game
#[derive(Debug, Clone, Copy, Default)]
pub struct EvGapRule;

impl DecisionRule for EvGapRule {
    fn name(&self) -> &'static str {
        "ev_gap"
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Option<DecisionLabel> {
        let gap = ctx.valuation.ev_cashout > ctx.valuation.ev_hold + EV_GAP_MARGIN;
        (gap && ctx.snapshot.match_time >= LATE_GAME_MINUTE).then_some(DecisionLabel::CashOut)
    }
}

/// Final minutes with a low goal probability
#[derive(Debug, Clone, Copy, Default)]
pub struct LateGameRule;

impl DecisionRule for LateGameRule {
    fn name(&self) -> &'static str {
        "late_game_low_probability"
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Option<DecisionLabel> {
        (ctx.snapshot.match_time >= FINAL_MINUTES && ctx.estimate.p_goal < LOW_GOAL_PROBABILITY)
            .then_some(DecisionLabel::CashOut)
    }
}

/// Laid underdog trailing 1-0 yet out-chancing and out-possessing the leader
#[derive(Debug, Clone, Copy, Default)]
pub struct LayReversalRule;

impl DecisionRule for LayReversalRule {
    fn name(&self) -> &'static str {
        "lay_reversal"
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Option<DecisionLabel> {
        let s = ctx.snapshot;
        if s.lay_choice != LayChoice::Underdog {
            return None;
        }

        let reversal = s.underdog_goals == 0
            && s.fav_goals == 1
            && s.xg_underdog > s.xg_fav
            && s.possession_underdog > s.possession_fav;

        reversal.then_some(DecisionLabel::CashOut)
    }
}

/// Rate-of-change thresholds for the momentum rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MomentumThresholds {
    pub sot: Decimal,
    pub xg: Decimal,
    pub possession: Decimal,
}

impl MomentumThresholds {
    const LATE_BAND_MINUTE: u32 = 60;

    /// Thresholds widen in the last half hour
    pub fn for_minute(match_time: u32) -> Self {
        if match_time < Self::LATE_BAND_MINUTE {
            Self {
                sot: dec!(0.75),
                xg: dec!(0.15),
                possession: dec!(2.5),
            }
        } else {
            Self {
                sot: dec!(1.2),
                xg: dec!(0.35),
                possession: dec!(5.0),
            }
        }
    }
}

/// Laid side's statistics rising faster than the minute-band thresholds
///
/// No draw branch: a laid draw never triggers this rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumShiftRule;

impl MomentumShiftRule {
    fn gaining(
        momentum: &PriorMomentum,
        snapshot: &Snapshot,
        thresholds: &MomentumThresholds,
        metrics: [TrackedMetric; 3],
    ) -> bool {
        let [sot, xg, possession] = metrics;
        momentum.rate(sot, snapshot) > thresholds.sot
            || momentum.rate(xg, snapshot) > thresholds.xg
            || momentum.rate(possession, snapshot) > thresholds.possession
    }
}

impl DecisionRule for MomentumShiftRule {
    fn name(&self) -> &'static str {
        "momentum_shift"
    }

    fn apply(&self, ctx: &RuleContext<'_>) -> Option<DecisionLabel> {
        let momentum = ctx.momentum?;
        let s = ctx.snapshot;
        let thresholds = MomentumThresholds::for_minute(s.match_time);

        match s.lay_choice {
            LayChoice::Underdog => Self::gaining(
                momentum,
                s,
                &thresholds,
                [
                    TrackedMetric::SotUnderdog,
                    TrackedMetric::XgUnderdog,
                    TrackedMetric::PossessionUnderdog,
                ],
            )
            .then_some(DecisionLabel::CashOutUnderdogGaining),
            LayChoice::Favourite => Self::gaining(
                momentum,
                s,
                &thresholds,
                [
                    TrackedMetric::SotFav,
                    TrackedMetric::XgFav,
                    TrackedMetric::PossessionFav,
                ],
            )
            .then_some(DecisionLabel::CashOutFavouriteGaining),
            LayChoice::Draw => None,
        }
    }
}

/// Outcome of running the cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub label: DecisionLabel,
    pub triggered_by: Option<&'static str>,
    pub fired: Vec<&'static str>,
}

/// Ordered list of override rules
pub struct RuleCascade {
    rules: Vec<Box<dyn DecisionRule>>,
}

impl RuleCascade {
    /// Cascade over an explicit rule order
    pub fn new(rules: Vec<Box<dyn DecisionRule>>) -> Self {
        Self { rules }
    }

    /// Likely draw, EV gap, late game, lay reversal, momentum shift
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(LikelyDrawRule),
            Box::new(EvGapRule),
            Box::new(LateGameRule),
            Box::new(LayReversalRule),
            Box::new(MomentumShiftRule),
        ])
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Start at `Hold` and apply every rule in order; last proposal wins
    pub fn decide(&self, ctx: &RuleContext<'_>) -> Verdict {
        let mut verdict = Verdict {
            label: DecisionLabel::Hold,
            triggered_by: None,
            fired: Vec::new(),
        };

        for rule in &self.rules {
            if let Some(label) = rule.apply(ctx) {
                tracing::debug!(rule = rule.name(), label = label.as_str(), "Override rule fired");
                verdict.label = label;
                verdict.triggered_by = Some(rule.name());
                verdict.fired.push(rule.name());
            }
        }

        verdict
    }
}

impl Default for RuleCascade {
    fn default() -> Self {
        Self::standard()
    }
}
