//! Goal probability and expected value model
//!
//! A heuristic, not a calibrated pricing model:
//! - baseline: max(0.50 - 0.0045 * minute, 0.10)
//! - shots on target: +0.02 per shot when total >= 6, else -0.05
//! - combined xG: +0.02 * xG when >= 1.2, else -0.10
//! - goal source: -0.04 if the favourite leads the threat, +0.04 if the underdog does
//!
//! The result is clamped to [0, 1].

use super::types::{GoalEstimate, GoalSource, Valuation};
use crate::snapshot::{FieldName, InputError, Snapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const BASE_PROBABILITY: Decimal = dec!(0.50);
const DECAY_PER_MINUTE: Decimal = dec!(0.0045);
const BASE_FLOOR: Decimal = dec!(0.10);

const HIGH_SOT_TOTAL: u32 = 6;
const SOT_WEIGHT: Decimal = dec!(0.020);
const LOW_SOT_PENALTY: Decimal = dec!(0.05);

const HIGH_XG_TOTAL: Decimal = dec!(1.2);
const XG_WEIGHT: Decimal = dec!(0.02);
const LOW_XG_PENALTY: Decimal = dec!(0.10);

const THREAT_XG_WEIGHT: Decimal = dec!(0.4);
const THREAT_SOT_WEIGHT: Decimal = dec!(0.3);
const THREAT_GOALS_WEIGHT: Decimal = dec!(0.3);
const SOURCE_ADJUSTMENT: Decimal = dec!(0.04);

/// Implied probability of decimal odds
pub fn implied_probability(field: FieldName, odds: Decimal) -> Result<Decimal, InputError> {
    if odds <= Decimal::ZERO {
        return Err(InputError::NonPositiveOdds { field, value: odds });
    }
    Decimal::ONE
        .checked_div(odds)
        .ok_or(InputError::NonPositiveOdds { field, value: odds })
}

/// Time-decayed baseline goal probability
pub fn base_probability(match_time: u32) -> Decimal {
    (BASE_PROBABILITY - DECAY_PER_MINUTE * Decimal::from(match_time)).max(BASE_FLOOR)
}

fn shot_adjustment(total_sot: u32) -> Decimal {
    if total_sot >= HIGH_SOT_TOTAL {
        SOT_WEIGHT * Decimal::from(total_sot)
    } else {
        -LOW_SOT_PENALTY
    }
}

fn xg_adjustment(combined_xg: Decimal) -> Decimal {
    if combined_xg >= HIGH_XG_TOTAL {
        XG_WEIGHT * combined_xg
    } else {
        -LOW_XG_PENALTY
    }
}

fn threat(xg: Decimal, sot: u32, goals: u32) -> Decimal {
    THREAT_XG_WEIGHT * xg
        + THREAT_SOT_WEIGHT * Decimal::from(sot)
        + THREAT_GOALS_WEIGHT * Decimal::from(goals)
}

/// Attribute the likely goal source from each side's threat score
pub fn goal_source(fav_contribution: Decimal, underdog_contribution: Decimal) -> GoalSource {
    match fav_contribution.cmp(&underdog_contribution) {
        std::cmp::Ordering::Greater => GoalSource::Favourite,
        std::cmp::Ordering::Less => GoalSource::Underdog,
        std::cmp::Ordering::Equal => GoalSource::Even,
    }
}

/// Estimate the probability of an upcoming goal
pub fn estimate_goal_probability(snapshot: &Snapshot) -> GoalEstimate {
    let base = base_probability(snapshot.match_time);
    let mut p_goal = base;

    p_goal += shot_adjustment(snapshot.total_sot());
    p_goal += xg_adjustment(snapshot.combined_xg());

    let fav_contribution = threat(snapshot.xg_fav, snapshot.sot_fav, snapshot.fav_goals);
    let underdog_contribution = threat(
        snapshot.xg_underdog,
        snapshot.sot_underdog,
        snapshot.underdog_goals,
    );
    let goal_source = goal_source(fav_contribution, underdog_contribution);
    match goal_source {
        GoalSource::Favourite => p_goal -= SOURCE_ADJUSTMENT,
        GoalSource::Underdog => p_goal += SOURCE_ADJUSTMENT,
        GoalSource::Even => {}
    }

    let p_goal = p_goal.clamp(Decimal::ZERO, Decimal::ONE);

    tracing::debug!(
        match_time = snapshot.match_time,
        %base,
        %fav_contribution,
        %underdog_contribution,
        goal_source = goal_source.as_str(),
        %p_goal,
        "Estimated goal probability"
    );

    GoalEstimate {
        base,
        p_goal,
        fav_contribution,
        underdog_contribution,
        goal_source,
    }
}

/// Expected values of holding vs cashing out at the live price
pub fn valuation(snapshot: &Snapshot, p_goal: Decimal) -> Result<Valuation, InputError> {
    let live_implied = implied_probability(FieldName::LiveOdds, snapshot.live_odds)?;
    let model_implied = implied_probability(FieldName::ModelOdds, snapshot.model_odds)?;

    Ok(Valuation {
        ev_hold: (Decimal::ONE - p_goal) * live_implied - p_goal * model_implied,
        ev_cashout: live_implied,
    })
}

/// Raw edge between live and model implied probabilities
pub fn updated_edge(snapshot: &Snapshot) -> Result<Decimal, InputError> {
    Ok(implied_probability(FieldName::LiveOdds, snapshot.live_odds)?
        - implied_probability(FieldName::ModelOdds, snapshot.model_odds)?)
}

/// Edge of the pre-match bookmaker price against the model
pub fn bookmaker_edge(snapshot: &Snapshot) -> Result<Option<Decimal>, InputError> {
    snapshot
        .bookmaker_odds
        .map(|odds| {
            Ok(implied_probability(FieldName::BookmakerOdds, odds)?
                - implied_probability(FieldName::ModelOdds, snapshot.model_odds)?)
        })
        .transpose()
}
