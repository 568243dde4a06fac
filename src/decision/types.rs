//! Decision types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommended action for the position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionLabel {
    /// Keep the position open
    Hold,
    /// Lock in the current live price
    CashOut,
    /// Cash out, the laid underdog is gaining quickly
    CashOutUnderdogGaining,
    /// Cash out, the laid favourite is gaining quickly
    CashOutFavouriteGaining,
}

impl DecisionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionLabel::Hold => "Hold",
            DecisionLabel::CashOut => "Cash Out",
            DecisionLabel::CashOutUnderdogGaining => "Cash Out (Underdog Gaining Quickly)",
            DecisionLabel::CashOutFavouriteGaining => "Cash Out (Favourite Gaining Quickly)",
        }
    }

    pub fn is_hold(&self) -> bool {
        *self == DecisionLabel::Hold
    }
}

impl fmt::Display for DecisionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side the next goal is most likely to come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalSource {
    Favourite,
    Underdog,
    /// Both sides contribute equally
    Even,
}

impl GoalSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalSource::Favourite => "Favourite",
            GoalSource::Underdog => "Underdog",
            GoalSource::Even => "Even",
        }
    }
}

impl fmt::Display for GoalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal probability estimate with its intermediate terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalEstimate {
    /// Time-decayed baseline before adjustments
    pub base: Decimal,
    /// Final probability, clamped to [0, 1]
    pub p_goal: Decimal,
    pub fav_contribution: Decimal,
    pub underdog_contribution: Decimal,
    pub goal_source: GoalSource,
}

/// Expected values of holding vs cashing out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Valuation {
    pub ev_hold: Decimal,
    pub ev_cashout: Decimal,
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    /// Recommended action
    pub label: DecisionLabel,
    /// 1/live_odds - 1/model_odds
    pub updated_edge: Decimal,
    /// 1/bookmaker_odds - 1/model_odds, when bookmaker odds were supplied
    pub bookmaker_edge: Option<Decimal>,
    /// Probability of an upcoming goal
    pub p_goal: Decimal,
    pub goal_source: GoalSource,
    pub ev_hold: Decimal,
    pub ev_cashout: Decimal,
    /// Override rule that set the final label, `None` for the default hold
    pub triggered_by: Option<&'static str>,
    /// Every override rule that fired, in cascade order
    pub fired_rules: Vec<&'static str>,
    /// Evaluation timestamp
    pub evaluated_at: DateTime<Utc>,
}

impl Decision {
    pub fn is_hold(&self) -> bool {
        self.label.is_hold()
    }
}
