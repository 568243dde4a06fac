//! Display formatting for evaluation results

use crate::decision::Decision;
use crate::snapshot::InputError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

/// Colour hint for the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    /// Decision is exactly Hold
    Green,
    /// Any cash-out decision
    Red,
    /// Input error
    Black,
}

impl DisplayColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayColor::Green => "green",
            DisplayColor::Red => "red",
            DisplayColor::Black => "black",
        }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    format!("{:.*}", dp as usize, rounded)
}

fn percent(value: Decimal) -> String {
    format!("{}%", fixed(value * dec!(100), 2))
}

/// A decision formatted for display
#[derive(Debug, Clone, Serialize)]
pub struct RenderedResult {
    /// Edge to 4 decimal places
    pub updated_edge: String,
    /// Goal probability as a percentage to 2 decimal places
    pub p_goal: String,
    pub goal_source: String,
    pub ev_hold: String,
    pub ev_cashout: String,
    pub decision: String,
    pub color: DisplayColor,
    /// Unformatted values
    #[serde(skip)]
    pub raw: Decision,
}

impl RenderedResult {
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl From<Decision> for RenderedResult {
    fn from(decision: Decision) -> Self {
        let color = if decision.is_hold() {
            DisplayColor::Green
        } else {
            DisplayColor::Red
        };

        Self {
            updated_edge: fixed(decision.updated_edge, 4),
            p_goal: percent(decision.p_goal),
            goal_source: decision.goal_source.to_string(),
            ev_hold: fixed(decision.ev_hold, 4),
            ev_cashout: fixed(decision.ev_cashout, 4),
            decision: decision.label.to_string(),
            color,
            raw: decision,
        }
    }
}

impl fmt::Display for RenderedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated Edge: {}", self.updated_edge)?;
        if let Some(edge) = self.raw.bookmaker_edge {
            writeln!(f, "Bookmaker Edge: {}", fixed(edge, 4))?;
        }
        writeln!(f, "Goal Probability: {} ({})", self.p_goal, self.goal_source)?;
        writeln!(f, "EV Hold: {}", self.ev_hold)?;
        writeln!(f, "EV Cashout: {}", self.ev_cashout)?;
        write!(f, "Decision: {}", self.decision)
    }
}

/// An input failure formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedError {
    pub message: &'static str,
    pub color: DisplayColor,
}

impl From<&InputError> for RenderedError {
    fn from(_: &InputError) -> Self {
        Self {
            message: InputError::USER_MESSAGE,
            color: DisplayColor::Black,
        }
    }
}

impl fmt::Display for RenderedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}
