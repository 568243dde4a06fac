//! Snapshot types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which side of the match the position holds a liability on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum LayChoice {
    /// Laid the favourite to win
    #[serde(alias = "favourite")]
    Favourite,
    /// Laid the underdog to win
    #[serde(alias = "underdog")]
    Underdog,
    /// Laid the draw
    #[serde(alias = "draw")]
    Draw,
}

impl LayChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayChoice::Favourite => "Favourite",
            LayChoice::Underdog => "Underdog",
            LayChoice::Draw => "Draw",
        }
    }
}

impl fmt::Display for LayChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lay choice outside {Favourite, Underdog, Draw}
///
/// This is a caller contract violation rather than bad user input, so it is
/// kept apart from [`InputError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown lay choice: {0:?} (expected Favourite, Underdog or Draw)")]
pub struct UnknownLayChoice(pub String);

impl FromStr for LayChoice {
    type Err = UnknownLayChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Favourite" | "favourite" => Ok(LayChoice::Favourite),
            "Underdog" | "underdog" => Ok(LayChoice::Underdog),
            "Draw" | "draw" => Ok(LayChoice::Draw),
            other => Err(UnknownLayChoice(other.to_string())),
        }
    }
}

/// Recognized input field names, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    ModelOdds,
    BookmakerOdds,
    LiveOdds,
    SotFav,
    SotUnderdog,
    MatchTime,
    FavGoals,
    UnderdogGoals,
    XgFav,
    XgUnderdog,
    PossessionFav,
    PossessionUnderdog,
}

impl FieldName {
    /// Every field in display order
    pub const ALL: [FieldName; 12] = [
        FieldName::ModelOdds,
        FieldName::BookmakerOdds,
        FieldName::LiveOdds,
        FieldName::SotFav,
        FieldName::SotUnderdog,
        FieldName::MatchTime,
        FieldName::FavGoals,
        FieldName::UnderdogGoals,
        FieldName::XgFav,
        FieldName::XgUnderdog,
        FieldName::PossessionFav,
        FieldName::PossessionUnderdog,
    ];

    /// Key used in field maps
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::ModelOdds => "model_odds",
            FieldName::BookmakerOdds => "bookmaker_odds",
            FieldName::LiveOdds => "live_odds",
            FieldName::SotFav => "sot_fav",
            FieldName::SotUnderdog => "sot_underdog",
            FieldName::MatchTime => "match_time",
            FieldName::FavGoals => "fav_goals",
            FieldName::UnderdogGoals => "underdog_goals",
            FieldName::XgFav => "xg_fav",
            FieldName::XgUnderdog => "xg_underdog",
            FieldName::PossessionFav => "possession_fav",
            FieldName::PossessionUnderdog => "possession_underdog",
        }
    }

    /// Optional fields may be absent or blank in the input map
    pub fn is_optional(&self) -> bool {
        matches!(self, FieldName::BookmakerOdds)
    }

    pub fn lookup(key: &str) -> Option<FieldName> {
        FieldName::ALL.iter().copied().find(|f| f.as_str() == key)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input parse errors
///
/// Every variant aborts the evaluation atomically. The display boundary does
/// not attribute errors to fields; the detail is for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A required field was not supplied
    #[error("Missing field: {0}")]
    MissingField(FieldName),
    /// Field text did not convert to the required numeric type
    #[error("Invalid value for {field}: {value:?}")]
    InvalidNumber { field: FieldName, value: String },
    /// Odds of zero or below cannot be converted to an implied probability
    #[error("Odds must be positive: {field} = {value}")]
    NonPositiveOdds { field: FieldName, value: Decimal },
    /// Value parsed but lies outside the range the model accepts
    #[error("Value out of range for {field}: {value}")]
    OutOfRange { field: FieldName, value: String },
}

impl InputError {
    /// Fixed user-visible message for any input failure
    pub const USER_MESSAGE: &'static str = "Please enter valid numerical values.";

    pub fn field(&self) -> FieldName {
        match self {
            InputError::MissingField(field) => *field,
            InputError::InvalidNumber { field, .. } => *field,
            InputError::NonPositiveOdds { field, .. } => *field,
            InputError::OutOfRange { field, .. } => *field,
        }
    }
}

/// One evaluation's inputs
///
/// Usually built through [`Snapshot::from_fields`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Decimal odds the model prices the laid outcome at
    pub model_odds: Decimal,
    /// Pre-match bookmaker odds, informational only
    pub bookmaker_odds: Option<Decimal>,
    /// Current in-play decimal odds
    pub live_odds: Decimal,
    /// Shots on target by the favourite
    pub sot_fav: u32,
    /// Shots on target by the underdog
    pub sot_underdog: u32,
    /// Minutes elapsed
    pub match_time: u32,
    pub fav_goals: u32,
    pub underdog_goals: u32,
    /// Expected goals for the favourite
    pub xg_fav: Decimal,
    /// Expected goals for the underdog
    pub xg_underdog: Decimal,
    /// Possession percentage, favourite
    pub possession_fav: Decimal,
    /// Possession percentage, underdog (need not sum to 100 with the favourite's)
    pub possession_underdog: Decimal,
    /// Side the position is laid on
    pub lay_choice: LayChoice,
}

impl Snapshot {
    /// Largest accepted count or minute
    pub const MAX_COUNT: u32 = 100_000;
    /// Largest accepted magnitude for any real-valued field
    pub const MAX_MAGNITUDE: Decimal = dec!(1000000);

    /// Check every field against the accepted ranges
    ///
    /// Within these bounds no step of the evaluation can overflow.
    pub fn validate(&self) -> Result<(), InputError> {
        let counts = [
            (FieldName::SotFav, self.sot_fav),
            (FieldName::SotUnderdog, self.sot_underdog),
            (FieldName::MatchTime, self.match_time),
            (FieldName::FavGoals, self.fav_goals),
            (FieldName::UnderdogGoals, self.underdog_goals),
        ];
        for (field, value) in counts {
            check_count(field, value)?;
        }

        for (field, value) in [
            (FieldName::ModelOdds, self.model_odds),
            (FieldName::LiveOdds, self.live_odds),
        ] {
            check_odds(field, value)?;
        }
        if let Some(odds) = self.bookmaker_odds {
            check_odds(FieldName::BookmakerOdds, odds)?;
        }

        for (field, value) in [
            (FieldName::XgFav, self.xg_fav),
            (FieldName::XgUnderdog, self.xg_underdog),
            (FieldName::PossessionFav, self.possession_fav),
            (FieldName::PossessionUnderdog, self.possession_underdog),
        ] {
            check_magnitude(field, value)?;
        }
        Ok(())
    }

    pub fn total_sot(&self) -> u32 {
        self.sot_fav.saturating_add(self.sot_underdog)
    }

    pub fn combined_xg(&self) -> Decimal {
        self.xg_fav.saturating_add(self.xg_underdog)
    }

    pub fn is_level(&self) -> bool {
        self.fav_goals == self.underdog_goals
    }
}

pub(crate) fn check_count(field: FieldName, value: u32) -> Result<u32, InputError> {
    if value > Snapshot::MAX_COUNT {
        return Err(InputError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn check_magnitude(field: FieldName, value: Decimal) -> Result<Decimal, InputError> {
    if value.abs() > Snapshot::MAX_MAGNITUDE {
        return Err(InputError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn check_odds(field: FieldName, value: Decimal) -> Result<Decimal, InputError> {
    if value <= Decimal::ZERO {
        return Err(InputError::NonPositiveOdds { field, value });
    }
    check_magnitude(field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lay_choice_from_str() {
        assert_eq!("Favourite".parse::<LayChoice>(), Ok(LayChoice::Favourite));
        assert_eq!("underdog".parse::<LayChoice>(), Ok(LayChoice::Underdog));
        assert_eq!(" Draw ".parse::<LayChoice>(), Ok(LayChoice::Draw));
    }

    #[test]
    fn test_lay_choice_rejects_unknown() {
        let err = "Home".parse::<LayChoice>().unwrap_err();
        assert_eq!(err, UnknownLayChoice("Home".to_string()));
    }

    #[test]
    fn test_lay_choice_serde() {
        let choice: LayChoice = serde_json::from_str("\"Underdog\"").unwrap();
        assert_eq!(choice, LayChoice::Underdog);
        assert!(serde_json::from_str::<LayChoice>("\"Away\"").is_err());
    }

    #[test]
    fn test_field_name_lookup() {
        for field in FieldName::ALL {
            assert_eq!(FieldName::lookup(field.as_str()), Some(field));
        }
        assert_eq!(FieldName::lookup("corners"), None);
    }

    #[test]
    fn test_only_bookmaker_odds_optional() {
        let optional: Vec<_> = FieldName::ALL.iter().filter(|f| f.is_optional()).collect();
        assert_eq!(optional, vec![&FieldName::BookmakerOdds]);
    }

    fn valid_snapshot() -> Snapshot {
        Snapshot {
            model_odds: dec!(2.0),
            bookmaker_odds: Some(dec!(2.2)),
            live_odds: dec!(2.5),
            sot_fav: 3,
            sot_underdog: 2,
            match_time: 50,
            fav_goals: 1,
            underdog_goals: 0,
            xg_fav: dec!(0.8),
            xg_underdog: dec!(0.5),
            possession_fav: dec!(55),
            possession_underdog: dec!(45),
            lay_choice: LayChoice::Favourite,
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let mut snapshot = valid_snapshot();
        assert_eq!(snapshot.validate(), Ok(()));

        snapshot.sot_fav = Snapshot::MAX_COUNT;
        snapshot.sot_underdog = Snapshot::MAX_COUNT;
        snapshot.xg_fav = Snapshot::MAX_MAGNITUDE;
        snapshot.possession_underdog = -Snapshot::MAX_MAGNITUDE;
        assert_eq!(snapshot.validate(), Ok(()));
        assert_eq!(snapshot.total_sot(), 2 * Snapshot::MAX_COUNT);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut snapshot = valid_snapshot();
        snapshot.sot_fav = u32::MAX;
        assert_eq!(
            snapshot.validate(),
            Err(InputError::OutOfRange {
                field: FieldName::SotFav,
                value: u32::MAX.to_string(),
            })
        );

        let mut snapshot = valid_snapshot();
        snapshot.xg_underdog = Decimal::MAX;
        assert_eq!(snapshot.validate().unwrap_err().field(), FieldName::XgUnderdog);

        let mut snapshot = valid_snapshot();
        snapshot.bookmaker_odds = Some(dec!(0));
        assert!(matches!(
            snapshot.validate(),
            Err(InputError::NonPositiveOdds {
                field: FieldName::BookmakerOdds,
                ..
            })
        ));
    }

    #[test]
    fn test_input_error_field() {
        let err = InputError::NonPositiveOdds {
            field: FieldName::LiveOdds,
            value: dec!(0),
        };
        assert_eq!(err.field(), FieldName::LiveOdds);
        assert!(err.to_string().contains("live_odds"));
    }
}
