//! Parsing snapshots from text fields

use super::types::{
    check_count, check_magnitude, check_odds, FieldName, InputError, LayChoice, Snapshot,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

impl Snapshot {
    /// Parse a snapshot from a map of field name to raw text
    ///
    /// Values are trimmed before conversion. Counts and minutes must be
    /// non-negative integers; everything else is a decimal in plain or
    /// scientific notation. Odds must additionally be strictly positive.
    /// Values outside [`Snapshot::MAX_COUNT`] or [`Snapshot::MAX_MAGNITUDE`]
    /// are rejected. Unknown keys are ignored.
    pub fn from_fields(
        fields: &HashMap<String, String>,
        lay_choice: LayChoice,
    ) -> Result<Self, InputError> {
        for key in fields.keys() {
            if FieldName::lookup(key).is_none() {
                tracing::warn!(field = %key, "Ignoring unrecognized input field");
            }
        }

        let reader = FieldReader { fields };

        Ok(Snapshot {
            model_odds: reader.required_odds(FieldName::ModelOdds)?,
            bookmaker_odds: reader.odds(FieldName::BookmakerOdds)?,
            live_odds: reader.required_odds(FieldName::LiveOdds)?,
            sot_fav: reader.count(FieldName::SotFav)?,
            sot_underdog: reader.count(FieldName::SotUnderdog)?,
            match_time: reader.count(FieldName::MatchTime)?,
            fav_goals: reader.count(FieldName::FavGoals)?,
            underdog_goals: reader.count(FieldName::UnderdogGoals)?,
            xg_fav: reader.real(FieldName::XgFav)?,
            xg_underdog: reader.real(FieldName::XgUnderdog)?,
            possession_fav: reader.real(FieldName::PossessionFav)?,
            possession_underdog: reader.real(FieldName::PossessionUnderdog)?,
            lay_choice,
        })
    }
}

struct FieldReader<'a> {
    fields: &'a HashMap<String, String>,
}

impl FieldReader<'_> {
    fn raw(&self, field: FieldName) -> Option<&str> {
        self.fields.get(field.as_str()).map(|v| v.trim())
    }

    /// Text for `field`; `None` only for an absent or blank optional field
    fn text(&self, field: FieldName) -> Result<Option<&str>, InputError> {
        match self.raw(field) {
            None | Some("") if field.is_optional() => Ok(None),
            None => Err(InputError::MissingField(field)),
            Some(text) => Ok(Some(text)),
        }
    }

    fn required(&self, field: FieldName) -> Result<&str, InputError> {
        self.text(field)?.ok_or(InputError::MissingField(field))
    }

    fn count(&self, field: FieldName) -> Result<u32, InputError> {
        let text = self.required(field)?;
        let value = text.parse::<u32>().map_err(|_| InputError::InvalidNumber {
            field,
            value: text.to_string(),
        })?;
        check_count(field, value)
    }

    fn decimal(field: FieldName, text: &str) -> Result<Decimal, InputError> {
        parse_decimal(text).ok_or_else(|| InputError::InvalidNumber {
            field,
            value: text.to_string(),
        })
    }

    fn real(&self, field: FieldName) -> Result<Decimal, InputError> {
        check_magnitude(field, Self::decimal(field, self.required(field)?)?)
    }

    fn required_odds(&self, field: FieldName) -> Result<Decimal, InputError> {
        self.odds(field)?.ok_or(InputError::MissingField(field))
    }

    fn odds(&self, field: FieldName) -> Result<Option<Decimal>, InputError> {
        match self.text(field)? {
            Some(text) => check_odds(field, Self::decimal(field, text)?).map(Some),
            None => Ok(None),
        }
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
