//! Evaluate command implementation

use super::print_outcome;
use crate::config::{Config, OutputFormat};
use crate::session::{RenderedError, Session};
use crate::snapshot::{FieldName, LayChoice};
use crate::source::Outcome;
use clap::Args;
use std::collections::HashMap;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Model decimal odds for the laid outcome
    #[arg(long, allow_hyphen_values = true)]
    pub model_odds: String,

    /// Pre-match bookmaker odds (informational)
    #[arg(long, allow_hyphen_values = true)]
    pub bookmaker_odds: Option<String>,

    /// Current in-play decimal odds
    #[arg(long, allow_hyphen_values = true)]
    pub live_odds: String,

    /// Favourite shots on target
    #[arg(long, allow_hyphen_values = true)]
    pub sot_fav: String,

    /// Underdog shots on target
    #[arg(long, allow_hyphen_values = true)]
    pub sot_underdog: String,

    /// Minutes elapsed
    #[arg(long, allow_hyphen_values = true)]
    pub match_time: String,

    #[arg(long, allow_hyphen_values = true)]
    pub fav_goals: String,

    #[arg(long, allow_hyphen_values = true)]
    pub underdog_goals: String,

    /// Favourite expected goals
    #[arg(long, allow_hyphen_values = true)]
    pub xg_fav: String,

    /// Underdog expected goals
    #[arg(long, allow_hyphen_values = true)]
    pub xg_underdog: String,

    /// Favourite possession percentage
    #[arg(long, allow_hyphen_values = true)]
    pub possession_fav: String,

    /// Underdog possession percentage
    #[arg(long, allow_hyphen_values = true)]
    pub possession_underdog: String,

    /// Side the position is laid on
    #[arg(long, value_enum, default_value = "favourite")]
    pub lay: LayChoice,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl EvaluateArgs {
    /// Raw field map as a form would submit it
    pub fn fields(&self) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        for field in FieldName::ALL {
            let value = match field {
                FieldName::ModelOdds => Some(&self.model_odds),
                FieldName::BookmakerOdds => self.bookmaker_odds.as_ref(),
                FieldName::LiveOdds => Some(&self.live_odds),
                FieldName::SotFav => Some(&self.sot_fav),
                FieldName::SotUnderdog => Some(&self.sot_underdog),
                FieldName::MatchTime => Some(&self.match_time),
                FieldName::FavGoals => Some(&self.fav_goals),
                FieldName::UnderdogGoals => Some(&self.underdog_goals),
                FieldName::XgFav => Some(&self.xg_fav),
                FieldName::XgUnderdog => Some(&self.xg_underdog),
                FieldName::PossessionFav => Some(&self.possession_fav),
                FieldName::PossessionUnderdog => Some(&self.possession_underdog),
            };
            if let Some(value) = value {
                fields.insert(field.as_str().to_string(), value.clone());
            }
        }
        fields
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let format = self.format.unwrap_or(config.output.format);
        let mut session = Session::new(&config.momentum);

        match session.evaluate_position(&self.fields(), self.lay) {
            Ok(result) => print_outcome(&Outcome::Evaluated(Box::new(result)), format),
            Err(e) => {
                print_outcome(&Outcome::Rejected(RenderedError::from(&e)), format)?;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn argv(overrides: &[(&'static str, &'static str)]) -> Vec<&'static str> {
        let mut flags = vec![
            ("--model-odds", "2.0"),
            ("--live-odds", "2.5"),
            ("--sot-fav", "3"),
            ("--sot-underdog", "2"),
            ("--match-time", "50"),
            ("--fav-goals", "1"),
            ("--underdog-goals", "0"),
            ("--xg-fav", "0.8"),
            ("--xg-underdog", "0.5"),
            ("--possession-fav", "55"),
            ("--possession-underdog", "45"),
        ];
        for &(flag, value) in overrides {
            match flags.iter_mut().find(|(f, _)| *f == flag) {
                Some(slot) => slot.1 = value,
                None => flags.push((flag, value)),
            }
        }

        let mut argv = vec!["inplay-cashout", "evaluate"];
        for (flag, value) in flags {
            argv.push(flag);
            argv.push(value);
        }
        argv
    }

    fn parse(overrides: &[(&'static str, &'static str)]) -> EvaluateArgs {
        match Cli::parse_from(argv(overrides)).command {
            Commands::Evaluate(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_fields_from_flags() {
        let args = parse(&[]);
        let fields = args.fields();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields["live_odds"], "2.5");
        assert!(!fields.contains_key("bookmaker_odds"));
        assert_eq!(args.lay, LayChoice::Favourite);
    }

    #[test]
    fn test_optional_flags() {
        let args = parse(&[
            ("--bookmaker-odds", "2.2"),
            ("--lay", "underdog"),
            ("--format", "json"),
        ]);
        assert_eq!(args.fields()["bookmaker_odds"], "2.2");
        assert_eq!(args.lay, LayChoice::Underdog);
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_negative_value_reaches_parser() {
        let args = parse(&[("--fav-goals", "-1")]);
        assert_eq!(args.fields()["fav_goals"], "-1");
    }

    #[test]
    fn test_unknown_lay_rejected_by_cli() {
        assert!(Cli::try_parse_from(argv(&[("--lay", "draw")])).is_ok());
        assert!(Cli::try_parse_from(argv(&[("--lay", "home")])).is_err());
    }
}
