//! End-to-end integration tests

use inplay_cashout::config::{Config, OutputFormat};
use inplay_cashout::session::{DisplayColor, Session};
use inplay_cashout::snapshot::LayChoice;
use rust_decimal_macros::dec;
use std::collections::HashMap;

#[test]
fn test_config_example_exists() {
    let config = Config::parse(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.momentum.capacity, 5);
    assert_eq!(config.momentum.decay, dec!(0.6));
    assert_eq!(config.output.format, OutputFormat::Table);
}

#[test]
fn test_configured_session_evaluates() {
    let config = Config::parse(
        r#"
        [momentum]
        capacity = 2
        decay = 0.5
        "#,
    )
    .unwrap();
    let mut session = Session::new(&config.momentum);

    let fields: HashMap<String, String> = [
        ("model_odds", "3.4"),
        ("bookmaker_odds", "3.25"),
        ("live_odds", "2.1"),
        ("sot_fav", "4"),
        ("sot_underdog", "4"),
        ("match_time", "70"),
        ("fav_goals", "1"),
        ("underdog_goals", "1"),
        ("xg_fav", "1.1"),
        ("xg_underdog", "0.9"),
        ("possession_fav", "58"),
        ("possession_underdog", "42"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for _ in 0..3 {
        let result = session.evaluate_position(&fields, LayChoice::Draw).unwrap();
        assert_eq!(result.decision, "Hold");
        assert_eq!(result.color, DisplayColor::Green);
        assert!(result.text().contains("Bookmaker Edge:"));
    }
    assert_eq!(session.tracker().len(), 2);
}
