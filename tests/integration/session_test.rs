//! Integration tests for the evaluation session boundary

use inplay_cashout::decision::{DecisionLabel, GoalSource};
use inplay_cashout::momentum::MomentumConfig;
use inplay_cashout::session::{DisplayColor, RenderedError, Session};
use inplay_cashout::snapshot::{InputError, LayChoice};
use rust_decimal_macros::dec;
use std::collections::HashMap;

fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn scenario_a() -> HashMap<String, String> {
    fields(&[
        ("model_odds", "2.0"),
        ("live_odds", "2.5"),
        ("sot_fav", "3"),
        ("sot_underdog", "2"),
        ("match_time", "50"),
        ("fav_goals", "1"),
        ("underdog_goals", "0"),
        ("xg_fav", "0.8"),
        ("xg_underdog", "0.5"),
        ("possession_fav", "55"),
        ("possession_underdog", "45"),
    ])
}

/// Level game, underdog pressing, no late-game rules in play
fn early_game(sot_underdog: &str) -> HashMap<String, String> {
    fields(&[
        ("model_odds", "4.0"),
        ("live_odds", "5.0"),
        ("sot_fav", "2"),
        ("sot_underdog", sot_underdog),
        ("match_time", "25"),
        ("fav_goals", "0"),
        ("underdog_goals", "0"),
        ("xg_fav", "0.6"),
        ("xg_underdog", "0.4"),
        ("possession_fav", "52"),
        ("possession_underdog", "48"),
    ])
}

#[test]
fn test_scenario_a_rendered() {
    let mut session = Session::default();
    let result = session
        .evaluate_position(&scenario_a(), LayChoice::Favourite)
        .unwrap();

    assert_eq!(result.updated_edge, "-0.1000");
    assert_eq!(result.p_goal, "21.10%");
    assert_eq!(result.goal_source, "Favourite");
    assert_eq!(result.ev_hold, "0.2101");
    assert_eq!(result.ev_cashout, "0.4000");
    assert_eq!(result.decision, "Hold");
    assert_eq!(result.color, DisplayColor::Green);
    assert_eq!(result.raw.goal_source, GoalSource::Favourite);
}

#[test]
fn test_scenario_b_cash_out() {
    let mut input = scenario_a();
    input.insert("match_time".into(), "85".into());

    let mut session = Session::default();
    let result = session
        .evaluate_position(&input, LayChoice::Favourite)
        .unwrap();

    assert!(result.raw.p_goal < dec!(0.12));
    assert_eq!(result.raw.label, DecisionLabel::CashOut);
    assert_eq!(result.decision, "Cash Out");
    assert_eq!(result.color, DisplayColor::Red);
}

#[test]
fn test_invalid_input_is_atomic() {
    let mut session = Session::default();
    session
        .evaluate_position(&scenario_a(), LayChoice::Favourite)
        .unwrap();

    let mut bad = scenario_a();
    bad.insert("sot_fav".into(), "three".into());
    let err = session
        .evaluate_position(&bad, LayChoice::Favourite)
        .unwrap_err();

    let rendered = RenderedError::from(&err);
    assert_eq!(rendered.message, "Please enter valid numerical values.");
    assert_eq!(rendered.color, DisplayColor::Black);
    assert_eq!(session.tracker().len(), 1);
}

#[test]
fn test_zero_odds_rejected_without_recording() {
    let mut session = Session::default();
    let mut bad = scenario_a();
    bad.insert("model_odds".into(), "0".into());

    assert!(matches!(
        session.evaluate_position(&bad, LayChoice::Favourite),
        Err(InputError::NonPositiveOdds { .. })
    ));
    assert!(session.tracker().is_empty());
}

#[test]
fn test_overflowing_values_rejected_without_recording() {
    let mut session = Session::default();
    session
        .evaluate_position(&scenario_a(), LayChoice::Favourite)
        .unwrap();

    let mut shots = scenario_a();
    shots.insert("sot_fav".into(), "4294967295".into());
    shots.insert("sot_underdog".into(), "1".into());

    let mut xg = scenario_a();
    xg.insert("xg_fav".into(), "79228162514264337593543950335".into());
    xg.insert("xg_underdog".into(), "79228162514264337593543950335".into());

    for fields in [shots, xg] {
        let err = session
            .evaluate_position(&fields, LayChoice::Favourite)
            .unwrap_err();
        assert!(matches!(err, InputError::OutOfRange { .. }));

        let rendered = RenderedError::from(&err);
        assert_eq!(rendered.message, "Please enter valid numerical values.");
        assert_eq!(rendered.color, DisplayColor::Black);
    }
    assert_eq!(session.tracker().len(), 1);
}

#[test]
fn test_momentum_builds_across_calls() {
    let mut session = Session::default();

    let first = session
        .evaluate_position(&early_game("1"), LayChoice::Underdog)
        .unwrap();
    assert_eq!(first.raw.label, DecisionLabel::Hold);

    // Underdog shots 1 -> 3 against a single prior entry: rate 2 > 0.75
    let second = session
        .evaluate_position(&early_game("3"), LayChoice::Underdog)
        .unwrap();
    assert_eq!(second.raw.label, DecisionLabel::CashOutUnderdogGaining);
    assert_eq!(second.decision, "Cash Out (Underdog Gaining Quickly)");
    assert_eq!(second.color, DisplayColor::Red);

    // Prior average (3 + 0.6 * 1) / 1.6 = 2.25; rate 0.75 is not above 0.75
    let third = session
        .evaluate_position(&early_game("3"), LayChoice::Underdog)
        .unwrap();
    assert_eq!(third.raw.label, DecisionLabel::Hold);
}

#[test]
fn test_momentum_ignored_for_draw_lay() {
    let mut session = Session::default();
    session
        .evaluate_position(&early_game("0"), LayChoice::Draw)
        .unwrap();
    let result = session
        .evaluate_position(&early_game("6"), LayChoice::Draw)
        .unwrap();
    assert_eq!(result.raw.label, DecisionLabel::Hold);
}

#[test]
fn test_reset_forgets_momentum() {
    let mut session = Session::default();
    session
        .evaluate_position(&early_game("1"), LayChoice::Underdog)
        .unwrap();
    session.reset_session();

    let result = session
        .evaluate_position(&early_game("3"), LayChoice::Underdog)
        .unwrap();
    assert_eq!(result.raw.label, DecisionLabel::Hold);
}

#[test]
fn test_history_bounded_by_capacity() {
    let mut session = Session::new(&MomentumConfig {
        capacity: 3,
        decay: dec!(0.6),
    });

    for minute in 10..17 {
        let mut input = early_game("1");
        input.insert("match_time".into(), minute.to_string());
        session
            .evaluate_position(&input, LayChoice::Draw)
            .unwrap();
    }

    let minutes: Vec<u32> = session.tracker().snapshots().map(|s| s.match_time).collect();
    assert_eq!(minutes, vec![14, 15, 16]);
}

#[test]
fn test_probability_always_in_range() {
    let mut session = Session::default();
    for minute in ["0", "30", "60", "90", "120"] {
        for (sot, xg) in [("0", "0"), ("25", "6.5")] {
            let input = fields(&[
                ("model_odds", "1.8"),
                ("live_odds", "1.3"),
                ("sot_fav", sot),
                ("sot_underdog", sot),
                ("match_time", minute),
                ("fav_goals", "3"),
                ("underdog_goals", "0"),
                ("xg_fav", xg),
                ("xg_underdog", "0"),
                ("possession_fav", "70"),
                ("possession_underdog", "30"),
            ]);
            let result = session
                .evaluate_position(&input, LayChoice::Favourite)
                .unwrap();
            assert!(result.raw.p_goal >= dec!(0) && result.raw.p_goal <= dec!(1));
        }
    }
}
