//! Integration tests for JSON-lines replay

use inplay_cashout::session::Session;
use inplay_cashout::source::{drive, JsonLinesSource, Outcome, ReplaySummary};
use std::io::Write;

const SCENARIO_A: &str = r#"{"event": "evaluate", "lay_choice": "Favourite", "fields": {"model_odds": 2.0, "live_odds": 2.5, "sot_fav": 3, "sot_underdog": 2, "match_time": 50, "fav_goals": 1, "underdog_goals": 0, "xg_fav": 0.8, "xg_underdog": 0.5, "possession_fav": 55, "possession_underdog": 45}}"#;
const SCENARIO_B: &str = r#"{"event": "evaluate", "lay_choice": "Favourite", "fields": {"model_odds": "2.0", "live_odds": "2.5", "sot_fav": "3", "sot_underdog": "2", "match_time": "85", "fav_goals": "1", "underdog_goals": "0", "xg_fav": "0.8", "xg_underdog": "0.5", "possession_fav": "55", "possession_underdog": "45"}}"#;
const BAD_INPUT: &str = r#"{"event": "evaluate", "lay_choice": "Favourite", "fields": {"model_odds": "two"}}"#;

#[tokio::test]
async fn test_replay_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", SCENARIO_A).unwrap();
    writeln!(file, "{}", BAD_INPUT).unwrap();
    writeln!(file).unwrap();
    writeln!(file, r#"{{"event": "reset"}}"#).unwrap();
    writeln!(file, "{}", SCENARIO_B).unwrap();
    file.flush().unwrap();

    let mut source = JsonLinesSource::open(file.path()).await.unwrap();
    let mut session = Session::default();
    let mut decisions = Vec::new();

    let summary = drive(&mut source, &mut session, |outcome| {
        match outcome {
            Outcome::Evaluated(result) => decisions.push(result.decision.clone()),
            Outcome::Rejected(error) => decisions.push(error.message.to_string()),
            Outcome::Reset => decisions.push("reset".to_string()),
        }
        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(
        summary,
        ReplaySummary {
            evaluated: 2,
            cash_outs: 1,
            rejected: 1,
            resets: 1,
        }
    );
    assert_eq!(
        decisions,
        vec![
            "Hold",
            "Please enter valid numerical values.",
            "reset",
            "Cash Out"
        ]
    );
    assert_eq!(session.tracker().len(), 1);
}

#[tokio::test]
async fn test_malformed_line_stops_replay() {
    let input = format!("{}\nnot json\n{}\n", SCENARIO_A, SCENARIO_B);
    let mut source = JsonLinesSource::new(input.as_bytes());
    let mut session = Session::default();

    let result = drive(&mut source, &mut session, |_| Ok(())).await;
    assert!(result.is_err());
    assert_eq!(session.tracker().len(), 1);
}

#[tokio::test]
async fn test_outcomes_serialize() {
    let input = format!("{}\nreset\n", SCENARIO_A);
    let mut source = JsonLinesSource::new(input.as_bytes());
    let mut session = Session::default();
    let mut json = Vec::new();

    drive(&mut source, &mut session, |outcome| {
        json.push(serde_json::to_value(outcome)?);
        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(json[0]["outcome"], "evaluated");
    assert_eq!(json[0]["decision"], "Hold");
    assert_eq!(json[0]["color"], "green");
    assert_eq!(json[1]["outcome"], "reset");
}

#[tokio::test]
async fn test_missing_file_errors() {
    assert!(JsonLinesSource::open("/nonexistent/events.jsonl").await.is_err());
}
