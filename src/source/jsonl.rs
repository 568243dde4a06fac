//! JSON-lines event source
//!
//! One event per line:
//!
//! ```text
//! {"event": "evaluate", "lay_choice": "Underdog", "fields": {"model_odds": "2.0", "match_time": 61, ...}}
//! {"event": "reset"}
//! ```
//!
//! Field values may be JSON strings or numbers; both are handed to the
//! snapshot parser as text. A bare `reset` line is also accepted.

use super::{SnapshotSource, SourceEvent};
use crate::snapshot::LayChoice;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum RawEvent {
    Evaluate {
        lay_choice: LayChoice,
        fields: HashMap<String, Value>,
    },
    Reset,
}

fn field_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse one line; `None` for blank lines
fn parse_line(line: &str) -> anyhow::Result<Option<SourceEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case("reset") {
        return Ok(Some(SourceEvent::Reset));
    }

    let event = match serde_json::from_str::<RawEvent>(line)? {
        RawEvent::Evaluate { lay_choice, fields } => SourceEvent::Evaluate {
            lay_choice,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k, field_text(v)))
                .collect(),
        },
        RawEvent::Reset => SourceEvent::Reset,
    };
    Ok(Some(event))
}

/// Reads events line by line from any async buffered reader
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl JsonLinesSource<BufReader<tokio::fs::File>> {
    /// Open a JSON-lines file
    pub async fn open(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl JsonLinesSource<BufReader<Stdin>> {
    /// Read events from standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> SnapshotSource for JsonLinesSource<R> {
    async fn next_event(&mut self) -> anyhow::Result<Option<SourceEvent>> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;
            let parsed = parse_line(&line)
                .with_context(|| format!("Malformed event on line {}", self.line_no))?;
            if let Some(event) = parsed {
                tracing::debug!(line = self.line_no, "Read event");
                return Ok(Some(event));
            }
        }
        Ok(None)
    }
}
