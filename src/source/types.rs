//! Snapshot source types

use crate::session::{RenderedError, RenderedResult};
use crate::snapshot::LayChoice;
use serde::Serialize;
use std::collections::HashMap;

/// A single request read from a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// Evaluate one set of raw input fields
    Evaluate {
        lay_choice: LayChoice,
        fields: HashMap<String, String>,
    },
    /// Start tracking a new match
    Reset,
}

/// What happened to one event
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    Evaluated(Box<RenderedResult>),
    Rejected(RenderedError),
    Reset,
}

/// Totals for one run over a source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub evaluated: usize,
    pub cash_outs: usize,
    pub rejected: usize,
    pub resets: usize,
}
