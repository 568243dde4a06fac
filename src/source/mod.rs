//! Snapshot source module
//!
//! Streams of evaluation requests for a session: JSON lines from a file or
//! stdin. Each line asks for one evaluation or a session reset.

mod jsonl;
mod types;

pub use jsonl::JsonLinesSource;
pub use types::{Outcome, ReplaySummary, SourceEvent};

use crate::session::{RenderedError, Session};
use async_trait::async_trait;

/// Trait for event source implementations
#[async_trait]
pub trait SnapshotSource: Send {
    /// Next event, or `None` once the source is exhausted
    async fn next_event(&mut self) -> anyhow::Result<Option<SourceEvent>>;
}

/// Feed every event from `source` through `session`
///
/// Input errors are reported through `on_outcome` and do not stop the run;
/// a malformed event line does.
pub async fn drive<S, F>(
    source: &mut S,
    session: &mut Session,
    mut on_outcome: F,
) -> anyhow::Result<ReplaySummary>
where
    S: SnapshotSource + ?Sized,
    F: FnMut(&Outcome) -> anyhow::Result<()>,
{
    let mut summary = ReplaySummary::default();

    while let Some(event) = source.next_event().await? {
        let outcome = match event {
            SourceEvent::Evaluate { lay_choice, fields } => {
                match session.evaluate_position(&fields, lay_choice) {
                    Ok(result) => {
                        summary.evaluated += 1;
                        if !result.raw.is_hold() {
                            summary.cash_outs += 1;
                        }
                        Outcome::Evaluated(Box::new(result))
                    }
                    Err(e) => {
                        summary.rejected += 1;
                        Outcome::Rejected(RenderedError::from(&e))
                    }
                }
            }
            SourceEvent::Reset => {
                session.reset_session();
                summary.resets += 1;
                Outcome::Reset
            }
        };
        on_outcome(&outcome)?;
    }

    tracing::info!(
        session = %session.id(),
        evaluated = summary.evaluated,
        cash_outs = summary.cash_outs,
        rejected = summary.rejected,
        resets = summary.resets,
        "Source exhausted"
    );

    Ok(summary)
}
