//! Replay command implementation

use super::print_outcome;
use crate::config::{Config, OutputFormat};
use crate::session::Session;
use crate::source::{drive, JsonLinesSource};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON-lines file of evaluate / reset events
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print only the final summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl ReplayArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let format = self.format.unwrap_or(config.output.format);
        let mut source = JsonLinesSource::open(&self.input).await?;
        let mut session = Session::new(&config.momentum);
        tracing::info!(input = ?self.input, session = %session.id(), "Replaying events");

        let summary = drive(&mut source, &mut session, |outcome| {
            if self.quiet {
                Ok(())
            } else {
                print_outcome(outcome, format)
            }
        })
        .await?;

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&summary)?),
            OutputFormat::Table => println!(
                "Evaluated: {}  Cash outs: {}  Rejected: {}  Resets: {}",
                summary.evaluated, summary.cash_outs, summary.rejected, summary.resets
            ),
        }
        Ok(())
    }
}
