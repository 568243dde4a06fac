//! Watch command implementation

use super::print_outcome;
use crate::config::{Config, OutputFormat};
use crate::session::Session;
use crate::source::{drive, JsonLinesSource};
use clap::Args;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let format = self.format.unwrap_or(config.output.format);
        let mut source = JsonLinesSource::stdin();
        let mut session = Session::new(&config.momentum);
        tracing::info!(session = %session.id(), "Watching stdin for events");

        drive(&mut source, &mut session, |outcome| print_outcome(outcome, format)).await?;
        Ok(())
    }
}
