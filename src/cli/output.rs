//! Result printing

use crate::config::OutputFormat;
use crate::source::Outcome;

/// Print one outcome to stdout in the requested format
pub fn print_outcome(outcome: &Outcome, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(outcome)?),
        OutputFormat::Table => match outcome {
            Outcome::Evaluated(result) => println!("{}\n", result.text()),
            Outcome::Rejected(error) => println!("{}\n", error),
            Outcome::Reset => println!("-- session reset --\n"),
        },
    }
    Ok(())
}
