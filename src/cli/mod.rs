//! CLI interface for inplay-cashout
//!
//! Provides subcommands for:
//! - `evaluate`: One-off evaluation from flags
//! - `replay`: Evaluate a JSON-lines file of events in one session
//! - `watch`: Evaluate JSON-lines events from stdin as they arrive
//! - `config`: Show effective configuration

mod evaluate;
mod output;
mod replay;
mod watch;

pub use evaluate::EvaluateArgs;
pub use output::print_outcome;
pub use replay::ReplayArgs;
pub use watch::WatchArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "inplay-cashout")]
#[command(about = "Hold / cash-out decisions for live in-play lay positions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a single snapshot
    Evaluate(EvaluateArgs),
    /// Evaluate a file of events in one session
    Replay(ReplayArgs),
    /// Evaluate events from stdin in one session
    Watch(WatchArgs),
    /// Show effective configuration
    Config,
}
