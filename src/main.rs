use anyhow::Context;
use clap::Parser;
use inplay_cashout::cli::{Cli, Commands};
use inplay_cashout::config::Config;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Fall back to the bundled example when no config file exists
    let config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config).with_context(|| format!("Invalid config {}", cli.config))?
    } else {
        Config::parse(include_str!("../config.toml.example"))
            .context("Invalid bundled default config")?
    };

    inplay_cashout::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Evaluate(args) => {
            tracing::debug!("Evaluating single snapshot");
            args.execute(&config).await?;
        }
        Commands::Replay(args) => {
            args.execute(&config).await?;
        }
        Commands::Watch(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Momentum: capacity={}, decay={}",
                config.momentum.capacity, config.momentum.decay
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config
                    .telemetry
                    .metrics_port
                    .map_or_else(|| "disabled".to_string(), |p| p.to_string())
            );
            println!("  Output: {:?}", config.output.format);
        }
    }

    Ok(())
}
