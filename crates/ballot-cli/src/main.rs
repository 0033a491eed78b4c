//! Ballot CLI - Command-line interface for the delegated voting ledger.
//!
//! Deploys a ballot to a local data directory and drives it: granting
//! rights, delegating, voting and reading results.

pub mod accounts;
pub mod commands;
pub mod config;
pub mod output;
pub mod telemetry;
pub mod tests;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    let config = match config::CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&format!("failed to load config: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = telemetry::init_telemetry(&config.log_level, cli.verbose) {
        output::print_warning(&format!("Logging disabled: {}", e));
    }

    if let Err(e) = commands::execute(cli, config).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
