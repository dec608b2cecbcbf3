//! firebase-env CLI entry point.

use anyhow::Result;
use clap::Parser;

use firebase_env::cli::{commands, Cli, Commands};
use firebase_env::infrastructure::logging::{LogConfig, LoggerImpl};
use firebase_env::services::CredentialExporter;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(&cli) {
        firebase_env::cli::handle_error(err, json);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;
    let exporter = CredentialExporter::from_config(&config);

    match cli.command() {
        Commands::Export => commands::export::execute(&exporter, cli.json),
        Commands::Verify => commands::verify::execute(&exporter, cli.json),
    }
}
