//! autolinear CLI entry point.

use anyhow::Result;
use clap::Parser;

use autolinear::cli::{commands, Cli, Commands};
use autolinear::domain::models::Config;
use autolinear::infrastructure::config::ConfigLoader;
use autolinear::infrastructure::logging::LoggerImpl;

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from(path),
        None => ConfigLoader::load(),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => autolinear::cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => autolinear::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Run(args) => commands::run::execute(args, &config, cli.json).await,
        Commands::Prompt => commands::prompt::execute(cli.json),
    };

    if let Err(err) = result {
        autolinear::cli::handle_error(err, cli.json);
    }
}
