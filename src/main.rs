// reco-export - Content export for recommendation engines
// Copyright (c) 2025 reco-export Contributors
// Licensed under the MIT License

use clap::Parser;
use reco_export::cli::commands::EXIT_FATAL;
use reco_export::cli::{Cli, Commands};
use reco_export::config::{load_config, LoggingConfig};
use reco_export::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Optional .env file; a missing file is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Init runs before a config file exists, everything else picks its
    // log level and file logging from the config when it loads
    let file_config = match &cli.command {
        Commands::Init(_) => None,
        _ => load_config(&cli.config).ok(),
    };
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = file_config
        .map(|c| c.logging)
        .unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "reco-export - Content export for recommendation engines"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors, flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
        Commands::Unlock(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
