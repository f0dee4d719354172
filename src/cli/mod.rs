//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for reco-export using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// reco-export - content export for recommendation engines
#[derive(Parser, Debug)]
#[command(name = "reco-export")]
#[command(version, about, long_about = None)]
#[command(author = "reco-export contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "reco-export.toml", env = "RECO_EXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RECO_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export items into secured chunks and notify the recommendation engine
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show the export lock state
    Status(commands::status::StatusArgs),

    /// Remove a stale export lock
    Unlock(commands::unlock::UnlockArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
