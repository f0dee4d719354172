//! Status command implementation
//!
//! This module implements the `status` command, which reports whether an
//! export currently holds the lock on the export root.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::config::load_config;
use crate::core::files::FileManager;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let files = FileManager::new(&config.export.root_dir);
        println!("📊 Export Status");
        println!("  Export root: {}", files.root().display());

        match files.lock_holder() {
            Ok(Some(holder)) => {
                println!("  State: 🔒 locked");
                println!("  Holder: {holder}");
                println!();
                println!("If no export is running, clear the lock with 'reco-export unlock'.");
            }
            Ok(None) => println!("  State: idle"),
            Err(e) => {
                println!("❌ Failed to read lock marker");
                println!("   Error: {e}");
                return Ok(EXIT_FATAL);
            }
        }

        Ok(EXIT_OK)
    }
}
