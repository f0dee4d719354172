//! Unlock command implementation
//!
//! Removes the lock marker left behind by an export that did not exit
//! cleanly.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::config::load_config;
use crate::core::files::FileManager;
use clap::Args;

/// Arguments for the unlock command
#[derive(Args, Debug)]
pub struct UnlockArgs {}

impl UnlockArgs {
    /// Execute the unlock command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let files = FileManager::new(&config.export.root_dir);
        match files.unlock() {
            Ok(true) => println!("✅ Export lock removed"),
            Ok(false) => println!("Export root is not locked"),
            Err(e) => {
                println!("❌ Failed to remove export lock");
                println!("   Error: {e}");
                return Ok(EXIT_FATAL);
            }
        }

        Ok(EXIT_OK)
    }
}
