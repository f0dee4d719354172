//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the reco-export configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::core::credentials::{ConfigCredentialsResolver, ExportCredentialsDispatcher};
use clap::Args;
use std::sync::Arc;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let credentials = ExportCredentialsDispatcher::with_defaults(Arc::new(
            ConfigCredentialsResolver::new(config.credentials.clone()),
        ));
        if let Err(e) = credentials.ensure_supported(&config.export.credentials_method) {
            println!("❌ Configuration is invalid");
            println!("   Error: {e}");
            return Ok(EXIT_CONFIG);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Export root: {}", config.export.root_dir);
        println!("  Download URL: {}", config.export.download_base_url);
        println!("  Item types: {}", config.export.item_types.join(", "));
        println!("  Languages: {}", config.export.languages.join(", "));
        println!("  Page size: {}", config.export.page_size);
        println!("  Credentials method: {}", config.export.credentials_method);
        println!("  Recommendation endpoint: {}", config.recommendation.endpoint);
        println!("  Sources:");
        for source in &config.sources {
            println!("    - {} ({})", source.name, source.path);
        }
        println!();

        Ok(EXIT_OK)
    }
}
