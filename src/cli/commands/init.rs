//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "reco-export.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set RECO_LICENSE_KEY in the environment or a .env file");
                println!("  3. Validate configuration: reco-export validate-config");
                println!("  4. Run export: reco-export export");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with comments
    pub fn sample_config() -> &'static str {
        r#"# reco-export configuration

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[export]
# Directory holding chunk directories and the lock marker
root_dir = "/var/lib/reco-export"

# Public URL under which root_dir is served
download_base_url = "https://cms.example.com/reco-export"

# Items per chunk file (1-10000)
page_size = 500

# Item types and languages to export
item_types = ["article", "blog_post"]
languages = ["eng-GB"]

# Chunk directory protection: none | user | basic
credentials_method = "basic"

# Site scope for the "user" method
# site_scope = "intranet"

# Format tag announced to the recommendation engine
format = "generic"

[recommendation]
# {customer_id} is replaced with customer_id below
endpoint = "https://reco.example.com/api/{customer_id}/items"
customer_id = "12345"
license_key = "${RECO_LICENSE_KEY}"
timeout_seconds = 30

# Credentials for the "user" method
# [credentials]
# login = "reco"
# password = "${RECO_EXPORT_PASSWORD}"
#
# [credentials.scopes.intranet]
# login = "reco-intranet"
# password = "${RECO_INTRANET_PASSWORD}"

# Item sources, queried in this order
[[sources]]
name = "articles"
path = "/var/lib/reco-export/fixtures/articles.json"

[logging]
local_enabled = false
local_path = "/var/log/reco-export"
# daily | hourly | never
local_rotation = "daily"
"#
    }
}
