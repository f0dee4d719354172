//! Configuration management for reco-export.
//!
//! reco-export reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RECO_EXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! root_dir = "/var/lib/reco-export"
//! download_base_url = "https://cms.example.com/reco-export"
//! page_size = 500
//! item_types = ["article", "blog_post"]
//! languages = ["eng-GB", "ger-DE"]
//! credentials_method = "basic"
//!
//! [recommendation]
//! endpoint = "https://reco.example.com/api/{customer_id}/items"
//! customer_id = "12345"
//! license_key = "${RECO_LICENSE_KEY}"
//!
//! [[sources]]
//! name = "articles"
//! path = "/var/lib/reco-export/fixtures/articles.json"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CredentialsConfig, ExportConfig, LoggingConfig, RecoConfig,
    RecommendationConfig, ScopeCredentials, SourceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
