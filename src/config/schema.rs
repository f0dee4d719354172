//! Configuration schema types
//!
//! This module defines the configuration structure for reco-export.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main reco-export configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export pipeline settings
    pub export: ExportConfig,

    /// Recommendation engine connection
    pub recommendation: RecommendationConfig,

    /// Credentials for the `user` securing method
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Data sources, queried in the order listed
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RecoConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.recommendation.validate()?;
        self.credentials.validate()?;

        if self.sources.is_empty() {
            return Err("at least one [[sources]] entry is required".to_string());
        }
        let mut names: Vec<&str> = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            source.validate()?;
            if names.contains(&source.name.as_str()) {
                return Err(format!("duplicate source name '{}'", source.name));
            }
            names.push(&source.name);
        }

        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Export pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Root directory holding chunk directories and the lock marker
    pub root_dir: String,

    /// Public URL under which `root_dir` is served
    pub download_base_url: String,

    /// Items per chunk file
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Item-type identifiers to export
    #[serde(default)]
    pub item_types: Vec<String>,

    /// Languages to export
    #[serde(default)]
    pub languages: Vec<String>,

    /// Directory securing method (none, user, basic)
    #[serde(default = "default_credentials_method")]
    pub credentials_method: String,

    /// Site scope passed to the credentials resolver
    #[serde(default)]
    pub site_scope: Option<String>,

    /// Format tag announced in export events
    #[serde(default = "default_format")]
    pub format: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root_dir.trim().is_empty() {
            return Err("export.root_dir cannot be empty".to_string());
        }

        url::Url::parse(&self.download_base_url).map_err(|e| {
            format!(
                "export.download_base_url '{}' is not a valid URL: {}",
                self.download_base_url, e
            )
        })?;

        if self.page_size == 0 || self.page_size > 10000 {
            return Err(format!(
                "export.page_size must be between 1 and 10000, got {}",
                self.page_size
            ));
        }

        if self.item_types.is_empty() {
            return Err("export.item_types cannot be empty".to_string());
        }

        if self.languages.is_empty() {
            return Err("export.languages cannot be empty".to_string());
        }

        if self.credentials_method.trim().is_empty() {
            return Err("export.credentials_method cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Recommendation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Notification endpoint; `{customer_id}` is substituted
    pub endpoint: String,

    /// Customer identifier (basic-auth user)
    pub customer_id: String,

    /// License key (basic-auth password)
    pub license_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl RecommendationConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "recommendation.endpoint must start with http:// or https://, got '{}'",
                self.endpoint
            ));
        }
        if self.customer_id.trim().is_empty() {
            return Err("recommendation.customer_id cannot be empty".to_string());
        }
        if self.license_key.expose_secret().is_empty() {
            return Err("recommendation.license_key cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("recommendation.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Login/password pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeCredentials {
    pub login: String,
    pub password: SecretString,
}

/// Credentials used by the `user` securing method
///
/// `scopes` override the default pair for a named site scope.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub login: Option<String>,

    #[serde(default)]
    pub password: Option<SecretString>,

    #[serde(default)]
    pub scopes: BTreeMap<String, ScopeCredentials>,
}

impl CredentialsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.login.is_some() != self.password.is_some() {
            return Err("credentials.login and credentials.password must be set together".to_string());
        }
        for (scope, credentials) in &self.scopes {
            if credentials.login.trim().is_empty() {
                return Err(format!("credentials.scopes.{scope}.login cannot be empty"));
            }
        }
        Ok(())
    }
}

/// One file-backed in-memory data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source name used in logs
    pub name: String,

    /// Path of the JSON item fixture
    pub path: String,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("sources.name cannot be empty".to_string());
        }
        if self.path.trim().is_empty() {
            return Err(format!("sources.path cannot be empty for '{}'", self.name));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rotating files
    #[serde(default)]
    pub local_enabled: bool,

    /// Log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> usize {
    500
}

fn default_credentials_method() -> String {
    "basic".to_string()
}

fn default_format() -> String {
    "generic".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_local_path() -> String {
    "/var/log/reco-export".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> RecoConfig {
        RecoConfig {
            application: ApplicationConfig::default(),
            export: ExportConfig {
                root_dir: "/tmp/export".to_string(),
                download_base_url: "https://cms.example.com/export".to_string(),
                page_size: 500,
                item_types: vec!["article".to_string()],
                languages: vec!["eng-GB".to_string()],
                credentials_method: default_credentials_method(),
                site_scope: None,
                format: default_format(),
            },
            recommendation: RecommendationConfig {
                endpoint: "https://reco.example.com/api/{customer_id}/items".to_string(),
                customer_id: "12345".to_string(),
                license_key: secret_string("license".to_string()),
                timeout_seconds: 30,
            },
            credentials: CredentialsConfig::default(),
            sources: vec![SourceConfig {
                name: "articles".to_string(),
                path: "items.json".to_string(),
            }],
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("Invalid log_level"));
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = valid_config();
        config.export.page_size = 0;
        assert!(config.validate().is_err());
        config.export.page_size = 10001;
        assert!(config.validate().is_err());
        config.export.page_size = 10000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_download_base_url() {
        let mut config = valid_config();
        config.export.download_base_url = "not a url".to_string();
        assert!(config.validate().unwrap_err().contains("download_base_url"));
    }

    #[test]
    fn test_sources_required_and_unique() {
        let mut config = valid_config();
        config.sources.clear();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.sources.push(config.sources[0].clone());
        assert!(config.validate().unwrap_err().contains("duplicate source name"));
    }

    #[test]
    fn test_credentials_pair_required() {
        let mut config = valid_config();
        config.credentials.login = Some("editor".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_scheme() {
        let mut config = valid_config();
        config.recommendation.endpoint = "reco.example.com".to_string();
        assert!(config.validate().is_err());
    }
}
