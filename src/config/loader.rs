//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RecoConfig;
use crate::config::secret_string;
use crate::domain::errors::RecoError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RecoConfig
/// 4. Applies environment variable overrides (RECO_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a `Configuration` error if the file is missing or unreadable,
/// TOML parsing fails, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use reco_export::config::loader::load_config;
///
/// let config = load_config("reco-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RecoConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RecoError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RecoError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: RecoConfig = toml::from_str(&contents)
        .map_err(|e| RecoError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        RecoError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RecoError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RecoError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the RECO_EXPORT_* prefix
///
/// Variables follow the pattern RECO_EXPORT_<SECTION>_<KEY>, for example
/// RECO_EXPORT_EXPORT_PAGE_SIZE or RECO_EXPORT_RECOMMENDATION_LICENSE_KEY.
/// List values are comma-separated.
fn apply_env_overrides(config: &mut RecoConfig) {
    if let Ok(val) = std::env::var("RECO_EXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("RECO_EXPORT_EXPORT_ROOT_DIR") {
        config.export.root_dir = val;
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_EXPORT_DOWNLOAD_BASE_URL") {
        config.export.download_base_url = val;
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_EXPORT_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.export.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_EXPORT_ITEM_TYPES") {
        config.export.item_types = split_list(&val);
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_EXPORT_LANGUAGES") {
        config.export.languages = split_list(&val);
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_EXPORT_CREDENTIALS_METHOD") {
        config.export.credentials_method = val;
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_EXPORT_SITE_SCOPE") {
        config.export.site_scope = Some(val);
    }

    // Recommendation engine overrides
    if let Ok(val) = std::env::var("RECO_EXPORT_RECOMMENDATION_ENDPOINT") {
        config.recommendation.endpoint = val;
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_RECOMMENDATION_CUSTOMER_ID") {
        config.recommendation.customer_id = val;
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_RECOMMENDATION_LICENSE_KEY") {
        config.recommendation.license_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_RECOMMENDATION_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.recommendation.timeout_seconds = timeout;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RECO_EXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("RECO_EXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

/// Splits a comma-separated list, dropping blank entries
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("RECO_LOADER_TEST_VAR", "test_value");
        let input = "license_key = \"${RECO_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "license_key = \"test_value\"\n");
        std::env::remove_var("RECO_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("RECO_LOADER_MISSING_VAR");
        let input = "license_key = \"${RECO_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("RECO_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("RECO_LOADER_COMMENTED_VAR");
        let input = "# license_key = \"${RECO_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("article, blog,,"), vec!["article", "blog"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(RecoError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[export]
root_dir = "/tmp/reco-export"
download_base_url = "https://cms.example.com/export"
item_types = ["article"]
languages = ["eng-GB"]

[recommendation]
endpoint = "https://reco.example.com/api/{customer_id}/items"
customer_id = "12345"
license_key = "license"

[[sources]]
name = "articles"
path = "items.json"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.export.page_size, 500);
        assert_eq!(config.export.credentials_method, "basic");
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.sources[0].name, "articles");
    }
}
