//! Credentials resolution for the `user` method

use crate::config::CredentialsConfig;
use crate::domain::{Credentials, Result};
use async_trait::async_trait;

/// Resolves the configured login and password for a site scope
#[async_trait]
pub trait CredentialsResolver: Send + Sync {
    /// Credentials for `site_scope`, or the default ones when `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials store cannot be read.
    async fn resolve(&self, site_scope: Option<&str>) -> Result<Credentials>;
}

/// Resolver over the `[credentials]` configuration section
///
/// A scope listed under `[credentials.scopes]` takes precedence; any other
/// scope falls back to the top-level login and password. When neither is
/// configured the credentials are empty.
pub struct ConfigCredentialsResolver {
    config: CredentialsConfig,
}

impl ConfigCredentialsResolver {
    pub fn new(config: CredentialsConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CredentialsResolver for ConfigCredentialsResolver {
    async fn resolve(&self, site_scope: Option<&str>) -> Result<Credentials> {
        if let Some(scoped) = site_scope.and_then(|scope| self.config.scopes.get(scope)) {
            tracing::debug!(site_scope = ?site_scope, "Using scope credentials");
            return Ok(Credentials::with_secret(
                Some(scoped.login.clone()),
                Some(scoped.password.clone()),
            ));
        }

        if self.config.login.is_none() {
            tracing::warn!(site_scope = ?site_scope, "No credentials configured for scope");
        }
        Ok(Credentials::with_secret(
            self.config.login.clone(),
            self.config.password.clone(),
        ))
    }
}
