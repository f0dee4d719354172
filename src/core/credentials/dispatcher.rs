//! Credentials method registry

use super::resolver::CredentialsResolver;
use super::strategies::{
    BasicCredentialsStrategy, NoCredentialsStrategy, UserCredentialsStrategy, BASIC_METHOD,
    NONE_METHOD, USER_METHOD,
};
use crate::domain::{Credentials, RecoError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Named policy producing the credentials that protect a chunk directory
#[async_trait]
pub trait ExportCredentialsStrategy: Send + Sync {
    /// Credentials for an export scoped to `site_scope`
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be produced.
    async fn credentials(&self, site_scope: Option<&str>) -> Result<Credentials>;
}

/// Registry of credentials strategies keyed by method name
#[derive(Clone, Default)]
pub struct ExportCredentialsDispatcher {
    strategies: BTreeMap<String, Arc<dyn ExportCredentialsStrategy>>,
}

impl ExportCredentialsDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with the `none`, `user` and `basic` methods
    ///
    /// # Arguments
    ///
    /// * `resolver` - credentials lookup used by the `user` method
    pub fn with_defaults(resolver: Arc<dyn CredentialsResolver>) -> Self {
        let mut strategies: BTreeMap<String, Arc<dyn ExportCredentialsStrategy>> =
            BTreeMap::new();
        strategies.insert(NONE_METHOD.to_string(), Arc::new(NoCredentialsStrategy));
        strategies.insert(
            USER_METHOD.to_string(),
            Arc::new(UserCredentialsStrategy::new(resolver)),
        );
        strategies.insert(BASIC_METHOD.to_string(), Arc::new(BasicCredentialsStrategy));
        Self { strategies }
    }

    /// Register a strategy under `method`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `method` is blank or already registered.
    pub fn register(
        &mut self,
        method: impl Into<String>,
        strategy: Arc<dyn ExportCredentialsStrategy>,
    ) -> Result<()> {
        let method = method.into();
        if method.trim().is_empty() {
            return Err(RecoError::InvalidArgument(
                "credentials method cannot be empty".to_string(),
            ));
        }
        if self.strategies.contains_key(&method) {
            return Err(RecoError::InvalidArgument(format!(
                "credentials method '{method}' is already registered"
            )));
        }
        self.strategies.insert(method, strategy);
        Ok(())
    }

    /// Registered method names, sorted
    pub fn methods(&self) -> Vec<String> {
        self.strategies.keys().cloned().collect()
    }

    /// Check that `method` is registered
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedExportCredentialsMethod` listing the valid methods.
    pub fn ensure_supported(&self, method: &str) -> Result<()> {
        self.strategy(method).map(|_| ())
    }

    /// Produce credentials with the strategy registered as `method`
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedExportCredentialsMethod` for an unknown method and
    /// propagates strategy failures.
    pub async fn credentials(&self, method: &str, site_scope: Option<&str>) -> Result<Credentials> {
        let strategy = self.strategy(method)?;
        let credentials = strategy.credentials(site_scope).await?;
        tracing::debug!(
            method = %method,
            site_scope = ?site_scope,
            protected = !credentials.is_empty(),
            "Resolved export credentials"
        );
        Ok(credentials)
    }

    fn strategy(&self, method: &str) -> Result<&Arc<dyn ExportCredentialsStrategy>> {
        self.strategies.get(method).ok_or_else(|| {
            RecoError::UnsupportedExportCredentialsMethod {
                method: method.to_string(),
                available: self.methods(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialsConfig;
    use crate::core::credentials::ConfigCredentialsResolver;

    fn dispatcher() -> ExportCredentialsDispatcher {
        ExportCredentialsDispatcher::with_defaults(Arc::new(ConfigCredentialsResolver::new(
            CredentialsConfig {
                login: Some("reco".to_string()),
                password: Some(crate::config::secret_string("secret".to_string())),
                scopes: Default::default(),
            },
        )))
    }

    #[test]
    fn test_default_methods_are_sorted() {
        assert_eq!(dispatcher().methods(), vec!["basic", "none", "user"]);
    }

    #[tokio::test]
    async fn test_user_method_delegates_to_resolver() {
        let credentials = dispatcher().credentials("user", None).await.unwrap();
        assert_eq!(credentials.login(), Some("reco"));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let err = dispatcher().credentials("ldap", None).await.unwrap_err();
        match err {
            RecoError::UnsupportedExportCredentialsMethod { method, available } => {
                assert_eq!(method, "ldap");
                assert_eq!(available, vec!["basic", "none", "user"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_register_duplicate_method() {
        let mut dispatcher = dispatcher();
        let err = dispatcher
            .register("basic", Arc::new(BasicCredentialsStrategy))
            .unwrap_err();
        assert!(matches!(err, RecoError::InvalidArgument(_)));
        assert!(dispatcher.ensure_supported("basic").is_ok());
    }
}
