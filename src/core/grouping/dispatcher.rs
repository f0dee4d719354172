//! Grouping strategy registry

use crate::adapters::datasource::DataSource;
use crate::domain::{Criteria, ItemGroupList, RecoError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::item_type_language::{ItemTypeAndLanguageStrategy, ITEM_TYPE_AND_LANGUAGE};

/// Named grouping algorithm
#[async_trait]
pub trait GroupItemStrategy: Send + Sync {
    /// Group the items `source` holds for `criteria`
    ///
    /// # Errors
    ///
    /// Propagates data source failures.
    async fn group(&self, source: &dyn DataSource, criteria: &Criteria) -> Result<ItemGroupList>;
}

/// Registry of grouping strategies keyed by name
///
/// Keys are kept sorted so error messages list them deterministically.
#[derive(Clone, Default)]
pub struct GroupItemStrategyDispatcher {
    strategies: BTreeMap<String, Arc<dyn GroupItemStrategy>>,
}

impl GroupItemStrategyDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with the built-in strategies registered
    pub fn with_defaults() -> Self {
        let mut strategies: BTreeMap<String, Arc<dyn GroupItemStrategy>> = BTreeMap::new();
        strategies.insert(
            ITEM_TYPE_AND_LANGUAGE.to_string(),
            Arc::new(ItemTypeAndLanguageStrategy),
        );
        Self { strategies }
    }

    /// Register a strategy under `key`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `key` is blank or already registered.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        strategy: Arc<dyn GroupItemStrategy>,
    ) -> Result<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(RecoError::InvalidArgument(
                "group item strategy key cannot be empty".to_string(),
            ));
        }
        if self.strategies.contains_key(&key) {
            return Err(RecoError::InvalidArgument(format!(
                "group item strategy '{key}' is already registered"
            )));
        }

        tracing::debug!(key = %key, "Registered group item strategy");
        self.strategies.insert(key, strategy);
        Ok(())
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        self.strategies.keys().cloned().collect()
    }

    /// Check that `key` names a registered strategy
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedGroupItemStrategy` listing the valid keys.
    pub fn ensure_supported(&self, key: &str) -> Result<()> {
        self.strategy(key).map(|_| ())
    }

    /// Run the strategy registered under `group_by`
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedGroupItemStrategy` for an unknown key and
    /// propagates strategy failures.
    pub async fn dispatch(
        &self,
        group_by: &str,
        source: &dyn DataSource,
        criteria: &Criteria,
    ) -> Result<ItemGroupList> {
        let strategy = self.strategy(group_by)?;
        strategy.group(source, criteria).await
    }

    fn strategy(&self, key: &str) -> Result<&Arc<dyn GroupItemStrategy>> {
        self.strategies
            .get(key)
            .ok_or_else(|| RecoError::UnsupportedGroupItemStrategy {
                key: key.to_string(),
                available: self.keys(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::datasource::InMemoryDataSource;
    use crate::domain::ItemGroup;

    struct SingleGroup;

    #[async_trait]
    impl GroupItemStrategy for SingleGroup {
        async fn group(
            &self,
            source: &dyn DataSource,
            criteria: &Criteria,
        ) -> Result<ItemGroupList> {
            let items = source.fetch_items(criteria).await?;
            Ok(ItemGroupList::new(vec![ItemGroup::new("all", items)]))
        }
    }

    #[test]
    fn test_with_defaults_registers_item_type_and_language() {
        let dispatcher = GroupItemStrategyDispatcher::with_defaults();
        assert_eq!(dispatcher.keys(), vec![ITEM_TYPE_AND_LANGUAGE.to_string()]);
        assert!(dispatcher.ensure_supported(ITEM_TYPE_AND_LANGUAGE).is_ok());
    }

    #[test]
    fn test_register_rejects_duplicate_and_blank_keys() {
        let mut dispatcher = GroupItemStrategyDispatcher::with_defaults();
        let err = dispatcher
            .register(ITEM_TYPE_AND_LANGUAGE, Arc::new(SingleGroup))
            .unwrap_err();
        assert!(matches!(err, RecoError::InvalidArgument(_)));

        let err = dispatcher.register("  ", Arc::new(SingleGroup)).unwrap_err();
        assert!(matches!(err, RecoError::InvalidArgument(_)));
    }

    #[test]
    fn test_unknown_key_lists_available_keys_sorted() {
        let mut dispatcher = GroupItemStrategyDispatcher::with_defaults();
        dispatcher.register("all", Arc::new(SingleGroup)).unwrap();

        let err = dispatcher.ensure_supported("by_author").unwrap_err();
        match &err {
            RecoError::UnsupportedGroupItemStrategy { key, available } => {
                assert_eq!(key, "by_author");
                assert_eq!(
                    available,
                    &vec!["all".to_string(), ITEM_TYPE_AND_LANGUAGE.to_string()]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("by_author"));
        assert!(err.to_string().contains("all, item_type_and_language"));
    }

    #[tokio::test]
    async fn test_dispatch_runs_registered_strategy() {
        let mut dispatcher = GroupItemStrategyDispatcher::new();
        dispatcher.register("all", Arc::new(SingleGroup)).unwrap();

        let source = InMemoryDataSource::new("empty", Vec::new());
        let criteria = Criteria::builder().build().unwrap();
        let groups = dispatcher.dispatch("all", &source, &criteria).await.unwrap();

        assert_eq!(groups.identifiers(), vec!["all"]);
        assert_eq!(groups.iter().next().map(|g| g.items().count()), Some(0));
    }
}
