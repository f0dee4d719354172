//! Repository-backed data source
//!
//! Wraps a [`ContentProvider`] (the content repository's search and content
//! services) and resolves its raw records into [`Item`]s.

use super::traits::DataSource;
use crate::domain::{Attributes, Criteria, Item, ItemList, ItemType, RecoError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Raw content record as returned by the repository
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub id: String,
    pub type_identifier: String,
    pub language: String,
    pub fields: Attributes,
}

/// Content repository search/content service
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Number of records matching the criteria filters
    async fn count(&self, criteria: &Criteria) -> Result<usize>;

    /// Records in the criteria window
    async fn search(&self, criteria: &Criteria) -> Result<Vec<ContentRecord>>;

    /// One record by id and language, `None` when absent
    async fn load(&self, id: &str, language: &str) -> Result<Option<ContentRecord>>;

    /// Type descriptor for an identifier, `None` when unknown
    async fn item_type(&self, identifier: &str) -> Result<Option<ItemType>>;
}

/// Data source backed by the content repository
pub struct RepositoryDataSource {
    name: String,
    provider: Arc<dyn ContentProvider>,
    item_types: RwLock<HashMap<String, ItemType>>,
}

impl RepositoryDataSource {
    pub fn new(name: impl Into<String>, provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
            item_types: RwLock::new(HashMap::new()),
        }
    }

    async fn resolve_item_type(&self, identifier: &str) -> Result<ItemType> {
        let cached = self
            .item_types
            .read()
            .ok()
            .and_then(|cache| cache.get(identifier).cloned());
        if let Some(item_type) = cached {
            return Ok(item_type);
        }

        let item_type = self.provider.item_type(identifier).await?.ok_or_else(|| {
            RecoError::DataSource(format!(
                "Unknown item type '{}' in source '{}'",
                identifier, self.name
            ))
        })?;

        if let Ok(mut cache) = self.item_types.write() {
            cache.insert(identifier.to_string(), item_type.clone());
        }
        Ok(item_type)
    }

    async fn resolve(&self, record: ContentRecord) -> Result<Item> {
        let item_type = self.resolve_item_type(&record.type_identifier).await?;
        Item::builder()
            .id(record.id)
            .item_type(item_type)
            .language(record.language)
            .attributes(record.fields)
            .build()
    }
}

#[async_trait]
impl DataSource for RepositoryDataSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn count_items(&self, criteria: &Criteria) -> Result<usize> {
        self.provider.count(criteria).await
    }

    async fn fetch_items(&self, criteria: &Criteria) -> Result<ItemList> {
        let records = self.provider.search(criteria).await?;
        tracing::debug!(
            source = %self.name,
            records = records.len(),
            offset = criteria.offset(),
            limit = criteria.limit(),
            "Resolving repository records"
        );

        let mut items = Vec::with_capacity(records.len());
        for record in records {
            items.push(self.resolve(record).await?);
        }
        Ok(ItemList::new(items))
    }

    async fn fetch_item(&self, id: &str, language: &str) -> Result<Item> {
        match self.provider.load(id, language).await? {
            Some(record) => self.resolve(record).await,
            None => Err(RecoError::item_not_found(id, language)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeRepository {
        records: Vec<ContentRecord>,
        type_lookups: AtomicUsize,
    }

    impl FakeRepository {
        fn new() -> Self {
            let record = |id: &str, t: &str, l: &str| {
                let mut fields = Attributes::new();
                fields.set("title", format!("{t} {id}"));
                ContentRecord {
                    id: id.to_string(),
                    type_identifier: t.to_string(),
                    language: l.to_string(),
                    fields,
                }
            };
            Self {
                records: vec![
                    record("1", "article", "eng-GB"),
                    record("2", "article", "eng-GB"),
                    record("3", "gallery", "eng-GB"),
                ],
                type_lookups: AtomicUsize::new(0),
            }
        }

        fn matching(&self, criteria: &Criteria) -> Vec<ContentRecord> {
            self.records
                .iter()
                .filter(|r| {
                    criteria.item_type_identifiers().is_empty()
                        || criteria.item_type_identifiers().contains(&r.type_identifier)
                })
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl ContentProvider for FakeRepository {
        async fn count(&self, criteria: &Criteria) -> Result<usize> {
            Ok(self.matching(criteria).len())
        }

        async fn search(&self, criteria: &Criteria) -> Result<Vec<ContentRecord>> {
            Ok(self
                .matching(criteria)
                .into_iter()
                .skip(criteria.offset())
                .take(criteria.limit())
                .collect())
        }

        async fn load(&self, id: &str, language: &str) -> Result<Option<ContentRecord>> {
            Ok(self
                .records
                .iter()
                .find(|r| r.id == id && r.language == language)
                .cloned())
        }

        async fn item_type(&self, identifier: &str) -> Result<Option<ItemType>> {
            self.type_lookups.fetch_add(1, Ordering::SeqCst);
            match identifier {
                "article" => Ok(Some(ItemType::new(2, "article", "Article")?)),
                _ => Ok(None),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_items_resolves_types_once() {
        let provider = Arc::new(FakeRepository::new());
        let source = RepositoryDataSource::new("repository", provider.clone());
        let criteria = Criteria::builder().item_types(["article"]).build().unwrap();

        let items = source.fetch_items(&criteria).await.unwrap();
        assert_eq!(items.count(), 2);
        assert_eq!(items.first().unwrap().item_type().name(), "Article");
        assert_eq!(provider.type_lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_type_is_source_error() {
        let source = RepositoryDataSource::new("repository", Arc::new(FakeRepository::new()));
        let err = source.fetch_item("3", "eng-GB").await.unwrap_err();
        assert!(matches!(err, RecoError::DataSource(_)));
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let source = RepositoryDataSource::new("repository", Arc::new(FakeRepository::new()));
        let err = source.fetch_item("9", "eng-GB").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
