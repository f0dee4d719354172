//! In-memory data source
//!
//! Holds a fixed list of items, either built in code or loaded from a JSON
//! fixture file (an array of item records).

use super::traits::DataSource;
use crate::domain::{Criteria, Item, ItemList, RecoError, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// Data source over an owned item list
pub struct InMemoryDataSource {
    name: String,
    items: ItemList,
}

impl InMemoryDataSource {
    /// Create a source from items, kept in the given order
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items: ItemList::new(items),
        }
    }

    /// Load a source from a JSON fixture file
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read and a
    /// `Serialization` error if a record is malformed.
    pub fn from_json_file(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            RecoError::Io(format!("Failed to read item fixture {}: {}", path.display(), e))
        })?;
        let items: Vec<Item> = serde_json::from_str(&contents).map_err(|e| {
            RecoError::Serialization(format!(
                "Invalid item fixture {}: {}",
                path.display(),
                e
            ))
        })?;

        let source = Self::new(name, items);
        tracing::info!(
            source = %source.name,
            path = %path.display(),
            items = source.items.count(),
            "Loaded in-memory data source"
        );
        Ok(source)
    }

    fn matching(&self, criteria: &Criteria) -> ItemList {
        self.items.filter(|item| criteria.matches(item))
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn count_items(&self, criteria: &Criteria) -> Result<usize> {
        Ok(self.matching(criteria).count())
    }

    async fn fetch_items(&self, criteria: &Criteria) -> Result<ItemList> {
        Ok(self
            .matching(criteria)
            .slice(criteria.offset(), Some(criteria.limit())))
    }

    async fn fetch_item(&self, id: &str, language: &str) -> Result<Item> {
        self.items.get(id, language).cloned()
    }
}
