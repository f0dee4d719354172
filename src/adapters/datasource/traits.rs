//! Data source abstraction
//!
//! This module defines the trait that backing stores implement to be queried
//! by the aggregator and the exporter.

use crate::domain::{Criteria, Item, ItemList, Result};
use async_trait::async_trait;

/// A pluggable backing store of items
///
/// Implementations must honor the criteria window: `fetch_items` returns at
/// most `limit` matching items, skipping the first `offset`, in the source's
/// natural order.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Count items matching the criteria filters
    ///
    /// Limit and offset do not affect the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    async fn count_items(&self, criteria: &Criteria) -> Result<usize>;

    /// Fetch the window of matching items described by the criteria
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    async fn fetch_items(&self, criteria: &Criteria) -> Result<ItemList>;

    /// Fetch one item by its `(id, language)` identity
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` when the source does not hold the item; any
    /// other error means the lookup itself failed.
    async fn fetch_item(&self, id: &str, language: &str) -> Result<Item>;
}
