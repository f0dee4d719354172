//! Data source aggregation
//!
//! Fans a [`Criteria`] out across an ordered list of data sources and unifies
//! the answers. Registration order is significant: it decides which source
//! wins a single-item lookup and the order of bulk results.

use crate::adapters::datasource::DataSource;
use crate::core::grouping::GroupItemStrategyDispatcher;
use crate::domain::{Criteria, Item, ItemGroupList, ItemList, RecoError, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;

/// Ordered composite of data sources
///
/// [`get_items`](Self::get_items) applies limit and offset to each source's
/// own results, so it may return up to `limit` items per source. Used as a
/// [`DataSource`], the aggregator pages the combined results instead.
pub struct DataSourceAggregator {
    sources: Vec<Arc<dyn DataSource>>,
    grouping: Arc<GroupItemStrategyDispatcher>,
}

impl DataSourceAggregator {
    /// Create an aggregator with the built-in grouping strategies
    pub fn new(sources: Vec<Arc<dyn DataSource>>) -> Self {
        Self::with_grouping(sources, Arc::new(GroupItemStrategyDispatcher::with_defaults()))
    }

    /// Create an aggregator with a custom grouping dispatcher
    pub fn with_grouping(
        sources: Vec<Arc<dyn DataSource>>,
        grouping: Arc<GroupItemStrategyDispatcher>,
    ) -> Self {
        Self { sources, grouping }
    }

    /// Look an item up across sources, first match wins
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` when no source holds the item. Any other source
    /// failure is returned immediately without consulting later sources.
    pub async fn get_item(&self, id: &str, language: &str) -> Result<Item> {
        for source in &self.sources {
            match source.fetch_item(id, language).await {
                Ok(item) => {
                    tracing::debug!(source = %source.name(), id = %id, language = %language, "Item found");
                    return Ok(item);
                }
                Err(e) if e.is_not_found() => continue,
                Err(e) => {
                    tracing::error!(source = %source.name(), id = %id, error = %e, "Item lookup failed");
                    return Err(e);
                }
            }
        }

        Err(RecoError::item_not_found(id, language))
    }

    /// Fetch matching items from every source
    ///
    /// Sources are queried concurrently; results are concatenated in
    /// registration order. A source reporting zero matches is not asked to
    /// fetch.
    ///
    /// # Errors
    ///
    /// The first source failure aborts the whole call.
    pub async fn get_items(&self, criteria: &Criteria) -> Result<ItemList> {
        let fetches = self.sources.iter().map(|source| async move {
            let count = source.count_items(criteria).await?;
            if count == 0 {
                tracing::debug!(source = %source.name(), "No matching items, skipping fetch");
                return Ok(ItemList::empty());
            }

            let items = source.fetch_items(criteria).await?;
            tracing::debug!(
                source = %source.name(),
                matching = count,
                fetched = items.count(),
                "Fetched items"
            );
            Ok::<_, RecoError>(items)
        });

        let lists = try_join_all(fetches).await?;
        Ok(lists.into_iter().flatten().collect())
    }

    /// Group each source's items with the strategy registered as `group_by`
    ///
    /// Groups are not merged across sources; two sources holding items of
    /// the same type and language produce two groups with the same key.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedGroupItemStrategy` for an unknown key, checked
    /// before any source is queried, and propagates source failures.
    pub async fn get_grouped_items(
        &self,
        criteria: &Criteria,
        group_by: &str,
    ) -> Result<ItemGroupList> {
        self.grouping.ensure_supported(group_by)?;

        let groupings = self.sources.iter().map(|source| {
            self.grouping
                .dispatch(group_by, source.as_ref(), criteria)
        });

        let per_source = try_join_all(groupings).await?;
        Ok(per_source.into_iter().flatten().collect())
    }

    /// Fetch one window of the concatenated results of all sources
    ///
    /// Unlike [`get_items`](Self::get_items), limit and offset apply to the
    /// combined result: each source's count places it in the concatenation
    /// and only the sources overlapping the window are fetched, with their
    /// share of it.
    ///
    /// # Errors
    ///
    /// The first source failure aborts the whole call.
    pub async fn get_page(&self, criteria: &Criteria) -> Result<ItemList> {
        let counts = try_join_all(self.sources.iter().map(|s| s.count_items(criteria))).await?;

        let mut skip = criteria.offset();
        let mut remaining = criteria.limit();
        let mut windows = Vec::new();
        for (source, count) in self.sources.iter().zip(counts) {
            if remaining == 0 {
                break;
            }
            if skip >= count {
                skip -= count;
                continue;
            }
            let take = remaining.min(count - skip);
            windows.push((source, criteria.with_window(take, skip)));
            skip = 0;
            remaining -= take;
        }

        let fetches = windows.iter().map(|(source, window)| async move {
            let items = source.fetch_items(window).await?;
            tracing::debug!(
                source = %source.name(),
                offset = window.offset(),
                limit = window.limit(),
                fetched = items.count(),
                "Fetched page share"
            );
            Ok::<_, RecoError>(items)
        });

        let lists = try_join_all(fetches).await?;
        Ok(lists.into_iter().flatten().collect())
    }

    /// Total number of matching items across sources
    ///
    /// # Errors
    ///
    /// The first source failure aborts the whole call.
    pub async fn count_items(&self, criteria: &Criteria) -> Result<usize> {
        let counts = try_join_all(self.sources.iter().map(|s| s.count_items(criteria))).await?;
        Ok(counts.into_iter().sum())
    }
}

#[async_trait]
impl DataSource for DataSourceAggregator {
    fn name(&self) -> &str {
        "aggregator"
    }

    async fn count_items(&self, criteria: &Criteria) -> Result<usize> {
        DataSourceAggregator::count_items(self, criteria).await
    }

    /// Pages across sources so the window agrees with `count_items`
    async fn fetch_items(&self, criteria: &Criteria) -> Result<ItemList> {
        self.get_page(criteria).await
    }

    async fn fetch_item(&self, id: &str, language: &str) -> Result<Item> {
        self.get_item(id, language).await
    }
}
