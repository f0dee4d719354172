//! Group by item type and language

use super::dispatcher::GroupItemStrategy;
use crate::adapters::datasource::DataSource;
use crate::domain::{Criteria, ItemGroup, ItemGroupList, Result};
use async_trait::async_trait;

/// Registry key of [`ItemTypeAndLanguageStrategy`]
pub const ITEM_TYPE_AND_LANGUAGE: &str = "item_type_and_language";

/// One group per item type identifier and language named in the criteria
///
/// Groups are keyed `"<itemTypeIdentifier>_<language>"` and produced in
/// criteria order with languages nested inside types. Combinations without
/// matching items yield no group. Criteria without a type or language filter
/// yield no groups at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItemTypeAndLanguageStrategy;

impl ItemTypeAndLanguageStrategy {
    pub fn group_key(item_type_identifier: &str, language: &str) -> String {
        format!("{item_type_identifier}_{language}")
    }
}

#[async_trait]
impl GroupItemStrategy for ItemTypeAndLanguageStrategy {
    async fn group(&self, source: &dyn DataSource, criteria: &Criteria) -> Result<ItemGroupList> {
        let mut groups = Vec::new();

        for identifier in criteria.item_type_identifiers() {
            for language in criteria.languages() {
                let narrowed = criteria.narrowed_to(identifier, language);
                let count = source.count_items(&narrowed).await?;
                if count == 0 {
                    tracing::debug!(
                        source = %source.name(),
                        item_type = %identifier,
                        language = %language,
                        "No items for group"
                    );
                    continue;
                }

                let items = source.fetch_items(&narrowed).await?;
                tracing::debug!(
                    source = %source.name(),
                    item_type = %identifier,
                    language = %language,
                    count = items.count(),
                    "Built item group"
                );
                groups.push(ItemGroup::new(Self::group_key(identifier, language), items));
            }
        }

        Ok(ItemGroupList::new(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::datasource::InMemoryDataSource;
    use crate::domain::{Item, ItemType};

    fn item(id: &str, item_type: &ItemType, language: &str) -> Item {
        Item::builder()
            .id(id)
            .item_type(item_type.clone())
            .language(language)
            .build()
            .unwrap()
    }

    fn source() -> InMemoryDataSource {
        let article = ItemType::new(1, "article", "Article").unwrap();
        let blog = ItemType::new(2, "blog_post", "Blog post").unwrap();
        InMemoryDataSource::new(
            "memory",
            vec![
                item("1", &article, "eng-GB"),
                item("2", &article, "ger-DE"),
                item("3", &blog, "eng-GB"),
                item("4", &article, "eng-GB"),
            ],
        )
    }

    #[tokio::test]
    async fn test_groups_in_criteria_order_skipping_empty_combinations() {
        let criteria = Criteria::builder()
            .item_types(["blog_post", "article"])
            .languages(["ger-DE", "eng-GB"])
            .build()
            .unwrap();

        let groups = ItemTypeAndLanguageStrategy
            .group(&source(), &criteria)
            .await
            .unwrap();

        assert_eq!(
            groups.identifiers(),
            vec!["blog_post_eng-GB", "article_ger-DE", "article_eng-GB"]
        );
        let article_eng: Vec<&str> = groups
            .iter()
            .find(|g| g.identifier() == "article_eng-GB")
            .map(|g| g.items().iter().map(|i| i.id()).collect())
            .unwrap_or_default();
        assert_eq!(article_eng, vec!["1", "4"]);
    }

    #[tokio::test]
    async fn test_window_and_ids_are_kept_per_group() {
        let criteria = Criteria::builder()
            .item_types(["article"])
            .languages(["eng-GB"])
            .item_ids(["4"])
            .build()
            .unwrap();

        let groups = ItemTypeAndLanguageStrategy
            .group(&source(), &criteria)
            .await
            .unwrap();

        assert_eq!(groups.count(), 1);
        let ids: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.items().iter().map(|i| i.id()))
            .collect();
        assert_eq!(ids, vec!["4"]);
    }

    #[tokio::test]
    async fn test_no_filters_yield_no_groups() {
        let criteria = Criteria::builder().build().unwrap();
        let groups = ItemTypeAndLanguageStrategy
            .group(&source(), &criteria)
            .await
            .unwrap();
        assert!(groups.is_empty());
    }
}
