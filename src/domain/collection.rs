//! Item collections
//!
//! [`ItemList`] is an ordered sequence of items with value semantics: every
//! operation returning a list builds a new one and leaves the source alone.
//! Duplicated `(id, language)` pairs are allowed and never collapsed.

use super::errors::RecoError;
use super::item::Item;
use super::result::Result;
use serde::Serialize;

/// Ordered list of items
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ItemList {
    items: Vec<Item>,
}

impl ItemList {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Keeps matching items, preserving relative order
    pub fn filter<P>(&self, predicate: P) -> ItemList
    where
        P: Fn(&Item) -> bool,
    {
        ItemList::new(self.items.iter().filter(|i| predicate(i)).cloned().collect())
    }

    /// Returns up to `length` items starting at `offset`
    ///
    /// An offset past the end yields an empty list; `None` takes everything
    /// from `offset` onward.
    pub fn slice(&self, offset: usize, length: Option<usize>) -> ItemList {
        let remaining = self.items.iter().skip(offset);
        let items = match length {
            Some(length) => remaining.take(length).cloned().collect(),
            None => remaining.cloned().collect(),
        };
        ItemList::new(items)
    }

    /// Returns the first item with the given `(id, language)`
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if no item matches.
    pub fn get(&self, id: &str, language: &str) -> Result<&Item> {
        self.items
            .iter()
            .find(|i| i.matches_key(id, language))
            .ok_or_else(|| RecoError::item_not_found(id, language))
    }

    pub fn has(&self, id: &str, language: &str) -> bool {
        self.items.iter().any(|i| i.matches_key(id, language))
    }

    /// # Errors
    ///
    /// Returns `EmptyCollection` if the list has no items.
    pub fn first(&self) -> Result<&Item> {
        self.items.first().ok_or(RecoError::EmptyCollection)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Concatenates two lists into a new one
    pub fn concat(&self, other: &ItemList) -> ItemList {
        let mut items = self.items.clone();
        items.extend(other.items.iter().cloned());
        ItemList::new(items)
    }
}

impl From<Vec<Item>> for ItemList {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<Item> for ItemList {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ItemList {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Items sharing a composite group key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemGroup {
    identifier: String,
    items: ItemList,
}

impl ItemGroup {
    pub fn new(identifier: impl Into<String>, items: ItemList) -> Self {
        Self {
            identifier: identifier.into(),
            items,
        }
    }

    /// Composite key, e.g. `"article_eng-GB"`
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }
}

/// Groups produced by one grouping call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ItemGroupList {
    groups: Vec<ItemGroup>,
}

impl ItemGroupList {
    pub fn new(groups: Vec<ItemGroup>) -> Self {
        Self { groups }
    }

    pub fn count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemGroup> {
        self.groups.iter()
    }

    /// Identifiers of all groups, in order
    pub fn identifiers(&self) -> Vec<&str> {
        self.groups.iter().map(ItemGroup::identifier).collect()
    }
}

impl FromIterator<ItemGroup> for ItemGroupList {
    fn from_iter<T: IntoIterator<Item = ItemGroup>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ItemGroupList {
    type Item = ItemGroup;
    type IntoIter = std::vec::IntoIter<ItemGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItemGroupList {
    type Item = &'a ItemGroup;
    type IntoIter = std::slice::Iter<'a, ItemGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
