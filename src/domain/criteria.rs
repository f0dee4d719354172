//! Query criteria
//!
//! [`Criteria`] is an immutable query descriptor handed to data sources. An
//! empty item-type or language filter matches everything on that dimension;
//! an explicit id filter narrows the result further.

use super::errors::RecoError;
use super::item::Item;
use super::result::Result;
use serde::Serialize;

/// Default page size when no limit is given
pub const DEFAULT_LIMIT: usize = 50;

/// Immutable query descriptor
///
/// # Examples
///
/// ```
/// use reco_export::domain::Criteria;
///
/// let criteria = Criteria::builder()
///     .item_types(["article"])
///     .languages(["eng-GB"])
///     .offset(50)
///     .build()
///     .unwrap();
/// assert_eq!(criteria.limit(), 50);
/// assert_eq!(criteria.offset(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criteria {
    item_type_identifiers: Vec<String>,
    languages: Vec<String>,
    item_ids: Option<Vec<String>>,
    limit: usize,
    offset: usize,
}

impl Criteria {
    /// Returns a builder for constructing Criteria
    pub fn builder() -> CriteriaBuilder {
        CriteriaBuilder::default()
    }

    /// Item-type identifiers, in the order given
    pub fn item_type_identifiers(&self) -> &[String] {
        &self.item_type_identifiers
    }

    /// Languages, in the order given
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Explicit item id filter
    pub fn item_ids(&self) -> Option<&[String]> {
        self.item_ids.as_deref()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns a copy with a different window
    pub fn with_window(&self, limit: usize, offset: usize) -> Criteria {
        Criteria {
            limit,
            offset,
            ..self.clone()
        }
    }

    /// Returns a copy restricted to one item type and one language
    ///
    /// The id filter, limit and offset are kept.
    pub fn narrowed_to(&self, item_type_identifier: &str, language: &str) -> Criteria {
        Criteria {
            item_type_identifiers: vec![item_type_identifier.to_string()],
            languages: vec![language.to_string()],
            ..self.clone()
        }
    }

    /// Whether an item satisfies the type, language and id filters
    ///
    /// Limit and offset are not considered.
    pub fn matches(&self, item: &Item) -> bool {
        let type_matches = self.item_type_identifiers.is_empty()
            || self
                .item_type_identifiers
                .iter()
                .any(|t| t == item.item_type().identifier());
        let language_matches =
            self.languages.is_empty() || self.languages.iter().any(|l| l == item.language());
        let id_matches = self
            .item_ids
            .as_ref()
            .map_or(true, |ids| ids.iter().any(|id| id == item.id()));

        type_matches && language_matches && id_matches
    }
}

/// Builder for [`Criteria`]
///
/// Limit and offset are accepted as signed integers so callers feeding raw
/// request values get an `InvalidArgument` instead of a wrap-around.
#[derive(Debug, Default)]
pub struct CriteriaBuilder {
    item_type_identifiers: Vec<String>,
    languages: Vec<String>,
    item_ids: Option<Vec<String>>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl CriteriaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_types<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_type_identifiers = identifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn item_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Builds the Criteria
    ///
    /// Repeated identifiers, languages and ids are dropped, first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a negative limit or offset.
    pub fn build(self) -> Result<Criteria> {
        let limit = match self.limit {
            Some(limit) if limit < 0 => {
                return Err(RecoError::InvalidArgument(format!(
                    "limit must be non-negative, got {limit}"
                )))
            }
            Some(limit) => limit as usize,
            None => DEFAULT_LIMIT,
        };
        let offset = match self.offset {
            Some(offset) if offset < 0 => {
                return Err(RecoError::InvalidArgument(format!(
                    "offset must be non-negative, got {offset}"
                )))
            }
            Some(offset) => offset as usize,
            None => 0,
        };

        Ok(Criteria {
            item_type_identifiers: dedup(self.item_type_identifiers),
            languages: dedup(self.languages),
            item_ids: self.item_ids.map(dedup),
            limit,
            offset,
        })
    }
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
