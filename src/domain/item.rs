//! Item and item type value objects
//!
//! An [`Item`] is a single content record exposed to the aggregation and export
//! layer. Its lookup identity is the `(id, language)` pair. Items and their
//! [`ItemType`] are immutable once built.

use super::errors::RecoError;
use super::result::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Content category descriptor
///
/// Two item types are equal when their identifiers are equal; `id` and `name`
/// are descriptive only.
///
/// # Examples
///
/// ```
/// use reco_export::domain::ItemType;
///
/// let article = ItemType::new(2, "article", "Article").unwrap();
/// let renamed = ItemType::new(7, "article", "News article").unwrap();
/// assert_eq!(article, renamed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ItemTypeRecord")]
pub struct ItemType {
    id: i64,
    identifier: String,
    name: String,
}

#[derive(Deserialize)]
struct ItemTypeRecord {
    id: i64,
    identifier: String,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<ItemTypeRecord> for ItemType {
    type Error = String;

    fn try_from(record: ItemTypeRecord) -> std::result::Result<Self, Self::Error> {
        let name = record.name.unwrap_or_else(|| record.identifier.clone());
        ItemType::new(record.id, record.identifier, name).map_err(|e| e.to_string())
    }
}

impl ItemType {
    /// Creates a new item type
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the identifier is blank.
    pub fn new(id: i64, identifier: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(RecoError::InvalidArgument(
                "item type identifier cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            identifier,
            name: name.into(),
        })
    }

    /// Numeric id of the upstream content type
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Stable string identifier (e.g. `"article"`)
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for ItemType {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for ItemType {}

impl Hash for ItemType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

/// Attribute value: a scalar or a list of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Converts the value into a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttributeValue::Null => serde_json::Value::Null,
            AttributeValue::Bool(b) => serde_json::Value::Bool(*b),
            AttributeValue::Integer(i) => serde_json::Value::from(*i),
            AttributeValue::Float(f) => serde_json::Value::from(*f),
            AttributeValue::Text(s) => serde_json::Value::String(s.clone()),
            AttributeValue::List(values) => {
                serde_json::Value::Array(values.iter().map(AttributeValue::to_json).collect())
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(values: Vec<T>) -> Self {
        AttributeValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered attribute map
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    /// Creates an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, keeping the original position of an existing key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for a key
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute values")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut attributes = Attributes::new();
                while let Some((key, value)) = access.next_entry::<String, AttributeValue>()? {
                    attributes.set(key, value);
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// A single content record
///
/// # Examples
///
/// ```
/// use reco_export::domain::{Item, ItemType};
///
/// let item = Item::builder()
///     .id("42")
///     .item_type(ItemType::new(2, "article", "Article").unwrap())
///     .language("eng-GB")
///     .attribute("title", "Hello")
///     .build()
///     .unwrap();
/// assert_eq!(item.key(), ("42", "eng-GB"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    id: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    language: String,
    attributes: Attributes,
}

#[derive(Deserialize)]
struct ItemRecord {
    id: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    language: String,
    #[serde(default)]
    attributes: Attributes,
}

impl TryFrom<ItemRecord> for Item {
    type Error = String;

    fn try_from(record: ItemRecord) -> std::result::Result<Self, Self::Error> {
        ItemBuilder {
            id: Some(record.id),
            item_type: Some(record.item_type),
            language: Some(record.language),
            attributes: record.attributes,
        }
        .build()
        .map_err(|e| e.to_string())
    }
}

impl Item {
    /// Returns a builder for constructing an Item
    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn item_type(&self) -> &ItemType {
        &self.item_type
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Lookup identity `(id, language)`
    pub fn key(&self) -> (&str, &str) {
        (&self.id, &self.language)
    }

    /// Whether this item has the given lookup identity
    pub fn matches_key(&self, id: &str, language: &str) -> bool {
        self.id == id && self.language == language
    }
}

/// Builder for [`Item`]
#[derive(Debug, Default)]
pub struct ItemBuilder {
    id: Option<String>,
    item_type: Option<ItemType>,
    language: Option<String>,
    attributes: Attributes,
}

impl ItemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Adds one attribute (insertion order is kept)
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Replaces all attributes
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builds the Item
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a required field is missing or blank.
    pub fn build(self) -> Result<Item> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| RecoError::InvalidArgument("item id is required".to_string()))?;
        let item_type = self
            .item_type
            .ok_or_else(|| RecoError::InvalidArgument("item type is required".to_string()))?;
        let language = self
            .language
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| RecoError::InvalidArgument("item language is required".to_string()))?;

        Ok(Item {
            id,
            item_type,
            language,
            attributes: self.attributes,
        })
    }
}
