//! Export events sent to the recommendation engine

use super::credentials::Credentials;
use serde::Serialize;

/// Action announced for every exported item type and language
pub const FULL_EXPORT_ACTION: &str = "FULL";

/// One event per exported (item type, language) combination
///
/// Carries every chunk URL written for that combination.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEvent {
    pub item_type_id: i64,
    pub item_type_name: String,
    pub language: String,
    #[serde(rename = "uri")]
    pub uri_list: Vec<String>,
    pub credentials: Credentials,
    pub format: String,
    pub action: String,
}

impl ExportEvent {
    /// Creates a full-export event
    pub fn full(
        item_type_id: i64,
        item_type_name: impl Into<String>,
        language: impl Into<String>,
        uri_list: Vec<String>,
        credentials: Credentials,
        format: impl Into<String>,
    ) -> Self {
        Self {
            item_type_id,
            item_type_name: item_type_name.into(),
            language: language.into(),
            uri_list,
            credentials,
            format: format.into(),
            action: FULL_EXPORT_ACTION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serialization() {
        let event = ExportEvent::full(
            2,
            "Article",
            "eng-GB",
            vec!["https://cms.example.com/export/2026/01/01/10/00/article_eng-GB_1.json".into()],
            Credentials::empty(),
            "generic",
        );

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "itemTypeId": 2,
                "itemTypeName": "Article",
                "language": "eng-GB",
                "uri": ["https://cms.example.com/export/2026/01/01/10/00/article_eng-GB_1.json"],
                "credentials": {"login": null, "password": null},
                "format": "generic",
                "action": "FULL"
            })
        );
    }
}
