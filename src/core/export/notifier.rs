//! End-of-export notification
//!
//! Tells the recommendation engine where to download the chunks of a run.
//! The payload is `{"transaction": <string|null>, "events": [...]}`, posted
//! with the customer id and license key as basic-auth credentials.

use crate::adapters::notifier::{BasicAuth, HttpNotifier};
use crate::config::{RecommendationConfig, SecretString};
use crate::domain::{ExportEvent, Result};
use serde::Serialize;
use std::sync::Arc;

const CUSTOMER_ID_PLACEHOLDER: &str = "{customer_id}";

#[derive(Serialize)]
struct NotificationPayload<'a> {
    transaction: Option<&'a str>,
    events: &'a [ExportEvent],
}

/// Builds and sends export notifications
pub struct ExportNotifier {
    http: Arc<dyn HttpNotifier>,
    endpoint_template: String,
    customer_id: String,
    license_key: SecretString,
}

impl ExportNotifier {
    pub fn new(http: Arc<dyn HttpNotifier>, config: &RecommendationConfig) -> Self {
        Self {
            http,
            endpoint_template: config.endpoint.clone(),
            customer_id: config.customer_id.clone(),
            license_key: config.license_key.clone(),
        }
    }

    /// Endpoint with the customer id substituted
    pub fn endpoint(&self) -> String {
        self.endpoint_template
            .replace(CUSTOMER_ID_PLACEHOLDER, &self.customer_id)
    }

    /// Notification document for a run
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if an event cannot be serialized.
    pub fn payload(
        transaction: Option<&str>,
        events: &[ExportEvent],
    ) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(NotificationPayload {
            transaction,
            events,
        })?)
    }

    /// Send the notification for `events`
    ///
    /// # Errors
    ///
    /// Returns a `Notification` error if delivery fails or the endpoint
    /// rejects the payload.
    pub async fn notify(&self, transaction: Option<&str>, events: &[ExportEvent]) -> Result<()> {
        let payload = Self::payload(transaction, events)?;
        let endpoint = self.endpoint();
        let auth = BasicAuth::new(self.customer_id.clone(), self.license_key.clone());

        tracing::info!(
            endpoint = %endpoint,
            events = events.len(),
            transaction = ?transaction,
            "Sending export notification"
        );
        self.http.notify(&endpoint, &payload, &auth).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::{Credentials, NotificationError, RecoError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<(String, serde_json::Value, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl HttpNotifier for RecordingNotifier {
        async fn notify(
            &self,
            endpoint: &str,
            payload: &serde_json::Value,
            auth: &BasicAuth,
        ) -> Result<()> {
            self.calls.lock().unwrap().push((
                endpoint.to_string(),
                payload.clone(),
                auth.username.clone(),
            ));
            if self.fail {
                return Err(NotificationError::Rejected {
                    status: 500,
                    message: "boom".to_string(),
                }
                .into());
            }
            Ok(())
        }
    }

    fn config() -> RecommendationConfig {
        RecommendationConfig {
            endpoint: "https://reco.example.com/api/{customer_id}/items".to_string(),
            customer_id: "12345".to_string(),
            license_key: secret_string("license".to_string()),
            timeout_seconds: 30,
        }
    }

    fn event() -> ExportEvent {
        ExportEvent::full(
            2,
            "Article",
            "eng-GB",
            vec!["https://cms.example.com/export/a.json".to_string()],
            Credentials::empty(),
            "generic",
        )
    }

    #[test]
    fn test_endpoint_substitutes_customer_id() {
        let notifier = ExportNotifier::new(Arc::new(RecordingNotifier::default()), &config());
        assert_eq!(notifier.endpoint(), "https://reco.example.com/api/12345/items");
    }

    #[test]
    fn test_payload_shape() {
        let payload = ExportNotifier::payload(Some("tx-1"), &[event()]).unwrap();
        assert_eq!(payload["transaction"], json!("tx-1"));
        assert_eq!(payload["events"][0]["itemTypeId"], json!(2));
        assert_eq!(payload["events"][0]["action"], json!("FULL"));

        let payload = ExportNotifier::payload(None, &[]).unwrap();
        assert_eq!(payload, json!({"transaction": null, "events": []}));
    }

    #[tokio::test]
    async fn test_notify_sends_payload_to_endpoint() {
        let http = Arc::new(RecordingNotifier::default());
        let notifier = ExportNotifier::new(http.clone(), &config());

        notifier.notify(None, &[event()]).await.unwrap();

        let calls = http.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://reco.example.com/api/12345/items");
        assert_eq!(calls[0].2, "12345");
        assert_eq!(calls[0].1["events"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_notify_propagates_rejection() {
        let http = Arc::new(RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        let notifier = ExportNotifier::new(http, &config());

        let err = notifier.notify(None, &[event()]).await.unwrap_err();
        assert!(matches!(err, RecoError::Notification(_)));
    }
}
