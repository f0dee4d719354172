//! reqwest-backed notifier
//!
//! Sends the payload once. Delivery failures are reported to the caller and
//! never retried.

use super::traits::{BasicAuth, HttpNotifier};
use crate::domain::{NotificationError, RecoError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// HTTP notifier built on a shared [`reqwest::Client`]
pub struct ReqwestNotifier {
    client: Client,
}

impl ReqwestNotifier {
    /// Create a notifier whose requests time out after `timeout`
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the HTTP client cannot be built
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| RecoError::Configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn map_send_error(err: reqwest::Error) -> NotificationError {
        if err.is_timeout() {
            NotificationError::Timeout(err.to_string())
        } else if err.is_builder() {
            NotificationError::InvalidEndpoint(err.to_string())
        } else {
            NotificationError::ConnectionFailed(err.to_string())
        }
    }
}

#[async_trait]
impl HttpNotifier for ReqwestNotifier {
    async fn notify(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
        auth: &BasicAuth,
    ) -> Result<()> {
        let url = Url::parse(endpoint)
            .map_err(|e| NotificationError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        tracing::debug!(endpoint = %url, "Sending notification");

        let response = self
            .client
            .post(url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, auth.header_value())
            .json(payload)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                endpoint = %url,
                status = status.as_u16(),
                "Notification rejected"
            );
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        tracing::info!(endpoint = %url, status = status.as_u16(), "Notification delivered");
        Ok(())
    }
}
