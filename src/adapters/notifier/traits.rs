//! HTTP notifier trait

use crate::config::SecretString;
use crate::domain::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use secrecy::ExposeSecret;

/// Username/password pair sent as an HTTP basic `Authorization` header
#[derive(Clone, Debug)]
pub struct BasicAuth {
    pub username: String,
    pub password: SecretString,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// `Authorization` header value: `Basic base64(username:password)`
    pub fn header_value(&self) -> String {
        let password: &str = self.password.expose_secret().as_ref();
        let credentials = format!("{}:{password}", self.username);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {encoded}")
    }
}

/// Delivers a JSON document to a remote endpoint
#[async_trait]
pub trait HttpNotifier: Send + Sync {
    /// POST `payload` to `endpoint`
    ///
    /// # Errors
    ///
    /// Returns a `Notification` error if the endpoint cannot be reached or
    /// answers with a non-success status.
    async fn notify(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
        auth: &BasicAuth,
    ) -> Result<()>;
}
