//! Export directory credentials

use crate::config::{secret_string, SecretString};
use secrecy::ExposeSecret;
use serde::{Serialize, Serializer};

/// Login and password protecting a chunk directory
///
/// Both fields are unset when the directory is left open. The password is
/// kept in a [`SecretString`] so it never shows up in `Debug` output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Credentials {
    login: Option<String>,
    #[serde(serialize_with = "serialize_password")]
    password: Option<SecretString>,
}

fn serialize_password<S>(password: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match password {
        Some(secret) => {
            let value: &str = secret.expose_secret().as_ref();
            serializer.serialize_some(value)
        }
        None => serializer.serialize_none(),
    }
}

impl Credentials {
    pub fn new(login: Option<String>, password: Option<String>) -> Self {
        Self {
            login,
            password: password.map(secret_string),
        }
    }

    /// Build from an already protected password
    pub fn with_secret(login: Option<String>, password: Option<SecretString>) -> Self {
        Self { login, password }
    }

    /// Credentials with both fields unset
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }

    /// Whether both login and password are unset
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.password.is_none()
    }
}
