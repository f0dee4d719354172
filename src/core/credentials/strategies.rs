//! Built-in credentials strategies

use super::dispatcher::ExportCredentialsStrategy;
use super::generator::generate;
use super::resolver::CredentialsResolver;
use crate::domain::{Credentials, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub const NONE_METHOD: &str = "none";
pub const USER_METHOD: &str = "user";
pub const BASIC_METHOD: &str = "basic";

const BASIC_LOGIN_LENGTH: usize = 10;
const BASIC_PASSWORD_LENGTH: usize = 30;

/// Leaves the chunk directory open
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredentialsStrategy;

#[async_trait]
impl ExportCredentialsStrategy for NoCredentialsStrategy {
    async fn credentials(&self, _site_scope: Option<&str>) -> Result<Credentials> {
        Ok(Credentials::empty())
    }
}

/// Uses the credentials configured for the site scope
pub struct UserCredentialsStrategy {
    resolver: Arc<dyn CredentialsResolver>,
}

impl UserCredentialsStrategy {
    pub fn new(resolver: Arc<dyn CredentialsResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ExportCredentialsStrategy for UserCredentialsStrategy {
    async fn credentials(&self, site_scope: Option<&str>) -> Result<Credentials> {
        self.resolver.resolve(site_scope).await
    }
}

/// Generates a random login and password on every call
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicCredentialsStrategy;

#[async_trait]
impl ExportCredentialsStrategy for BasicCredentialsStrategy {
    async fn credentials(&self, _site_scope: Option<&str>) -> Result<Credentials> {
        let login = generate(BASIC_LOGIN_LENGTH)?;
        let password = generate(BASIC_PASSWORD_LENGTH)?;
        Ok(Credentials::new(Some(login), Some(password)))
    }
}
