use crate::domain::ports::AuthTokenProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Fixed bearer token, e.g. a service account key from configuration.
#[derive(Debug)]
pub struct StaticToken {
    token: SecretString,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait]
impl AuthTokenProvider for StaticToken {
    async fn token(&self) -> Result<Option<SecretString>> {
        Ok(Some(SecretString::from(self.token.expose_secret().to_string())))
    }
}
