use crate::domain::model::ServiceMeta;
use crate::utils::error::Result;
use async_trait::async_trait;
use secrecy::SecretString;
use std::fmt::Debug;

/// Remote origin of the service map.
#[async_trait]
pub trait ServiceMapSource: Send + Sync {
    async fn fetch_services(&self) -> Result<Vec<ServiceMeta>>;
}

/// Supplies bearer tokens for outgoing requests. `None` or an empty token
/// sends the request without an `Authorization` header.
#[async_trait]
pub trait AuthTokenProvider: Debug + Send + Sync {
    async fn token(&self) -> Result<Option<SecretString>>;
}
