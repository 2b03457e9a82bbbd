#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::SdkConfig;

use crate::adapters::auth::StaticToken;
use crate::core::resolver::DEFAULT_FETCH_TIMEOUT;
use crate::domain::ports::AuthTokenProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_base_path, validate_url, Validate};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_REVENUE_BASE_PATH: &str = "/revenue";
pub const DEFAULT_PAYMENT_BASE_PATH: &str = "/payment";

/// Runtime configuration for [`crate::Sdk`] and [`crate::create_clients`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// e.g. `https://api.example.com`
    pub base_url: String,
    /// Defaults to `/revenue`.
    pub revenue_base_path: Option<String>,
    /// Defaults to `/payment`.
    pub payment_base_path: Option<String>,
    pub auth: Option<Arc<dyn AuthTokenProvider>>,
    pub request_timeout: Option<Duration>,
    /// Upper bound on the one-time service map load. `None` waits forever.
    pub service_map_timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            revenue_base_path: None,
            payment_base_path: None,
            auth: None,
            request_timeout: None,
            service_map_timeout: Some(DEFAULT_FETCH_TIMEOUT),
        }
    }

    pub fn with_revenue_base_path(mut self, path: impl Into<String>) -> Self {
        self.revenue_base_path = Some(path.into());
        self
    }

    pub fn with_payment_base_path(mut self, path: impl Into<String>) -> Self {
        self.payment_base_path = Some(path.into());
        self
    }

    pub fn with_auth(mut self, provider: Arc<dyn AuthTokenProvider>) -> Self {
        self.auth = Some(provider);
        self
    }

    pub fn with_bearer_token(self, token: impl Into<String>) -> Self {
        self.with_auth(Arc::new(StaticToken::new(token)))
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_service_map_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.service_map_timeout = timeout;
        self
    }

    /// Base URL with at most one trailing slash removed.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.strip_suffix('/').unwrap_or(&self.base_url)
    }

    pub fn revenue_base_url(&self) -> String {
        let path = self
            .revenue_base_path
            .as_deref()
            .unwrap_or(DEFAULT_REVENUE_BASE_PATH);
        format!("{}{}", self.trimmed_base_url(), path)
    }

    pub fn payment_base_url(&self) -> String {
        let path = self
            .payment_base_path
            .as_deref()
            .unwrap_or(DEFAULT_PAYMENT_BASE_PATH);
        format!("{}{}", self.trimmed_base_url(), path)
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(path) = &self.revenue_base_path {
            validate_base_path("revenue_base_path", path)?;
        }
        if let Some(path) = &self.payment_base_path {
            validate_base_path("payment_base_path", path)?;
        }
        Ok(())
    }
}
