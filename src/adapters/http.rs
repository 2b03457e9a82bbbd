use crate::config::ApiConfig;
use crate::domain::model::{ServiceMapResponse, ServiceMeta};
use crate::domain::ports::{AuthTokenProvider, ServiceMapSource};
use crate::utils::error::{Result, SdkError};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub const SERVICE_MAP_PATH: &str = "/core/services-map/";

/// HTTP client bound to one API surface (revenue or payment).
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Option<Arc<dyn AuthTokenProvider>>,
}

/// Authenticated clients for both API surfaces.
#[derive(Clone)]
pub struct Clients {
    pub revenue: ApiClient,
    pub payment: ApiClient,
}

/// 依設定建立 revenue 與 payment 兩個客戶端，共用同一個連線池
pub fn create_clients(config: &ApiConfig) -> Result<Clients> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    Ok(Clients {
        revenue: ApiClient::new(client.clone(), config.revenue_base_url(), config.auth.clone()),
        payment: ApiClient::new(client, config.payment_base_url(), config.auth.clone()),
    })
}

impl ApiClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        auth: Option<Arc<dyn AuthTokenProvider>>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path).await?;
        Self::read_json(Self::send(request).await?).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path).await?.query(query);
        Self::read_json(Self::send(request).await?).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).await?.json(body);
        Self::read_json(Self::send(request).await?).await
    }

    pub async fn get_bytes(&self, path: &str) -> Result<Bytes> {
        let request = self.request(Method::GET, path).await?;
        let response = Self::send(request).await?;
        Ok(response.bytes().await?)
    }

    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(value) = self.authorization().await? {
            request = request.header(AUTHORIZATION, value);
        }
        Ok(request)
    }

    async fn authorization(&self) -> Result<Option<HeaderValue>> {
        let Some(provider) = &self.auth else {
            return Ok(None);
        };

        match provider.token().await? {
            Some(token) if !token.expose_secret().is_empty() => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
                value.set_sensitive(true);
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Response status: {} ({})", status, response.url());

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(SdkError::HttpStatus {
            status: status.as_u16(),
            url,
            body,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        // 空回應（例如 204）視為 null
        let slice: &[u8] = if body.is_empty() { b"null" } else { &body };
        Ok(serde_json::from_slice(slice)?)
    }
}

#[async_trait]
impl ServiceMapSource for ApiClient {
    async fn fetch_services(&self) -> Result<Vec<ServiceMeta>> {
        let response: ServiceMapResponse = self.get_json(SERVICE_MAP_PATH).await?;
        Ok(response.services)
    }
}
