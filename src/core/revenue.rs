use crate::adapters::http::ApiClient;
use crate::core::resolver::{ServicePathResolver, DEFAULT_FETCH_TIMEOUT};
use crate::domain::model::{PeriodicOptions, PeriodicUnit, ServiceMeta};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt::Display;
use std::sync::Arc;

/// Per-call options for revenue requests.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Explicit resource path; skips service map resolution.
    pub path_override: Option<String>,
}

impl RequestOptions {
    pub fn with_path_override(path: impl Into<String>) -> Self {
        Self {
            path_override: Some(path.into()),
        }
    }
}

/// Body of an application create request. Extra fields (`holder_id` etc.)
/// are sent alongside the known ones.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplicationPayload {
    pub payment_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lga: Option<i64>,
    #[serde(flatten)]
    pub periodic: PeriodicOptions,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApplicationPayload {
    pub fn new(payment_reference: impl Into<String>) -> Self {
        Self {
            payment_reference: payment_reference.into(),
            ..Default::default()
        }
    }

    pub fn with_lga(mut self, lga: i64) -> Self {
        self.lga = Some(lga);
        self
    }

    pub fn with_billing(mut self, unit: PeriodicUnit, count: u32) -> Self {
        self.periodic = PeriodicOptions {
            billing_unit: Some(unit),
            billing_count: Some(count),
        };
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// Application endpoints of the revenue service.
#[derive(Clone)]
pub struct RevenueApi {
    client: ApiClient,
    resolver: Arc<ServicePathResolver>,
}

impl RevenueApi {
    /// Resolves slugs through the process-wide resolver. `client` becomes the
    /// service map source if no other SDK instance installed one first.
    pub fn new(client: ApiClient) -> Self {
        let source = Arc::new(client.clone());
        let resolver = ServicePathResolver::process_wide(source, Some(DEFAULT_FETCH_TIMEOUT));
        Self::with_resolver(client, resolver)
    }

    pub fn with_resolver(client: ApiClient, resolver: Arc<ServicePathResolver>) -> Self {
        Self { client, resolver }
    }

    pub fn resolver(&self) -> &Arc<ServicePathResolver> {
        &self.resolver
    }

    async fn service_path(&self, slug: &str, opts: Option<&RequestOptions>) -> String {
        let path_override = opts.and_then(|opts| opts.path_override.as_deref());
        self.resolver.resolve(slug, path_override).await
    }

    pub async fn create(
        &self,
        slug: &str,
        payload: &ApplicationPayload,
        opts: Option<&RequestOptions>,
    ) -> Result<Value> {
        let path = self.service_path(slug, opts).await;
        self.client.post_json(&format!("/{}/", path), payload).await
    }

    pub async fn list<Q>(
        &self,
        slug: &str,
        params: &Q,
        opts: Option<&RequestOptions>,
    ) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let path = self.service_path(slug, opts).await;
        self.client
            .get_json_with_query(&format!("/{}/", path), params)
            .await
    }

    pub async fn retrieve(
        &self,
        slug: &str,
        id: impl Display,
        opts: Option<&RequestOptions>,
    ) -> Result<Value> {
        let path = self.service_path(slug, opts).await;
        self.client.get_json(&format!("/{}/{}/", path, id)).await
    }

    /// `body` defaults to `{}`.
    pub async fn approve(
        &self,
        slug: &str,
        id: impl Display,
        body: Option<&Value>,
        opts: Option<&RequestOptions>,
    ) -> Result<Value> {
        let path = self.service_path(slug, opts).await;
        let empty = json!({});
        self.client
            .post_json(&format!("/{}/{}/approve/", path, id), body.unwrap_or(&empty))
            .await
    }

    pub async fn reject(
        &self,
        slug: &str,
        id: impl Display,
        reason: &str,
        opts: Option<&RequestOptions>,
    ) -> Result<Value> {
        let path = self.service_path(slug, opts).await;
        self.client
            .post_json(
                &format!("/{}/{}/reject/", path, id),
                &json!({ "rejection_reason": reason }),
            )
            .await
    }

    pub async fn resubmit(
        &self,
        slug: &str,
        id: impl Display,
        patch: &Value,
        opts: Option<&RequestOptions>,
    ) -> Result<Value> {
        let path = self.service_path(slug, opts).await;
        self.client
            .post_json(&format!("/{}/{}/resubmit/", path, id), patch)
            .await
    }

    pub async fn service_meta(&self, slug: &str) -> Option<&ServiceMeta> {
        self.resolver.service_meta(slug).await
    }

    pub async fn is_periodic(&self, slug: &str) -> bool {
        self.resolver.is_periodic(slug).await
    }

    pub async fn allowed_units(&self, slug: &str) -> Option<&[PeriodicUnit]> {
        self.resolver.allowed_units(slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_payload_flattens_fields() {
        let payload = ApplicationPayload::new("PAY-001")
            .with_lga(7)
            .with_billing(PeriodicUnit::Week, 2)
            .with_field("holder_id", json!(42));

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "payment_reference": "PAY-001",
                "lga": 7,
                "billing_unit": "week",
                "billing_count": 2,
                "holder_id": 42
            })
        );
    }

    #[test]
    fn test_application_payload_omits_unset_fields() {
        let payload = ApplicationPayload::new("PAY-002");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "payment_reference": "PAY-002" })
        );
    }
}
