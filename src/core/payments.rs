use crate::adapters::http::ApiClient;
use crate::domain::model::PeriodicOptions;
use crate::utils::error::Result;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct InitiatePayment {
    pub service_type: String,
    pub lga: i64,
    /// Legacy name for `payment_type`.
    pub channel: Option<String>,
    pub payment_type: Option<String>,
    pub gateway: Option<String>,
    /// Server computes the amount; set only for staff overrides.
    pub amount: Option<f64>,
    pub callback_url: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub form: Option<Map<String, Value>>,
    pub periodic: PeriodicOptions,
}

impl InitiatePayment {
    pub fn new(service_type: impl Into<String>, lga: i64) -> Self {
        Self {
            service_type: service_type.into(),
            lga,
            ..Default::default()
        }
    }

    fn body(&self) -> InitiateBody<'_> {
        InitiateBody {
            service_type: &self.service_type,
            lga: self.lga,
            payment_type: self.payment_type.as_deref().or(self.channel.as_deref()),
            gateway: self.gateway.as_deref(),
            callback_url: self.callback_url.as_deref(),
            periodic: &self.periodic,
            metadata: self.metadata.as_ref(),
            form: self.form.as_ref(),
            amount: self.amount,
        }
    }
}

#[derive(Serialize)]
struct InitiateBody<'a> {
    service_type: &'a str,
    lga: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_type: Option<&'a str>,
    // 後端要求明確送出 null
    gateway: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
    #[serde(flatten)]
    periodic: &'a PeriodicOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    form: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentInitiation {
    pub reference: String,
    #[serde(default)]
    pub payment_url: Option<String>,
}

/// Raw export payload as returned by the server.
#[derive(Debug, Clone)]
pub struct ExportFile {
    bytes: Bytes,
}

impl ExportFile {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Parses a CSV export into header-keyed rows.
    pub fn csv_records(&self) -> Result<Vec<HashMap<String, String>>> {
        let mut reader = csv::Reader::from_reader(self.as_bytes());
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Endpoints of the payment service.
#[derive(Clone)]
pub struct PaymentsApi {
    client: ApiClient,
}

impl PaymentsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn initiate(&self, payment: &InitiatePayment) -> Result<PaymentInitiation> {
        let initiation: PaymentInitiation =
            self.client.post_json("/initiate/", &payment.body()).await?;
        tracing::debug!("Payment initiated: {}", initiation.reference);
        Ok(initiation)
    }

    pub async fn list<Q: Serialize + ?Sized>(&self, params: &Q) -> Result<Value> {
        self.client.get_json_with_query("/", params).await
    }

    pub async fn export_csv(&self) -> Result<ExportFile> {
        let bytes = self.client.get_bytes("/export/csv/").await?;
        Ok(ExportFile { bytes })
    }

    pub async fn export_pdf(&self) -> Result<ExportFile> {
        let bytes = self.client.get_bytes("/export/pdf/").await?;
        Ok(ExportFile { bytes })
    }
}
