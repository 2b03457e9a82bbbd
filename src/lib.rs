pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::auth::StaticToken;
pub use crate::adapters::http::{create_clients, ApiClient, Clients};
pub use crate::config::{ApiConfig, SdkConfig};
pub use crate::core::payments::{ExportFile, InitiatePayment, PaymentInitiation, PaymentsApi};
pub use crate::core::resolver::{default_path, MapOrigin, ServicePathResolver};
pub use crate::core::revenue::{ApplicationPayload, RequestOptions, RevenueApi};
pub use crate::core::sdk::Sdk;
pub use crate::domain::model::{
    ApplicationType, PeriodicOptions, PeriodicUnit, ServiceMap, ServiceMeta,
};
pub use crate::domain::ports::{AuthTokenProvider, ServiceMapSource};
pub use crate::utils::error::{Result, SdkError};
