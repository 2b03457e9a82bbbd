use crate::adapters::http::{create_clients, Clients};
use crate::config::ApiConfig;
use crate::core::payments::PaymentsApi;
use crate::core::resolver::ServicePathResolver;
use crate::core::revenue::RevenueApi;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;

/// Revenue and payment APIs sharing one connection pool and one service map cache.
#[derive(Clone)]
pub struct Sdk {
    pub revenue: RevenueApi,
    pub payments: PaymentsApi,
}

impl Sdk {
    /// Builds an SDK on the process-wide service map cache.
    ///
    /// Only the first instance in the process loads the map; later instances
    /// reuse it regardless of their base URL or fetch timeout.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let clients = Self::clients(config)?;
        let resolver = ServicePathResolver::process_wide(
            Arc::new(clients.revenue.clone()),
            config.service_map_timeout,
        );
        Ok(Self::assemble(clients, resolver))
    }

    /// Builds an SDK with its own service map cache, loaded from this
    /// configuration's revenue endpoint.
    pub fn isolated(config: &ApiConfig) -> Result<Self> {
        let clients = Self::clients(config)?;
        let resolver = ServicePathResolver::new(Arc::new(clients.revenue.clone()))
            .with_fetch_timeout(config.service_map_timeout);
        Ok(Self::assemble(clients, Arc::new(resolver)))
    }

    fn clients(config: &ApiConfig) -> Result<Clients> {
        config.validate()?;
        let clients = create_clients(config)?;

        tracing::debug!(
            "SDK ready (revenue: {}, payment: {})",
            clients.revenue.base_url(),
            clients.payment.base_url()
        );
        Ok(clients)
    }

    fn assemble(clients: Clients, resolver: Arc<ServicePathResolver>) -> Self {
        Self {
            revenue: RevenueApi::with_resolver(clients.revenue, resolver),
            payments: PaymentsApi::new(clients.payment),
        }
    }
}
