//! Slug to REST path resolution.
//!
//! The service map is loaded at most once per resolver, and the SDK
//! constructors share one process-wide resolver. Concurrent callers
//! that arrive while the load is in flight wait on the same load instead of
//! issuing their own request. Any load failure (transport error, non-2xx,
//! malformed payload, timeout) is absorbed by caching the bundled fallback
//! map. Once resolved, the map is never replaced.

use crate::domain::fallback::fallback_service_map;
use crate::domain::model::{PeriodicUnit, ServiceMap, ServiceMeta};
use crate::domain::ports::ServiceMapSource;
use crate::utils::error::{Result, SdkError};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

static PROCESS_RESOLVER: OnceLock<Arc<ServicePathResolver>> = OnceLock::new();

/// Where the cached service map came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOrigin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ResolvedServiceMap {
    pub origin: MapOrigin,
    pub map: ServiceMap,
}

pub struct ServicePathResolver {
    source: Arc<dyn ServiceMapSource>,
    fetch_timeout: Option<Duration>,
    resolved: OnceCell<ResolvedServiceMap>,
}

impl ServicePathResolver {
    pub fn new(source: Arc<dyn ServiceMapSource>) -> Self {
        Self {
            source,
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
            resolved: OnceCell::new(),
        }
    }

    /// Resolver shared by every SDK instance in the process.
    ///
    /// The first caller's source and timeout are installed; later arguments
    /// are ignored.
    pub fn process_wide(
        source: Arc<dyn ServiceMapSource>,
        fetch_timeout: Option<Duration>,
    ) -> Arc<Self> {
        let resolver = PROCESS_RESOLVER
            .get_or_init(|| Arc::new(Self::new(source).with_fetch_timeout(fetch_timeout)));
        Arc::clone(resolver)
    }

    /// `None` waits on the remote map indefinitely.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Option<Duration>) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Returns the REST path segment for `slug`.
    ///
    /// A non-empty `path_override` is returned as is without touching the
    /// service map. Slugs missing from the map get [`default_path`].
    pub async fn resolve(&self, slug: &str, path_override: Option<&str>) -> String {
        if let Some(path) = path_override.filter(|path| !path.is_empty()) {
            return path.to_string();
        }

        let resolved = self.resolved().await;
        match resolved.map.path_for(slug) {
            Some(path) => path.to_string(),
            None => {
                let path = default_path(slug);
                debug!(slug, path = %path, "Slug not in service map, using default path");
                path
            }
        }
    }

    pub async fn service_map(&self) -> &ServiceMap {
        &self.resolved().await.map
    }

    pub async fn service_meta(&self, slug: &str) -> Option<&ServiceMeta> {
        self.service_map().await.get(slug)
    }

    pub async fn is_periodic(&self, slug: &str) -> bool {
        self.service_meta(slug)
            .await
            .and_then(|meta| meta.is_periodic)
            .unwrap_or(false)
    }

    pub async fn allowed_units(&self, slug: &str) -> Option<&[PeriodicUnit]> {
        self.service_meta(slug)
            .await
            .and_then(|meta| meta.allowed_units.as_deref())
    }

    /// Origin of the cached map, or `None` before the first load settles.
    pub fn origin(&self) -> Option<MapOrigin> {
        self.resolved.get().map(|resolved| resolved.origin)
    }

    async fn resolved(&self) -> &ResolvedServiceMap {
        self.resolved.get_or_init(|| self.load()).await
    }

    #[tracing::instrument(skip_all)]
    async fn load(&self) -> ResolvedServiceMap {
        info!("Loading service map");

        match self.fetch().await {
            Ok(services) => {
                let map = ServiceMap::from_services(services);
                if map.is_empty() {
                    warn!("Remote service map is empty, every slug will use its default path");
                }
                info!(services = map.len(), "Service map loaded from remote");
                ResolvedServiceMap {
                    origin: MapOrigin::Remote,
                    map,
                }
            }
            Err(e) => {
                warn!(error = %e, "Service map unavailable, using bundled fallback");
                ResolvedServiceMap {
                    origin: MapOrigin::Fallback,
                    map: fallback_service_map(),
                }
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<ServiceMeta>> {
        let Some(limit) = self.fetch_timeout else {
            return self.source.fetch_services().await;
        };

        tokio::time::timeout(limit, self.source.fetch_services())
            .await
            .map_err(|_| SdkError::Timeout {
                operation: "service map fetch",
                timeout: limit,
            })?
    }
}

/// Best-guess path for an unmapped slug: underscores become dashes and an
/// `s` is appended unless the result already ends in one
/// (`sales_tax` becomes `sales-taxs`).
pub fn default_path(slug: &str) -> String {
    let dashed = slug.replace('_', "-");
    if dashed.ends_with('s') {
        dashed
    } else {
        format!("{}s", dashed)
    }
}
