use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    Citizen,
    Hybrid,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodicUnit {
    Day,
    Week,
    Month,
    Year,
}

/// Billing cadence attached to periodic services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_unit: Option<PeriodicUnit>,
    // 0 與未設定等價，不送出
    #[serde(default, skip_serializing_if = "is_unset_count")]
    pub billing_count: Option<u32>,
}

fn is_unset_count(count: &Option<u32>) -> bool {
    matches!(count, None | Some(0))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMeta {
    pub slug: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_periodic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_units: Option<Vec<PeriodicUnit>>,
}

/// Payload of `GET /core/services-map/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceMapResponse {
    pub services: Vec<ServiceMeta>,
}

/// Slug-keyed service metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceMap {
    entries: HashMap<String, ServiceMeta>,
}

impl ServiceMap {
    /// Keys entries by slug. A repeated slug replaces the earlier entry.
    pub fn from_services(services: impl IntoIterator<Item = ServiceMeta>) -> Self {
        let entries = services
            .into_iter()
            .map(|meta| (meta.slug.clone(), meta))
            .collect();
        Self { entries }
    }

    pub fn get(&self, slug: &str) -> Option<&ServiceMeta> {
        self.entries.get(slug)
    }

    pub fn path_for(&self, slug: &str) -> Option<&str> {
        self.entries.get(slug).map(|meta| meta.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceMeta> {
        self.entries.values()
    }

    /// Entries sorted by slug, for stable listings.
    pub fn sorted(&self) -> Vec<&ServiceMeta> {
        let mut metas: Vec<&ServiceMeta> = self.entries.values().collect();
        metas.sort_by(|a, b| a.slug.cmp(&b.slug));
        metas
    }
}
