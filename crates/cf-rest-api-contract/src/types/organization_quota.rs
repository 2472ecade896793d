use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use super::common::{Link, ToManyRelationships};

/// App limits of a quota; `None` means unlimited
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppsQuota {
    #[serde(default)]
    pub total_memory_in_mb: Option<u64>,
    #[serde(default)]
    pub per_process_memory_in_mb: Option<u64>,
    #[serde(default)]
    pub log_rate_limit_in_bytes_per_second: Option<u64>,
    #[serde(default)]
    pub total_instances: Option<u32>,
    #[serde(default)]
    pub per_app_tasks: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServicesQuota {
    #[serde(default)]
    pub paid_services_allowed: bool,
    #[serde(default)]
    pub total_service_instances: Option<u32>,
    #[serde(default)]
    pub total_service_keys: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutesQuota {
    #[serde(default)]
    pub total_routes: Option<u32>,
    #[serde(default)]
    pub total_reserved_ports: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainsQuota {
    #[serde(default)]
    pub total_domains: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrganizationQuotaRelationships {
    #[serde(default)]
    pub organizations: ToManyRelationships,
}

/// Organization quota resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationQuota {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub apps: AppsQuota,
    #[serde(default)]
    pub services: ServicesQuota,
    #[serde(default)]
    pub routes: RoutesQuota,
    #[serde(default)]
    pub domains: DomainsQuota,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub relationships: OrganizationQuotaRelationships,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub links: HashMap<String, Link>,
}

/// Organization quota creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrganizationQuotaCreate {
    #[validate(length(min = 1, message = "Quota name cannot be empty"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apps: Option<AppsQuota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<ServicesQuota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<RoutesQuota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<DomainsQuota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<OrganizationQuotaRelationships>,
}

impl OrganizationQuotaCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            apps: None,
            services: None,
            routes: None,
            domains: None,
            relationships: None,
        }
    }
}

/// Organization quota update request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrganizationQuotaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apps: Option<AppsQuota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<ServicesQuota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<RoutesQuota>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<DomainsQuota>,
}
