use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::common::{Link, Metadata, ToOneRelationship};

/// Who can see a service plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServicePlanVisibility {
    Public,
    Admin,
    Organization,
    Space,
}

impl std::fmt::Display for ServicePlanVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServicePlanVisibility::Public => "public",
            ServicePlanVisibility::Admin => "admin",
            ServicePlanVisibility::Organization => "organization",
            ServicePlanVisibility::Space => "space",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePlanBrokerCatalog {
    pub id: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub maximum_polling_duration: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServicePlanRelationships {
    #[serde(default)]
    pub service_offering: ToOneRelationship,
    #[serde(default)]
    pub space: ToOneRelationship,
}

/// Service plan resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePlan {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub visibility_type: ServicePlanVisibility,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub free: bool,
    #[serde(default)]
    pub broker_catalog: Option<ServicePlanBrokerCatalog>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub relationships: ServicePlanRelationships,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub links: HashMap<String, Link>,
}

/// Service plan update request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServicePlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
