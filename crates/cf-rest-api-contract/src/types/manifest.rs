//! App manifest model, applied to a space as a YAML document

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::error::ApiContractError;

/// Top-level manifest document; the API requires the `applications` wrapper
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub applications: Vec<AppManifest>,
}

impl Manifest {
    /// Wrap a single app manifest
    pub fn single(app: AppManifest) -> Self {
        Self {
            applications: vec![app],
        }
    }

    /// Pick one application: by name when given, otherwise the only entry
    pub fn select(self, name: Option<&str>) -> Result<AppManifest, ApiContractError> {
        match name {
            Some(name) => self
                .applications
                .into_iter()
                .find(|app| app.name == name)
                .ok_or_else(|| ApiContractError::UnknownApplication(name.to_string())),
            None => {
                let count = self.applications.len();
                let mut apps = self.applications.into_iter();
                match (apps.next(), count) {
                    (Some(app), 1) => Ok(app),
                    _ => Err(ApiContractError::AmbiguousManifest(count)),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppManifestDocker {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppManifestRoute {
    pub route: String,
}

/// Desired configuration of a single app
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct AppManifest {
    #[validate(length(min = 1, message = "Manifest app name cannot be empty"))]
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub buildpacks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub command: Option<String>,
    #[serde(
        rename = "disk_quota",
        alias = "disk-quota",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub disk_quota: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub docker: Option<AppManifestDocker>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub health_check_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub health_check_http_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instances: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub log_rate_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub memory: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub no_route: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub routes: Vec<AppManifestRoute>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timeout: Option<u32>,
}

impl AppManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
