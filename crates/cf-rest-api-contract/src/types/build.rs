use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::app::Lifecycle;
use super::common::{AppRelationship, Link, Metadata, Relationship};

/// Build staging states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildState {
    Staging,
    Staged,
    Failed,
}

impl std::fmt::Display for BuildState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BuildState::Staging => "STAGING",
            BuildState::Staged => "STAGED",
            BuildState::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Build resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub guid: String,
    pub state: BuildState,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub staging_memory_in_mb: Option<u32>,
    #[serde(default)]
    pub staging_disk_in_mb: Option<u32>,
    #[serde(default)]
    pub lifecycle: Option<Lifecycle>,
    pub package: Relationship,
    #[serde(default)]
    pub droplet: Option<Relationship>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub relationships: AppRelationship,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub links: HashMap<String, Link>,
}

/// Build creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildCreate {
    pub package: Relationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_memory_in_mb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_disk_in_mb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl BuildCreate {
    pub fn new(package_guid: impl Into<String>) -> Self {
        Self {
            package: Relationship::new(package_guid),
            lifecycle: None,
            staging_memory_in_mb: None,
            staging_disk_in_mb: None,
            metadata: None,
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }
}
