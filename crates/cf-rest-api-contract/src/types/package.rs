use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::common::{AppRelationship, Link, Metadata};

/// Package type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Bits,
    Docker,
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageType::Bits => f.write_str("bits"),
            PackageType::Docker => f.write_str("docker"),
        }
    }
}

/// Package processing states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageState {
    AwaitingUpload,
    ProcessingUpload,
    Ready,
    Failed,
    Copying,
    Expired,
}

impl std::fmt::Display for PackageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PackageState::AwaitingUpload => "AWAITING_UPLOAD",
            PackageState::ProcessingUpload => "PROCESSING_UPLOAD",
            PackageState::Ready => "READY",
            PackageState::Failed => "FAILED",
            PackageState::Copying => "COPYING",
            PackageState::Expired => "EXPIRED",
        };
        f.write_str(s)
    }
}

/// Package resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub guid: String,
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub state: PackageState,
    #[serde(default)]
    pub data: serde_json::Value,
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

/// Package creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageCreate {
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub relationships: AppRelationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl PackageCreate {
    /// A bits package to be filled by an upload
    pub fn bits(app_guid: impl Into<String>) -> Self {
        Self {
            package_type: PackageType::Bits,
            relationships: AppRelationship::new(app_guid),
            metadata: None,
        }
    }
}
