use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::app::Lifecycle;
use super::common::{Link, Metadata, ToOneRelationship};

/// Droplet states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropletState {
    AwaitingUpload,
    ProcessingUpload,
    Staged,
    Copying,
    Failed,
    Expired,
}

impl std::fmt::Display for DropletState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DropletState::AwaitingUpload => "AWAITING_UPLOAD",
            DropletState::ProcessingUpload => "PROCESSING_UPLOAD",
            DropletState::Staged => "STAGED",
            DropletState::Copying => "COPYING",
            DropletState::Failed => "FAILED",
            DropletState::Expired => "EXPIRED",
        };
        f.write_str(s)
    }
}

/// Buildpack detected while staging a droplet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedBuildpack {
    pub name: String,
    #[serde(default)]
    pub detect_output: Option<String>,
    #[serde(default)]
    pub buildpack_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Droplet resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    pub guid: String,
    pub state: DropletState,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub lifecycle: Option<Lifecycle>,
    #[serde(default)]
    pub execution_metadata: Option<String>,
    #[serde(default)]
    pub process_types: HashMap<String, String>,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub buildpacks: Vec<DetectedBuildpack>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub relationships: DropletRelationships,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub links: HashMap<String, Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DropletRelationships {
    #[serde(default)]
    pub app: ToOneRelationship,
}
