use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::common::{AppRelationship, Link, Metadata, Relationship};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionProcess {
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSidecar {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub process_types: Vec<String>,
    #[serde(default)]
    pub memory_in_mb: Option<u32>,
}

/// Revision resource: a snapshot of the code and configuration of an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub guid: String,
    pub version: u32,
    pub droplet: Relationship,
    #[serde(default)]
    pub processes: HashMap<String, RevisionProcess>,
    #[serde(default)]
    pub sidecars: Vec<RevisionSidecar>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deployable: bool,
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

/// Revision update request; only metadata is mutable
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevisionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
