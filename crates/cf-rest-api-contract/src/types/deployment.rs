use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::common::{AppRelationship, Link, Metadata, Relationship};

/// Rollout strategy of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStrategy {
    Rolling,
    Canary,
}

/// Coarse deployment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatusValue {
    Active,
    Finalized,
}

/// Detailed deployment status reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatusReason {
    Deploying,
    Paused,
    Canceling,
    Deployed,
    Canceled,
    Superseded,
    Degenerate,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for DeploymentStatusReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeploymentStatusReason::Deploying => "DEPLOYING",
            DeploymentStatusReason::Paused => "PAUSED",
            DeploymentStatusReason::Canceling => "CANCELING",
            DeploymentStatusReason::Deployed => "DEPLOYED",
            DeploymentStatusReason::Canceled => "CANCELED",
            DeploymentStatusReason::Superseded => "SUPERSEDED",
            DeploymentStatusReason::Degenerate => "DEGENERATE",
            DeploymentStatusReason::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    pub value: DeploymentStatusValue,
    pub reason: DeploymentStatusReason,
    #[serde(default)]
    pub details: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRevision {
    pub guid: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReference {
    pub guid: String,
    #[serde(rename = "type")]
    pub process_type: String,
}

/// Deployment resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub guid: String,
    pub status: DeploymentStatus,
    #[serde(default)]
    pub strategy: Option<DeploymentStrategy>,
    #[serde(default)]
    pub droplet: Option<Relationship>,
    #[serde(default)]
    pub previous_droplet: Option<Relationship>,
    #[serde(default)]
    pub new_processes: Vec<ProcessReference>,
    #[serde(default)]
    pub revision: Option<DeploymentRevision>,
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

/// Deployment creation request.
///
/// Either a droplet or a revision may be given; with neither the app's
/// current droplet is deployed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droplet: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<DeploymentRevision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DeploymentStrategy>,
    pub relationships: AppRelationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl DeploymentCreate {
    pub fn new(app_guid: impl Into<String>) -> Self {
        Self {
            droplet: None,
            revision: None,
            strategy: None,
            relationships: AppRelationship::new(app_guid),
            metadata: None,
        }
    }

    pub fn with_droplet(mut self, droplet_guid: impl Into<String>) -> Self {
        self.droplet = Some(Relationship::new(droplet_guid));
        self
    }
}
