use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::common::{AppRelationship, Link, Metadata};

/// One-off task states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Pending,
    Running,
    Succeeded,
    Canceling,
    Failed,
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskState::Pending => "PENDING",
            TaskState::Running => "RUNNING",
            TaskState::Succeeded => "SUCCEEDED",
            TaskState::Canceling => "CANCELING",
            TaskState::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub failure_reason: Option<String>,
}

/// Task resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub guid: String,
    #[serde(default)]
    pub sequence_id: u32,
    pub name: String,
    #[serde(default)]
    pub command: Option<String>,
    pub state: TaskState,
    #[serde(default)]
    pub memory_in_mb: u32,
    #[serde(default)]
    pub disk_in_mb: u32,
    #[serde(default)]
    pub result: TaskResult,
    #[serde(default)]
    pub droplet_guid: Option<String>,
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

/// Task creation request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_in_mb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_in_mb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droplet_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl TaskCreate {
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            ..Default::default()
        }
    }
}
