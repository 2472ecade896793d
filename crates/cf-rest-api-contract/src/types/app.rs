use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use super::common::{Link, Metadata, ToOneRelationship};

/// Desired app state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    Started,
    Stopped,
}

/// Lifecycle used to stage an app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleType {
    Buildpack,
    Docker,
    Cnb,
}

impl std::fmt::Display for LifecycleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LifecycleType::Buildpack => "buildpack",
            LifecycleType::Docker => "docker",
            LifecycleType::Cnb => "cnb",
        };
        f.write_str(s)
    }
}

/// Lifecycle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    #[serde(rename = "type")]
    pub lifecycle_type: LifecycleType,
    #[serde(default)]
    pub data: LifecycleData,
}

impl Lifecycle {
    /// Buildpack lifecycle with the given buildpacks and stack
    pub fn buildpack(buildpacks: Vec<String>, stack: Option<String>) -> Self {
        Self {
            lifecycle_type: LifecycleType::Buildpack,
            data: LifecycleData { buildpacks, stack },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifecycleData {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub buildpacks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stack: Option<String>,
}

/// App resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub guid: String,
    pub name: String,
    pub state: AppState,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lifecycle: Option<Lifecycle>,
    #[serde(default)]
    pub relationships: AppSpaceRelationship,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub links: HashMap<String, Link>,
}

impl App {
    /// GUID of the space the app lives in
    pub fn space_guid(&self) -> Option<&str> {
        self.relationships.space.guid()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppSpaceRelationship {
    #[serde(default)]
    pub space: ToOneRelationship,
}

/// App creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppCreate {
    #[validate(length(min = 1, message = "App name cannot be empty"))]
    pub name: String,
    pub relationships: AppSpaceRelationship,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub environment_variables: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl AppCreate {
    pub fn new(name: impl Into<String>, space_guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relationships: AppSpaceRelationship {
                space: ToOneRelationship::new(space_guid),
            },
            environment_variables: HashMap::new(),
            lifecycle: None,
            metadata: None,
        }
    }
}

/// App update request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// User-provided environment variables of an app.
///
/// Setting a variable to `None` removes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentVariables {
    #[serde(default)]
    pub var: HashMap<String, Option<String>>,
}

/// Permissions of the current user on an app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPermissions {
    pub read_basic_data: bool,
    pub read_sensitive_data: bool,
}

/// Whether the app runtime accepts ssh connections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSshEnabled {
    pub enabled: bool,
    #[serde(default)]
    pub reason: String,
}
