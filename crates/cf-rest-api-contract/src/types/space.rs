use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use super::common::{Link, Metadata, ToOneRelationship};

/// Space resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub relationships: SpaceRelationships,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub links: HashMap<String, Link>,
}

impl Space {
    /// GUID of the owning organization
    pub fn organization_guid(&self) -> Option<&str> {
        self.relationships.organization.guid()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpaceRelationships {
    #[serde(default)]
    pub organization: ToOneRelationship,
    #[serde(default)]
    pub quota: ToOneRelationship,
}

/// Space creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SpaceCreate {
    #[validate(length(min = 1, message = "Space name cannot be empty"))]
    pub name: String,
    pub relationships: SpaceCreateRelationships,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceCreateRelationships {
    pub organization: ToOneRelationship,
}

impl SpaceCreate {
    pub fn new(name: impl Into<String>, org_guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relationships: SpaceCreateRelationships {
                organization: ToOneRelationship::new(org_guid),
            },
            metadata: None,
        }
    }
}

/// Space update request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpaceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
