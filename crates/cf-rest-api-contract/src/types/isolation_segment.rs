use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use super::common::{Link, Metadata};

/// Isolation segment resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationSegment {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub links: HashMap<String, Link>,
}

/// Isolation segment creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IsolationSegmentCreate {
    #[validate(length(min = 1, message = "Isolation segment name cannot be empty"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl IsolationSegmentCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: None,
        }
    }
}

/// Isolation segment update request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IsolationSegmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
