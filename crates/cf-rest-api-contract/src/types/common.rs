//! Envelope and relationship types shared by every resource

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A hyperlink to a related resource or endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub method: Option<String>,
}

/// Pagination metadata returned with every list response.
///
/// `next` is present iff more results remain beyond the current page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub first: Option<Link>,
    #[serde(default)]
    pub last: Option<Link>,
    #[serde(default)]
    pub next: Option<Link>,
    #[serde(default)]
    pub previous: Option<Link>,
}

impl Pagination {
    /// The next page link, treating an empty `href` as absent
    pub fn next_page_href(&self) -> Option<&str> {
        self.next
            .as_ref()
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }

    /// The previous page link, treating an empty `href` as absent
    pub fn previous_page_href(&self) -> Option<&str> {
        self.previous
            .as_ref()
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }
}

/// One page of a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
}

/// User supplied labels and annotations.
///
/// A `None` value removes the key on update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub labels: HashMap<String, Option<String>>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub annotations: HashMap<String, Option<String>>,
}

impl Metadata {
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), Some(value.into()));
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), Some(value.into()));
        self
    }
}

/// Reference to another resource by GUID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub guid: String,
}

impl Relationship {
    pub fn new(guid: impl Into<String>) -> Self {
        Self { guid: guid.into() }
    }
}

/// A to-one relationship; `data` is `null` when unset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToOneRelationship {
    pub data: Option<Relationship>,
}

impl ToOneRelationship {
    pub fn new(guid: impl Into<String>) -> Self {
        Self {
            data: Some(Relationship::new(guid)),
        }
    }

    /// The related GUID, if any
    pub fn guid(&self) -> Option<&str> {
        self.data.as_ref().map(|r| r.guid.as_str())
    }
}

/// A to-many relationship
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToManyRelationships {
    #[serde(default)]
    pub data: Vec<Relationship>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub links: HashMap<String, Link>,
}

impl ToManyRelationships {
    pub fn new<I, S>(guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: guids.into_iter().map(Relationship::new).collect(),
            links: HashMap::new(),
        }
    }

    pub fn guids(&self) -> Vec<&str> {
        self.data.iter().map(|r| r.guid.as_str()).collect()
    }
}

/// The `relationships.app` block shared by app-scoped resources
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppRelationship {
    pub app: ToOneRelationship,
}

impl AppRelationship {
    pub fn new(app_guid: impl Into<String>) -> Self {
        Self {
            app: ToOneRelationship::new(app_guid),
        }
    }
}

/// User returned by the org and space role listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub guid: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub presentation_name: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}
