//! Cloud Foundry v3 REST API contract types and validation
//!
//! This crate defines the wire types for the control-plane resources
//! (organizations, spaces, apps, packages, builds, droplets, jobs, tasks,
//! deployments, revisions, isolation segments, service plans and quotas)
//! together with the pagination and error envelopes shared by every list
//! and failure response. The types are shared between the REST client,
//! the mock transport and the push orchestration.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
