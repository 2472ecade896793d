//! API contract types for the Cloud Foundry v3 control plane

mod app;
mod build;
mod common;
mod deployment;
mod droplet;
mod isolation_segment;
mod job;
mod manifest;
mod organization;
mod organization_quota;
mod package;
mod revision;
mod service_plan;
mod space;
mod task;

pub use app::*;
pub use build::*;
pub use common::*;
pub use deployment::*;
pub use droplet::*;
pub use isolation_segment::*;
pub use job::*;
pub use manifest::*;
pub use organization::*;
pub use organization_quota::*;
pub use package::*;
pub use revision::*;
pub use service_plan::*;
pub use space::*;
pub use task::*;
