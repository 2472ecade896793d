//! Per-resource clients
//!
//! Each client is a thin binding of one v3 resource onto the generic
//! request, list and poll helpers. They share the transport of the
//! [`CfClient`] that handed them out.

pub mod apps;
pub mod builds;
pub mod deployments;
pub mod droplets;
pub mod isolation_segments;
pub mod jobs;
pub mod manifests;
pub mod organization_quotas;
pub mod organizations;
pub mod packages;
pub mod revisions;
pub mod service_plans;
pub mod spaces;
pub mod tasks;

pub use apps::*;
pub use builds::*;
pub use deployments::*;
pub use droplets::*;
pub use isolation_segments::*;
pub use jobs::*;
pub use manifests::*;
pub use organization_quotas::*;
pub use organizations::*;
pub use packages::*;
pub use revisions::*;
pub use service_plans::*;
pub use spaces::*;
pub use tasks::*;

use std::sync::Arc;

use cf_client_api::Transport;

use crate::api::Api;
use crate::client::RestClient;
use crate::config::ClientConfig;
use crate::error::RestClientResult;
use crate::poll::PollOptions;

/// Entry point to the Cloud Foundry v3 API
#[derive(Debug, Clone)]
pub struct CfClient {
    api: Api,
    poll: PollOptions,
}

impl CfClient {
    /// Create a client over any transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            api: Api::new(transport),
            poll: PollOptions::default(),
        }
    }

    /// Create a client talking HTTP to the configured endpoint
    pub fn from_config(config: &ClientConfig) -> RestClientResult<Self> {
        let transport = RestClient::new(config)?;
        Ok(Self::new(Arc::new(transport)).with_poll_options(config.poll))
    }

    pub fn with_poll_options(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }

    /// Default timing for the `poll_*` helpers
    pub fn poll_options(&self) -> &PollOptions {
        &self.poll
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn apps(&self) -> AppClient {
        AppClient::new(self.api.clone())
    }

    pub fn builds(&self) -> BuildClient {
        BuildClient::new(self.api.clone())
    }

    pub fn deployments(&self) -> DeploymentClient {
        DeploymentClient::new(self.api.clone())
    }

    pub fn droplets(&self) -> DropletClient {
        DropletClient::new(self.api.clone())
    }

    pub fn isolation_segments(&self) -> IsolationSegmentClient {
        IsolationSegmentClient::new(self.api.clone())
    }

    pub fn jobs(&self) -> JobClient {
        JobClient::new(self.api.clone())
    }

    pub fn manifests(&self) -> ManifestClient {
        ManifestClient::new(self.api.clone())
    }

    pub fn organization_quotas(&self) -> OrganizationQuotaClient {
        OrganizationQuotaClient::new(self.api.clone())
    }

    pub fn organizations(&self) -> OrganizationClient {
        OrganizationClient::new(self.api.clone())
    }

    pub fn packages(&self) -> PackageClient {
        PackageClient::new(self.api.clone())
    }

    pub fn revisions(&self) -> RevisionClient {
        RevisionClient::new(self.api.clone())
    }

    pub fn service_plans(&self) -> ServicePlanClient {
        ServicePlanClient::new(self.api.clone())
    }

    pub fn spaces(&self) -> SpaceClient {
        SpaceClient::new(self.api.clone())
    }

    pub fn tasks(&self) -> TaskClient {
        TaskClient::new(self.api.clone())
    }
}
