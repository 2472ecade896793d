use cf_rest_api_contract::{Deployment, DeploymentCreate, DeploymentStatusReason};
use tokio_util::sync::CancellationToken;

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::poll::{PollOptions, PollTarget, Poller};
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/deployments`
    DeploymentListOptions {
        app_guids: Filter => "app_guids",
        states: Filter => "states",
        status_reasons: Filter => "status_reasons",
        status_values: Filter => "status_values",
    }
}

// Deployments settle on the status reason, not the status value.
impl PollTarget for Deployment {
    type State = DeploymentStatusReason;

    fn state(&self) -> DeploymentStatusReason {
        self.status.reason
    }
}

#[derive(Debug, Clone)]
pub struct DeploymentClient {
    api: Api,
}

impl DeploymentClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &DeploymentCreate) -> RestClientResult<Deployment> {
        self.api.post("/v3/deployments", request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<Deployment> {
        self.api.get(&format!("/v3/deployments/{guid}")).await
    }

    pub async fn cancel(&self, guid: &str) -> RestClientResult<()> {
        let _: serde_json::Value = self
            .api
            .post_empty(&format!("/v3/deployments/{guid}/actions/cancel"))
            .await?;
        Ok(())
    }

    pub async fn list(&self, options: &DeploymentListOptions) -> RestClientResult<(Vec<Deployment>, Pager)> {
        self.api.list_page("/v3/deployments", options).await
    }

    pub async fn list_all(&self, options: Option<DeploymentListOptions>) -> RestClientResult<Vec<Deployment>> {
        self.api.list_all("/v3/deployments", options).await
    }

    pub async fn poll_deployed(
        &self,
        guid: &str,
        options: &PollOptions,
        cancel: &CancellationToken,
    ) -> RestClientResult<Deployment> {
        Poller::new(
            [DeploymentStatusReason::Deployed],
            [
                DeploymentStatusReason::Canceled,
                DeploymentStatusReason::Superseded,
                DeploymentStatusReason::Degenerate,
            ],
            *options,
        )
        .poll(cancel, || self.get(guid))
        .await
    }
}
