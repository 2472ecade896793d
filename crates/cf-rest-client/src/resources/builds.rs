use cf_rest_api_contract::{Build, BuildCreate, BuildState};
use tokio_util::sync::CancellationToken;

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::poll::{PollOptions, PollTarget, Poller};
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/builds`
    BuildListOptions {
        guids: Filter => "guids",
        states: Filter => "states",
        app_guids: Filter => "app_guids",
        package_guids: Filter => "package_guids",
    }
}

impl PollTarget for Build {
    type State = BuildState;

    fn state(&self) -> BuildState {
        self.state
    }

    fn failure_reason(&self) -> Option<String> {
        self.error.clone()
    }
}

#[derive(Debug, Clone)]
pub struct BuildClient {
    api: Api,
}

impl BuildClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    /// Start staging a package
    pub async fn create(&self, request: &BuildCreate) -> RestClientResult<Build> {
        self.api.post("/v3/builds", request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<Build> {
        self.api.get(&format!("/v3/builds/{guid}")).await
    }

    pub async fn list(&self, options: &BuildListOptions) -> RestClientResult<(Vec<Build>, Pager)> {
        self.api.list_page("/v3/builds", options).await
    }

    pub async fn list_all(&self, options: Option<BuildListOptions>) -> RestClientResult<Vec<Build>> {
        self.api.list_all("/v3/builds", options).await
    }

    /// Wait for staging to finish; a `FAILED` build reports its `error`
    pub async fn poll_staged(
        &self,
        guid: &str,
        options: &PollOptions,
        cancel: &CancellationToken,
    ) -> RestClientResult<Build> {
        Poller::new([BuildState::Staged], [BuildState::Failed], *options)
            .poll(cancel, || self.get(guid))
            .await
    }
}
