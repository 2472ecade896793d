use cf_rest_api_contract::{Task, TaskCreate, TaskState};
use tokio_util::sync::CancellationToken;

use crate::api::Api;
use crate::error::RestClientResult;
use crate::poll::{PollOptions, PollTarget, Poller};
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/apps/:guid/tasks`
    TaskListOptions {
        guids: Filter => "guids",
        names: Filter => "names",
        states: Filter => "states",
        sequence_ids: Filter => "sequence_ids",
    }
}

impl PollTarget for Task {
    type State = TaskState;

    fn state(&self) -> TaskState {
        self.state
    }

    fn failure_reason(&self) -> Option<String> {
        self.result.failure_reason.clone()
    }
}

#[derive(Debug, Clone)]
pub struct TaskClient {
    api: Api,
}

impl TaskClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    /// Run a one-off task against the app's current droplet
    pub async fn create(&self, app_guid: &str, request: &TaskCreate) -> RestClientResult<Task> {
        self.api.post(&format!("/v3/apps/{app_guid}/tasks"), request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<Task> {
        self.api.get(&format!("/v3/tasks/{guid}")).await
    }

    /// Request cancellation; the task moves to `CANCELING` and then `FAILED`
    pub async fn cancel(&self, guid: &str) -> RestClientResult<Task> {
        self.api.post_empty(&format!("/v3/tasks/{guid}/actions/cancel")).await
    }

    pub async fn list_for_app_all(
        &self,
        app_guid: &str,
        options: Option<TaskListOptions>,
    ) -> RestClientResult<Vec<Task>> {
        self.api.list_all(&format!("/v3/apps/{app_guid}/tasks"), options).await
    }

    pub async fn poll_succeeded(
        &self,
        guid: &str,
        options: &PollOptions,
        cancel: &CancellationToken,
    ) -> RestClientResult<Task> {
        Poller::new([TaskState::Succeeded], [TaskState::Failed], *options)
            .poll(cancel, || self.get(guid))
            .await
    }
}
