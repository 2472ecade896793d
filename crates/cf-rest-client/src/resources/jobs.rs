use cf_rest_api_contract::{Job, JobRef, JobState};
use tokio_util::sync::CancellationToken;

use crate::api::Api;
use crate::error::RestClientResult;
use crate::poll::{PollOptions, PollTarget, Poller};

impl PollTarget for Job {
    type State = JobState;

    fn state(&self) -> JobState {
        self.state
    }

    fn failure_reason(&self) -> Option<String> {
        Job::failure_reason(self)
    }
}

#[derive(Debug, Clone)]
pub struct JobClient {
    api: Api,
}

impl JobClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn get(&self, job: &JobRef) -> RestClientResult<Job> {
        self.api.get(&format!("/v3/jobs/{}", job.guid())).await
    }

    /// Wait for the job to reach `COMPLETE`.
    ///
    /// A `FAILED` job is reported with its error details joined into the
    /// failure reason.
    pub async fn poll_complete(
        &self,
        job: &JobRef,
        options: &PollOptions,
        cancel: &CancellationToken,
    ) -> RestClientResult<Job> {
        Poller::new([JobState::Complete], [JobState::Failed], *options)
            .poll(cancel, || self.get(job))
            .await
    }
}
