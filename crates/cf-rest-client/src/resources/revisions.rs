use cf_rest_api_contract::{EnvironmentVariables, Revision, RevisionUpdate};

use crate::api::Api;
use crate::error::RestClientResult;
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/apps/:guid/revisions`
    RevisionListOptions {
        versions: Filter => "versions",
    }
}

#[derive(Debug, Clone)]
pub struct RevisionClient {
    api: Api,
}

impl RevisionClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<Revision> {
        self.api.get(&format!("/v3/revisions/{guid}")).await
    }

    pub async fn update(&self, guid: &str, request: &RevisionUpdate) -> RestClientResult<Revision> {
        self.api.patch(&format!("/v3/revisions/{guid}"), request).await
    }

    pub async fn list_for_app_all(
        &self,
        app_guid: &str,
        options: Option<RevisionListOptions>,
    ) -> RestClientResult<Vec<Revision>> {
        self.api.list_all(&format!("/v3/apps/{app_guid}/revisions"), options).await
    }

    /// Revisions currently running on the app's processes
    pub async fn list_deployed_for_app_all(&self, app_guid: &str) -> RestClientResult<Vec<Revision>> {
        self.api
            .list_all(
                &format!("/v3/apps/{app_guid}/revisions/deployed"),
                None::<RevisionListOptions>,
            )
            .await
    }

    pub async fn get_environment_variables(&self, guid: &str) -> RestClientResult<EnvironmentVariables> {
        self.api.get(&format!("/v3/revisions/{guid}/environment_variables")).await
    }
}
