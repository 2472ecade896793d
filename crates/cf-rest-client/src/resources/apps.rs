use cf_rest_api_contract::validation::validate_app_create;
use cf_rest_api_contract::{
    App, AppCreate, AppPermissions, AppSshEnabled, AppUpdate, EnvironmentVariables, JobRef,
    LifecycleType,
};

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/apps`
    AppListOptions {
        guids: Filter => "guids",
        names: Filter => "names",
        space_guids: Filter => "space_guids",
        organization_guids: Filter => "organization_guids",
        stacks: Filter => "stacks",
        lifecycle_type: Option<LifecycleType> => "lifecycle_type",
    }
}

impl AppListOptions {
    /// Look up an app by name within one space
    pub fn by_name(name: impl Into<String>, space_guid: impl Into<String>) -> Self {
        Self {
            names: Filter::new([name.into()]),
            space_guids: Filter::new([space_guid.into()]),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppClient {
    api: Api,
}

impl AppClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &AppCreate) -> RestClientResult<App> {
        validate_app_create(request)?;
        self.api.post("/v3/apps", request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<App> {
        self.api.get(&format!("/v3/apps/{guid}")).await
    }

    pub async fn update(&self, guid: &str, request: &AppUpdate) -> RestClientResult<App> {
        self.api.patch(&format!("/v3/apps/{guid}"), request).await
    }

    pub async fn delete(&self, guid: &str) -> RestClientResult<JobRef> {
        self.api.delete(&format!("/v3/apps/{guid}")).await
    }

    pub async fn list(&self, options: &AppListOptions) -> RestClientResult<(Vec<App>, Pager)> {
        self.api.list_page("/v3/apps", options).await
    }

    pub async fn list_all(&self, options: Option<AppListOptions>) -> RestClientResult<Vec<App>> {
        self.api.list_all("/v3/apps", options).await
    }

    pub async fn single(&self, options: AppListOptions) -> RestClientResult<App> {
        self.api.single("/v3/apps", options).await
    }

    pub async fn start(&self, guid: &str) -> RestClientResult<App> {
        self.api.post_empty(&format!("/v3/apps/{guid}/actions/start")).await
    }

    pub async fn stop(&self, guid: &str) -> RestClientResult<App> {
        self.api.post_empty(&format!("/v3/apps/{guid}/actions/stop")).await
    }

    pub async fn restart(&self, guid: &str) -> RestClientResult<App> {
        self.api.post_empty(&format!("/v3/apps/{guid}/actions/restart")).await
    }

    pub async fn get_environment_variables(&self, guid: &str) -> RestClientResult<EnvironmentVariables> {
        self.api.get(&format!("/v3/apps/{guid}/environment_variables")).await
    }

    /// Merge variables into the app environment; a `None` value removes the key
    pub async fn set_environment_variables(
        &self,
        guid: &str,
        variables: &EnvironmentVariables,
    ) -> RestClientResult<EnvironmentVariables> {
        self.api
            .patch(&format!("/v3/apps/{guid}/environment_variables"), variables)
            .await
    }

    pub async fn permissions(&self, guid: &str) -> RestClientResult<AppPermissions> {
        self.api.get(&format!("/v3/apps/{guid}/permissions")).await
    }

    pub async fn ssh_enabled(&self, guid: &str) -> RestClientResult<AppSshEnabled> {
        self.api.get(&format!("/v3/apps/{guid}/ssh_enabled")).await
    }
}
