use cf_rest_api_contract::validation::validate_space_create;
use cf_rest_api_contract::{JobRef, Space, SpaceCreate, SpaceUpdate, ToOneRelationship, User};

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/spaces`
    SpaceListOptions {
        guids: Filter => "guids",
        names: Filter => "names",
        organization_guids: Filter => "organization_guids",
    }
}

impl SpaceListOptions {
    /// Look up a space by name within one organization
    pub fn by_name(name: impl Into<String>, organization_guid: impl Into<String>) -> Self {
        Self {
            names: Filter::new([name.into()]),
            organization_guids: Filter::new([organization_guid.into()]),
            ..Default::default()
        }
    }
}

crate::list_options! {
    SpaceUserListOptions {
        guids: Filter => "guids",
        usernames: Filter => "usernames",
        origins: Filter => "origins",
    }
}

#[derive(Debug, Clone)]
pub struct SpaceClient {
    api: Api,
}

impl SpaceClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &SpaceCreate) -> RestClientResult<Space> {
        validate_space_create(request)?;
        self.api.post("/v3/spaces", request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<Space> {
        self.api.get(&format!("/v3/spaces/{guid}")).await
    }

    pub async fn update(&self, guid: &str, request: &SpaceUpdate) -> RestClientResult<Space> {
        self.api.patch(&format!("/v3/spaces/{guid}"), request).await
    }

    pub async fn delete(&self, guid: &str) -> RestClientResult<JobRef> {
        self.api.delete(&format!("/v3/spaces/{guid}")).await
    }

    pub async fn list(&self, options: &SpaceListOptions) -> RestClientResult<(Vec<Space>, Pager)> {
        self.api.list_page("/v3/spaces", options).await
    }

    pub async fn list_all(&self, options: Option<SpaceListOptions>) -> RestClientResult<Vec<Space>> {
        self.api.list_all("/v3/spaces", options).await
    }

    pub async fn single(&self, options: SpaceListOptions) -> RestClientResult<Space> {
        self.api.single("/v3/spaces", options).await
    }

    /// Assign an isolation segment; `None` unassigns
    pub async fn assign_isolation_segment(
        &self,
        guid: &str,
        isolation_segment_guid: Option<&str>,
    ) -> RestClientResult<()> {
        let body = match isolation_segment_guid {
            Some(segment) => ToOneRelationship::new(segment),
            None => ToOneRelationship::default(),
        };
        let _: ToOneRelationship = self
            .api
            .patch(&format!("/v3/spaces/{guid}/relationships/isolation_segment"), &body)
            .await?;
        Ok(())
    }

    pub async fn get_assigned_isolation_segment(&self, guid: &str) -> RestClientResult<Option<String>> {
        let relationship: ToOneRelationship = self
            .api
            .get(&format!("/v3/spaces/{guid}/relationships/isolation_segment"))
            .await?;
        Ok(relationship.guid().map(str::to_string))
    }

    pub async fn list_users_all(
        &self,
        guid: &str,
        options: Option<SpaceUserListOptions>,
    ) -> RestClientResult<Vec<User>> {
        self.api.list_all(&format!("/v3/spaces/{guid}/users"), options).await
    }
}
