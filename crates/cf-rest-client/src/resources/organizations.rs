use cf_rest_api_contract::validation::validate_organization_create;
use cf_rest_api_contract::{
    Domain, IsolationSegment, JobRef, Organization, OrganizationCreate, OrganizationUpdate,
    OrganizationUsageSummary, ToOneRelationship, User,
};

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/organizations`
    OrganizationListOptions {
        guids: Filter => "guids",
        names: Filter => "names",
    }
}

impl OrganizationListOptions {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            names: Filter::new([name.into()]),
            ..Default::default()
        }
    }
}

crate::list_options! {
    /// Filters for `GET /v3/organizations/:guid/users`
    OrganizationUserListOptions {
        guids: Filter => "guids",
        usernames: Filter => "usernames",
        origins: Filter => "origins",
    }
}

#[derive(Debug, Clone)]
pub struct OrganizationClient {
    api: Api,
}

impl OrganizationClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &OrganizationCreate) -> RestClientResult<Organization> {
        validate_organization_create(request)?;
        self.api.post("/v3/organizations", request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<Organization> {
        self.api.get(&format!("/v3/organizations/{guid}")).await
    }

    pub async fn update(&self, guid: &str, request: &OrganizationUpdate) -> RestClientResult<Organization> {
        self.api.patch(&format!("/v3/organizations/{guid}"), request).await
    }

    /// Deletion runs asynchronously; poll the returned job
    pub async fn delete(&self, guid: &str) -> RestClientResult<JobRef> {
        self.api.delete(&format!("/v3/organizations/{guid}")).await
    }

    pub async fn list(&self, options: &OrganizationListOptions) -> RestClientResult<(Vec<Organization>, Pager)> {
        self.api.list_page("/v3/organizations", options).await
    }

    pub async fn list_all(&self, options: Option<OrganizationListOptions>) -> RestClientResult<Vec<Organization>> {
        self.api.list_all("/v3/organizations", options).await
    }

    pub async fn single(&self, options: OrganizationListOptions) -> RestClientResult<Organization> {
        self.api.single("/v3/organizations", options).await
    }

    /// Organizations entitled to an isolation segment
    pub async fn list_for_isolation_segment_all(
        &self,
        isolation_segment_guid: &str,
        options: Option<OrganizationListOptions>,
    ) -> RestClientResult<Vec<Organization>> {
        let path = format!("/v3/isolation_segments/{isolation_segment_guid}/organizations");
        self.api.list_all(&path, options).await
    }

    pub async fn list_users_all(
        &self,
        guid: &str,
        options: Option<OrganizationUserListOptions>,
    ) -> RestClientResult<Vec<User>> {
        self.api.list_all(&format!("/v3/organizations/{guid}/users"), options).await
    }

    /// The default isolation segment, if one is assigned
    pub async fn get_default_isolation_segment(&self, guid: &str) -> RestClientResult<Option<String>> {
        let relationship: ToOneRelationship = self
            .api
            .get(&format!("/v3/organizations/{guid}/relationships/default_isolation_segment"))
            .await?;
        Ok(relationship.guid().map(str::to_string))
    }

    /// Assign the default isolation segment; `None` resets it to the shared segment
    pub async fn assign_default_isolation_segment(
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
            .patch(
                &format!("/v3/organizations/{guid}/relationships/default_isolation_segment"),
                &body,
            )
            .await?;
        Ok(())
    }

    pub async fn get_default_domain(&self, guid: &str) -> RestClientResult<Domain> {
        self.api.get(&format!("/v3/organizations/{guid}/domains/default")).await
    }

    pub async fn get_usage_summary(&self, guid: &str) -> RestClientResult<OrganizationUsageSummary> {
        self.api.get(&format!("/v3/organizations/{guid}/usage_summary")).await
    }

    /// Isolation segments the organization is entitled to
    pub async fn list_isolation_segments_all(&self, guid: &str) -> RestClientResult<Vec<IsolationSegment>> {
        let options = super::isolation_segments::IsolationSegmentListOptions {
            organization_guids: Filter::new([guid]),
            ..Default::default()
        };
        self.api.list_all("/v3/isolation_segments", Some(options)).await
    }
}
