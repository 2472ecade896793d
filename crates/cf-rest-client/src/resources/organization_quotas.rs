use cf_rest_api_contract::validation::validate_organization_quota_create;
use cf_rest_api_contract::{
    JobRef, OrganizationQuota, OrganizationQuotaCreate, OrganizationQuotaUpdate, ToManyRelationships,
};

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/organization_quotas`
    OrganizationQuotaListOptions {
        guids: Filter => "guids",
        names: Filter => "names",
        organization_guids: Filter => "organization_guids",
    }
}

#[derive(Debug, Clone)]
pub struct OrganizationQuotaClient {
    api: Api,
}

impl OrganizationQuotaClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &OrganizationQuotaCreate) -> RestClientResult<OrganizationQuota> {
        validate_organization_quota_create(request)?;
        self.api.post("/v3/organization_quotas", request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<OrganizationQuota> {
        self.api.get(&format!("/v3/organization_quotas/{guid}")).await
    }

    pub async fn update(
        &self,
        guid: &str,
        request: &OrganizationQuotaUpdate,
    ) -> RestClientResult<OrganizationQuota> {
        self.api.patch(&format!("/v3/organization_quotas/{guid}"), request).await
    }

    pub async fn delete(&self, guid: &str) -> RestClientResult<JobRef> {
        self.api.delete(&format!("/v3/organization_quotas/{guid}")).await
    }

    pub async fn list(
        &self,
        options: &OrganizationQuotaListOptions,
    ) -> RestClientResult<(Vec<OrganizationQuota>, Pager)> {
        self.api.list_page("/v3/organization_quotas", options).await
    }

    pub async fn list_all(
        &self,
        options: Option<OrganizationQuotaListOptions>,
    ) -> RestClientResult<Vec<OrganizationQuota>> {
        self.api.list_all("/v3/organization_quotas", options).await
    }

    /// Apply the quota to organizations
    pub async fn apply<I, S>(&self, guid: &str, org_guids: I) -> RestClientResult<ToManyRelationships>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api
            .post(
                &format!("/v3/organization_quotas/{guid}/relationships/organizations"),
                &ToManyRelationships::new(org_guids),
            )
            .await
    }
}
