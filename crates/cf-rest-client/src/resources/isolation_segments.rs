use cf_rest_api_contract::validation::validate_isolation_segment_create;
use cf_rest_api_contract::{
    IsolationSegment, IsolationSegmentCreate, IsolationSegmentUpdate, ToManyRelationships,
};

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/isolation_segments`
    IsolationSegmentListOptions {
        guids: Filter => "guids",
        names: Filter => "names",
        organization_guids: Filter => "organization_guids",
    }
}

#[derive(Debug, Clone)]
pub struct IsolationSegmentClient {
    api: Api,
}

impl IsolationSegmentClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &IsolationSegmentCreate) -> RestClientResult<IsolationSegment> {
        validate_isolation_segment_create(request)?;
        self.api.post("/v3/isolation_segments", request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<IsolationSegment> {
        self.api.get(&format!("/v3/isolation_segments/{guid}")).await
    }

    pub async fn update(
        &self,
        guid: &str,
        request: &IsolationSegmentUpdate,
    ) -> RestClientResult<IsolationSegment> {
        self.api.patch(&format!("/v3/isolation_segments/{guid}"), request).await
    }

    /// Isolation segments are deleted synchronously
    pub async fn delete(&self, guid: &str) -> RestClientResult<()> {
        self.api.delete_sync(&format!("/v3/isolation_segments/{guid}")).await
    }

    pub async fn list(
        &self,
        options: &IsolationSegmentListOptions,
    ) -> RestClientResult<(Vec<IsolationSegment>, Pager)> {
        self.api.list_page("/v3/isolation_segments", options).await
    }

    pub async fn list_all(
        &self,
        options: Option<IsolationSegmentListOptions>,
    ) -> RestClientResult<Vec<IsolationSegment>> {
        self.api.list_all("/v3/isolation_segments", options).await
    }

    pub async fn single(&self, options: IsolationSegmentListOptions) -> RestClientResult<IsolationSegment> {
        self.api.single("/v3/isolation_segments", options).await
    }

    /// Entitle organizations to use the segment
    pub async fn entitle_organizations<I, S>(&self, guid: &str, org_guids: I) -> RestClientResult<ToManyRelationships>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api
            .post(
                &format!("/v3/isolation_segments/{guid}/relationships/organizations"),
                &ToManyRelationships::new(org_guids),
            )
            .await
    }

    pub async fn revoke_organization(&self, guid: &str, org_guid: &str) -> RestClientResult<()> {
        self.api
            .delete_sync(&format!("/v3/isolation_segments/{guid}/relationships/organizations/{org_guid}"))
            .await
    }

    pub async fn list_organization_relationships(&self, guid: &str) -> RestClientResult<ToManyRelationships> {
        self.api
            .get(&format!("/v3/isolation_segments/{guid}/relationships/organizations"))
            .await
    }

    pub async fn list_space_relationships(&self, guid: &str) -> RestClientResult<ToManyRelationships> {
        self.api
            .get(&format!("/v3/isolation_segments/{guid}/relationships/spaces"))
            .await
    }
}
