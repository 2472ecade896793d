use cf_rest_api_contract::{JobRef, ServicePlan, ServicePlanUpdate};

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/service_plans`
    ServicePlanListOptions {
        guids: Filter => "guids",
        names: Filter => "names",
        available: Option<bool> => "available",
        broker_catalog_ids: Filter => "broker_catalog_ids",
        service_broker_guids: Filter => "service_broker_guids",
        service_broker_names: Filter => "service_broker_names",
        service_offering_guids: Filter => "service_offering_guids",
        service_offering_names: Filter => "service_offering_names",
        space_guids: Filter => "space_guids",
        organization_guids: Filter => "organization_guids",
        service_instance_guids: Filter => "service_instance_guids",
    }
}

#[derive(Debug, Clone)]
pub struct ServicePlanClient {
    api: Api,
}

impl ServicePlanClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<ServicePlan> {
        self.api.get(&format!("/v3/service_plans/{guid}")).await
    }

    pub async fn update(&self, guid: &str, request: &ServicePlanUpdate) -> RestClientResult<ServicePlan> {
        self.api.patch(&format!("/v3/service_plans/{guid}"), request).await
    }

    pub async fn delete(&self, guid: &str) -> RestClientResult<JobRef> {
        self.api.delete(&format!("/v3/service_plans/{guid}")).await
    }

    pub async fn list(&self, options: &ServicePlanListOptions) -> RestClientResult<(Vec<ServicePlan>, Pager)> {
        self.api.list_page("/v3/service_plans", options).await
    }

    pub async fn list_all(&self, options: Option<ServicePlanListOptions>) -> RestClientResult<Vec<ServicePlan>> {
        self.api.list_all("/v3/service_plans", options).await
    }

    pub async fn single(&self, options: ServicePlanListOptions) -> RestClientResult<ServicePlan> {
        self.api.single("/v3/service_plans", options).await
    }
}
