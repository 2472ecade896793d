use cf_rest_api_contract::{Droplet, DropletState, ToOneRelationship};

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/droplets`
    DropletListOptions {
        guids: Filter => "guids",
        states: Filter => "states",
        app_guids: Filter => "app_guids",
        space_guids: Filter => "space_guids",
        organization_guids: Filter => "organization_guids",
    }
}

crate::list_options! {
    /// Filters for `GET /v3/packages/:guid/droplets`
    PackageDropletListOptions {
        guids: Filter => "guids",
        states: Filter => "states",
    }
}

impl PackageDropletListOptions {
    pub fn staged() -> Self {
        Self {
            states: Filter::new([DropletState::Staged.to_string()]),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct DropletClient {
    api: Api,
}

impl DropletClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<Droplet> {
        self.api.get(&format!("/v3/droplets/{guid}")).await
    }

    pub async fn list(&self, options: &DropletListOptions) -> RestClientResult<(Vec<Droplet>, Pager)> {
        self.api.list_page("/v3/droplets", options).await
    }

    pub async fn list_all(&self, options: Option<DropletListOptions>) -> RestClientResult<Vec<Droplet>> {
        self.api.list_all("/v3/droplets", options).await
    }

    pub async fn list_for_package(
        &self,
        package_guid: &str,
        options: &PackageDropletListOptions,
    ) -> RestClientResult<(Vec<Droplet>, Pager)> {
        self.api
            .list_page(&format!("/v3/packages/{package_guid}/droplets"), options)
            .await
    }

    pub async fn list_for_package_all(
        &self,
        package_guid: &str,
        options: Option<PackageDropletListOptions>,
    ) -> RestClientResult<Vec<Droplet>> {
        self.api
            .list_all(&format!("/v3/packages/{package_guid}/droplets"), options)
            .await
    }

    /// The single droplet produced from a package
    pub async fn single_for_package(
        &self,
        package_guid: &str,
        options: PackageDropletListOptions,
    ) -> RestClientResult<Droplet> {
        self.api
            .single(&format!("/v3/packages/{package_guid}/droplets"), options)
            .await
    }

    /// Make `droplet_guid` the app's current droplet
    pub async fn set_current_for_app(&self, app_guid: &str, droplet_guid: &str) -> RestClientResult<()> {
        let _: ToOneRelationship = self
            .api
            .patch(
                &format!("/v3/apps/{app_guid}/relationships/current_droplet"),
                &ToOneRelationship::new(droplet_guid),
            )
            .await?;
        Ok(())
    }

    pub async fn get_current_for_app(&self, app_guid: &str) -> RestClientResult<Droplet> {
        self.api.get(&format!("/v3/apps/{app_guid}/droplets/current")).await
    }
}
