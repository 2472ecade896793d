use cf_rest_api_contract::{JobRef, Package, PackageCreate, PackageState};
use tokio_util::sync::CancellationToken;

use crate::api::Api;
use crate::error::RestClientResult;
use crate::pager::Pager;
use crate::poll::{PollOptions, PollTarget, Poller};
use crate::query::Filter;

crate::list_options! {
    /// Filters for `GET /v3/packages`
    PackageListOptions {
        guids: Filter => "guids",
        states: Filter => "states",
        types: Filter => "types",
        app_guids: Filter => "app_guids",
        space_guids: Filter => "space_guids",
        organization_guids: Filter => "organization_guids",
    }
}

crate::list_options! {
    /// Filters for `GET /v3/apps/:guid/packages`
    AppPackageListOptions {
        guids: Filter => "guids",
        states: Filter => "states",
        types: Filter => "types",
    }
}

impl PollTarget for Package {
    type State = PackageState;

    fn state(&self) -> PackageState {
        self.state
    }
}

#[derive(Debug, Clone)]
pub struct PackageClient {
    api: Api,
}

impl PackageClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &PackageCreate) -> RestClientResult<Package> {
        self.api.post("/v3/packages", request).await
    }

    pub async fn get(&self, guid: &str) -> RestClientResult<Package> {
        self.api.get(&format!("/v3/packages/{guid}")).await
    }

    pub async fn delete(&self, guid: &str) -> RestClientResult<JobRef> {
        self.api.delete(&format!("/v3/packages/{guid}")).await
    }

    pub async fn list(&self, options: &PackageListOptions) -> RestClientResult<(Vec<Package>, Pager)> {
        self.api.list_page("/v3/packages", options).await
    }

    pub async fn list_all(&self, options: Option<PackageListOptions>) -> RestClientResult<Vec<Package>> {
        self.api.list_all("/v3/packages", options).await
    }

    pub async fn list_for_app_all(
        &self,
        app_guid: &str,
        options: Option<AppPackageListOptions>,
    ) -> RestClientResult<Vec<Package>> {
        self.api.list_all(&format!("/v3/apps/{app_guid}/packages"), options).await
    }

    /// Upload a zip archive of application bits.
    ///
    /// The returned package is usually still `PROCESSING_UPLOAD`; use
    /// [`poll_ready`](Self::poll_ready) before staging it.
    pub async fn upload_bits(&self, guid: &str, zip: Vec<u8>) -> RestClientResult<Package> {
        self.api
            .upload(&format!("/v3/packages/{guid}/upload"), "bits", "bits.zip", zip)
            .await
    }

    /// Wait for the package to become `READY`
    pub async fn poll_ready(
        &self,
        guid: &str,
        options: &PollOptions,
        cancel: &CancellationToken,
    ) -> RestClientResult<Package> {
        Poller::new(
            [PackageState::Ready],
            [PackageState::Failed, PackageState::Expired],
            *options,
        )
        .poll(cancel, || self.get(guid))
        .await
    }
}
