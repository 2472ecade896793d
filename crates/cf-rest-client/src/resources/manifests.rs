use cf_rest_api_contract::{JobRef, Manifest};

use crate::api::Api;
use crate::error::RestClientResult;

#[derive(Debug, Clone)]
pub struct ManifestClient {
    api: Api,
}

impl ManifestClient {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    /// Apply a manifest document to a space.
    ///
    /// Returns the job that applies it; the apps it names exist once the job
    /// completes.
    pub async fn apply(&self, space_guid: &str, manifest: &Manifest) -> RestClientResult<JobRef> {
        let yaml = serde_yaml::to_string(manifest)?;
        self.apply_yaml(space_guid, yaml).await
    }

    /// Apply a manifest that is already serialized
    pub async fn apply_yaml(&self, space_guid: &str, yaml: String) -> RestClientResult<JobRef> {
        self.api
            .post_yaml(&format!("/v3/spaces/{space_guid}/actions/apply_manifest"), yaml)
            .await
    }
}
