//! Buildpack application push
//!
//! A push is a fixed pipeline of API calls: resolve the org and space,
//! apply the manifest, upload the bits as a new package, stage it into a
//! droplet, make that droplet current and start the app. Each step that
//! fails ends the push with an [`Error::Push`] naming the step and the
//! org, space or app it was working on.

use std::fmt;
use std::future::Future;

use cf_rest_api_contract::validation::validate_app_manifest;
use cf_rest_api_contract::{App, AppManifest, BuildCreate, Lifecycle, Manifest, PackageCreate};
use cf_rest_client::{
    AppListOptions, CfClient, OrganizationListOptions, PackageDropletListOptions, PollOptions,
    RestClientError, RestClientResult, SpaceListOptions,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// The steps of a push, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushStep {
    ResolveOrg,
    ResolveSpace,
    ApplyManifest,
    ResolveApp,
    CreatePackage,
    UploadBits,
    PollPackage,
    CreateBuild,
    PollBuild,
    ResolveDroplet,
    AssignDroplet,
    StartApp,
}

impl PushStep {
    pub const ALL: [PushStep; 12] = [
        PushStep::ResolveOrg,
        PushStep::ResolveSpace,
        PushStep::ApplyManifest,
        PushStep::ResolveApp,
        PushStep::CreatePackage,
        PushStep::UploadBits,
        PushStep::PollPackage,
        PushStep::CreateBuild,
        PushStep::PollBuild,
        PushStep::ResolveDroplet,
        PushStep::AssignDroplet,
        PushStep::StartApp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PushStep::ResolveOrg => "resolve org",
            PushStep::ResolveSpace => "resolve space",
            PushStep::ApplyManifest => "apply manifest",
            PushStep::ResolveApp => "resolve app",
            PushStep::CreatePackage => "create package",
            PushStep::UploadBits => "upload bits",
            PushStep::PollPackage => "wait for package",
            PushStep::CreateBuild => "create build",
            PushStep::PollBuild => "wait for staging",
            PushStep::ResolveDroplet => "resolve droplet",
            PushStep::AssignDroplet => "assign droplet",
            PushStep::StartApp => "start app",
        }
    }
}

impl fmt::Display for PushStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pushes buildpack apps into one org and space
#[derive(Debug, Clone)]
pub struct AppPushOperation {
    client: CfClient,
    org_name: String,
    space_name: String,
    poll: PollOptions,
}

impl AppPushOperation {
    /// Create a push operation targeting `org_name`/`space_name`.
    ///
    /// Polling uses the client's configured [`PollOptions`].
    pub fn new(client: CfClient, org_name: impl Into<String>, space_name: impl Into<String>) -> Self {
        let poll = *client.poll_options();
        Self {
            client,
            org_name: org_name.into(),
            space_name: space_name.into(),
            poll,
        }
    }

    /// Override the polling used for the manifest job, package and build
    pub fn with_poll_options(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }

    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    pub fn space_name(&self) -> &str {
        &self.space_name
    }

    /// Create or update the app described by `manifest`, deploy `bits` (a
    /// zip archive) as its new droplet and start it.
    ///
    /// Returns the started app.
    pub async fn push(&self, manifest: &AppManifest, bits: Vec<u8>, cancel: &CancellationToken) -> Result<App> {
        validate_app_manifest(manifest)?;
        let cf = &self.client;
        let app_name = manifest.name.as_str();

        let org = run_step(
            PushStep::ResolveOrg,
            &self.org_name,
            cancel,
            cf.organizations().single(OrganizationListOptions::by_name(self.org_name.as_str())),
        )
        .await?;

        let space = run_step(
            PushStep::ResolveSpace,
            &self.space_name,
            cancel,
            cf.spaces().single(SpaceListOptions::by_name(self.space_name.as_str(), org.guid.as_str())),
        )
        .await?;

        run_step(PushStep::ApplyManifest, &self.space_name, cancel, async {
            let job = cf
                .manifests()
                .apply(&space.guid, &Manifest::single(manifest.clone()))
                .await?;
            cf.jobs().poll_complete(&job, &self.poll, cancel).await
        })
        .await?;

        let app = run_step(
            PushStep::ResolveApp,
            app_name,
            cancel,
            cf.apps().single(AppListOptions::by_name(app_name, space.guid.as_str())),
        )
        .await?;

        let package = run_step(
            PushStep::CreatePackage,
            app_name,
            cancel,
            cf.packages().create(&PackageCreate::bits(app.guid.as_str())),
        )
        .await?;

        run_step(
            PushStep::UploadBits,
            app_name,
            cancel,
            cf.packages().upload_bits(&package.guid, bits),
        )
        .await?;

        run_step(
            PushStep::PollPackage,
            app_name,
            cancel,
            cf.packages().poll_ready(&package.guid, &self.poll, cancel),
        )
        .await?;

        let lifecycle = Lifecycle::buildpack(manifest.buildpacks.clone(), manifest.stack.clone());
        let build = run_step(
            PushStep::CreateBuild,
            app_name,
            cancel,
            cf.builds()
                .create(&BuildCreate::new(package.guid.as_str()).with_lifecycle(lifecycle)),
        )
        .await?;

        run_step(
            PushStep::PollBuild,
            app_name,
            cancel,
            cf.builds().poll_staged(&build.guid, &self.poll, cancel),
        )
        .await?;

        let droplet = run_step(
            PushStep::ResolveDroplet,
            app_name,
            cancel,
            cf.droplets()
                .single_for_package(&package.guid, PackageDropletListOptions::staged()),
        )
        .await?;

        run_step(
            PushStep::AssignDroplet,
            app_name,
            cancel,
            cf.droplets().set_current_for_app(&app.guid, &droplet.guid),
        )
        .await?;

        let started = run_step(PushStep::StartApp, app_name, cancel, cf.apps().start(&app.guid)).await?;
        info!(app = %started.name, guid = %started.guid, state = ?started.state, "App pushed");
        Ok(started)
    }
}

/// Run one pipeline step, attaching the step and subject to any failure.
///
/// Cancellation is checked before the step starts.
async fn run_step<T, Fut>(step: PushStep, subject: &str, cancel: &CancellationToken, future: Fut) -> Result<T>
where
    Fut: Future<Output = RestClientResult<T>>,
{
    let wrap = |source: RestClientError| Error::Push {
        step,
        subject: subject.to_string(),
        source,
    };

    if cancel.is_cancelled() {
        return Err(wrap(RestClientError::Cancelled));
    }
    info!(%step, subject, "Push step started");
    let value = future.await.map_err(wrap)?;
    debug!(%step, subject, "Push step finished");
    Ok(value)
}
