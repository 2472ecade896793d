use std::sync::Arc;
use std::time::Duration;

use cf_client_api::{Method, RequestBody};
use cf_core::{AppPushOperation, Error, PushStep};
use cf_rest_api_contract::{AppManifest, AppState, ApiContractError};
use cf_rest_client::{CancellationToken, CfClient, PollOptions, RestClientError};
use cf_rest_client_mock::{fixtures, MockResponse, MockTransport};
use serde_json::{json, Value};

const ORG_QUERY: &str = "/v3/organizations?names=acme&page=1&per_page=2";
const SPACE_QUERY: &str = "/v3/spaces?names=dev&organization_guids=org-1&page=1&per_page=2";
const APP_QUERY: &str = "/v3/apps?names=web&space_guids=space-1&page=1&per_page=2";
const DROPLET_QUERY: &str = "/v3/packages/pkg-1/droplets?states=STAGED&page=1&per_page=2";

/// Org and space lookups
fn resolved() -> MockTransport {
    MockTransport::new()
        .with_response(
            Method::Get,
            ORG_QUERY,
            MockResponse::json(fixtures::single_page(
                "/v3/organizations",
                vec![fixtures::organization("org-1", "acme")],
            )),
        )
        .with_response(
            Method::Get,
            SPACE_QUERY,
            MockResponse::json(fixtures::single_page(
                "/v3/spaces",
                vec![fixtures::space("space-1", "dev", "org-1")],
            )),
        )
}

/// Manifest application whose job goes through `jobs`
fn applied<I>(mock: MockTransport, jobs: I) -> MockTransport
where
    I: IntoIterator<Item = MockResponse>,
{
    mock.with_response(
        Method::Post,
        "/v3/spaces/space-1/actions/apply_manifest",
        MockResponse::accepted_job("job-1"),
    )
    .with_responses(Method::Get, "/v3/jobs/job-1", jobs)
}

/// App lookup, package creation and upload, package readiness
fn uploaded(mock: MockTransport) -> MockTransport {
    uploaded_with(
        mock,
        MockResponse::json(fixtures::package("pkg-1", "app-1", "PROCESSING_UPLOAD")),
    )
}

fn uploaded_with(mock: MockTransport, upload: MockResponse) -> MockTransport {
    mock.with_response(
        Method::Get,
        APP_QUERY,
        MockResponse::json(fixtures::single_page(
            "/v3/apps",
            vec![fixtures::app("app-1", "web", "space-1", "STOPPED")],
        )),
    )
    .with_response(
        Method::Post,
        "/v3/packages",
        MockResponse::created(fixtures::package("pkg-1", "app-1", "AWAITING_UPLOAD")),
    )
    .with_response(Method::Post, "/v3/packages/pkg-1/upload", upload)
    .with_responses(
        Method::Get,
        "/v3/packages/pkg-1",
        [
            MockResponse::json(fixtures::package("pkg-1", "app-1", "PROCESSING_UPLOAD")),
            MockResponse::json(fixtures::package("pkg-1", "app-1", "READY")),
        ],
    )
}

/// Build creation whose staging goes through `builds`
fn building<I>(mock: MockTransport, builds: I) -> MockTransport
where
    I: IntoIterator<Item = MockResponse>,
{
    mock.with_response(
        Method::Post,
        "/v3/builds",
        MockResponse::created(fixtures::build("build-1", "pkg-1", "STAGING", None)),
    )
    .with_responses(Method::Get, "/v3/builds/build-1", builds)
}

/// Droplet lookup, assignment and app start
fn started(mock: MockTransport) -> MockTransport {
    started_with(
        mock,
        vec![fixtures::droplet("droplet-1", "app-1", "STAGED")],
        MockResponse::json(json!({ "data": { "guid": "droplet-1" } })),
        MockResponse::json(fixtures::app("app-1", "web", "space-1", "STARTED")),
    )
}

fn started_with(
    mock: MockTransport,
    droplets: Vec<Value>,
    assign: MockResponse,
    start: MockResponse,
) -> MockTransport {
    mock.with_response(
        Method::Get,
        DROPLET_QUERY,
        MockResponse::json(fixtures::single_page("/v3/packages/pkg-1/droplets", droplets)),
    )
    .with_response(
        Method::Patch,
        "/v3/apps/app-1/relationships/current_droplet",
        assign,
    )
    .with_response(Method::Post, "/v3/apps/app-1/actions/start", start)
}

/// Everything up to a staged build
fn staged() -> MockTransport {
    building(
        uploaded(applied(resolved(), [MockResponse::json(fixtures::job("job-1", "COMPLETE"))])),
        [MockResponse::json(fixtures::build("build-1", "pkg-1", "STAGED", None))],
    )
}

fn happy_mock() -> MockTransport {
    let mock = applied(
        resolved(),
        [
            MockResponse::json(fixtures::job("job-1", "PROCESSING")),
            MockResponse::json(fixtures::job("job-1", "COMPLETE")),
        ],
    );
    let mock = building(
        uploaded(mock),
        [
            MockResponse::json(fixtures::build("build-1", "pkg-1", "STAGING", None)),
            MockResponse::json(fixtures::build("build-1", "pkg-1", "STAGED", None)),
        ],
    );
    started(mock)
}

fn operation(mock: MockTransport) -> (AppPushOperation, Arc<MockTransport>) {
    let mock = Arc::new(mock);
    let client = CfClient::new(mock.clone())
        .with_poll_options(PollOptions::new(Duration::from_secs(1), Duration::from_secs(60)));
    (AppPushOperation::new(client, "acme", "dev"), mock)
}

fn manifest() -> AppManifest {
    let mut manifest = AppManifest::new("web");
    manifest.buildpacks = vec!["ruby_buildpack".to_string()];
    manifest.stack = Some("cflinuxfs4".to_string());
    manifest.instances = Some(2);
    manifest
}

fn push_source(err: &Error) -> &RestClientError {
    match err {
        Error::Push { source, .. } => source,
        other => panic!("expected a push error, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_push_runs_every_step_in_order() {
    let (push, mock) = operation(happy_mock());

    let app = push
        .push(&manifest(), b"PK\x03\x04zip".to_vec(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(app.guid, "app-1");
    assert_eq!(app.state, AppState::Started);
    assert_eq!(
        mock.calls(),
        vec![
            format!("GET {ORG_QUERY}"),
            format!("GET {SPACE_QUERY}"),
            "POST /v3/spaces/space-1/actions/apply_manifest".to_string(),
            "GET /v3/jobs/job-1".to_string(),
            "GET /v3/jobs/job-1".to_string(),
            format!("GET {APP_QUERY}"),
            "POST /v3/packages".to_string(),
            "POST /v3/packages/pkg-1/upload".to_string(),
            "GET /v3/packages/pkg-1".to_string(),
            "GET /v3/packages/pkg-1".to_string(),
            "POST /v3/builds".to_string(),
            "GET /v3/builds/build-1".to_string(),
            "GET /v3/builds/build-1".to_string(),
            format!("GET {DROPLET_QUERY}"),
            "PATCH /v3/apps/app-1/relationships/current_droplet".to_string(),
            "POST /v3/apps/app-1/actions/start".to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_push_sends_manifest_package_and_build_bodies() {
    let (push, mock) = operation(happy_mock());

    push.push(&manifest(), b"zip-bytes".to_vec(), &CancellationToken::new())
        .await
        .unwrap();

    let manifest_requests = mock.requests_to(Method::Post, "/v3/spaces/space-1/actions/apply_manifest");
    let manifest_request = &manifest_requests[0];
    match &manifest_request.body {
        RequestBody::Yaml(yaml) => {
            assert!(yaml.contains("applications:"));
            assert!(yaml.contains("name: web"));
            assert!(yaml.contains("instances: 2"));
        }
        other => panic!("expected a YAML body, got {other:?}"),
    }

    let package_requests = mock.requests_to(Method::Post, "/v3/packages");
    let package_request = &package_requests[0];
    match &package_request.body {
        RequestBody::Json(body) => {
            assert_eq!(body["type"], "bits");
            assert_eq!(body["relationships"]["app"]["data"]["guid"], "app-1");
        }
        other => panic!("expected a JSON body, got {other:?}"),
    }

    let upload_requests = mock.requests_to(Method::Post, "/v3/packages/pkg-1/upload");
    let upload_request = &upload_requests[0];
    match &upload_request.body {
        RequestBody::Upload { field, bytes, .. } => {
            assert_eq!(field, "bits");
            assert_eq!(bytes.as_slice(), b"zip-bytes");
        }
        other => panic!("expected an upload, got {other:?}"),
    }

    let build_requests = mock.requests_to(Method::Post, "/v3/builds");
    let build_request = &build_requests[0];
    match &build_request.body {
        RequestBody::Json(body) => {
            assert_eq!(body["package"]["guid"], "pkg-1");
            assert_eq!(body["lifecycle"]["type"], "buildpack");
            assert_eq!(body["lifecycle"]["data"]["buildpacks"][0], "ruby_buildpack");
            assert_eq!(body["lifecycle"]["data"]["stack"], "cflinuxfs4");
        }
        other => panic!("expected a JSON body, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_org_fails_first_step() {
    let mock = MockTransport::new().with_response(
        Method::Get,
        ORG_QUERY,
        MockResponse::json(fixtures::single_page("/v3/organizations", vec![])),
    );
    let (push, mock) = operation(mock);

    let err = push
        .push(&manifest(), Vec::new(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::ResolveOrg));
    assert!(matches!(push_source(&err), RestClientError::NotFound));
    assert!(err.to_string().contains("for acme"));
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_manifest_job_stops_push() {
    let mock = uploaded(applied(
        resolved(),
        [
            MockResponse::json(fixtures::job("job-1", "PROCESSING")),
            MockResponse::json(fixtures::failed_job("job-1", &["Routes cannot be mapped"])),
        ],
    ));
    let (push, mock) = operation(mock);

    let err = push
        .push(&manifest(), Vec::new(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::ApplyManifest));
    assert!(err.to_string().contains("for dev"));
    match push_source(&err) {
        RestClientError::OperationFailed { state, reason } => {
            assert_eq!(state, "FAILED");
            assert_eq!(reason, "Routes cannot be mapped");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(mock.requests_to(Method::Get, "/v3/apps").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_staging_failure_reports_build_error() {
    let mock = building(
        uploaded(applied(resolved(), [MockResponse::json(fixtures::job("job-1", "COMPLETE"))])),
        [MockResponse::json(fixtures::build(
            "build-1",
            "pkg-1",
            "FAILED",
            Some("NoAppDetectedError - An app was not successfully detected"),
        ))],
    );
    let (push, mock) = operation(mock);

    let err = push
        .push(&manifest(), b"zip".to_vec(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::PollBuild));
    assert!(err.to_string().contains("for web"));
    match push_source(&err) {
        RestClientError::OperationFailed { reason, .. } => {
            assert!(reason.starts_with("NoAppDetectedError"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(mock
        .requests_to(Method::Get, "/v3/packages/pkg-1/droplets")
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_staging_timeout_uses_operation_poll_options() {
    let mock = building(
        uploaded(applied(resolved(), [MockResponse::json(fixtures::job("job-1", "COMPLETE"))])),
        [MockResponse::json(fixtures::build("build-1", "pkg-1", "STAGING", None))],
    );
    let (push, _mock) = operation(mock);
    let push = push.with_poll_options(PollOptions::new(Duration::from_secs(1), Duration::from_secs(5)));

    let err = push
        .push(&manifest(), b"zip".to_vec(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::PollBuild));
    assert!(matches!(push_source(&err), RestClientError::PollTimeout(_)));
}

#[tokio::test]
async fn test_cancelled_push_sends_nothing() {
    let (push, mock) = operation(happy_mock());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = push.push(&manifest(), Vec::new(), &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.step(), Some(PushStep::ResolveOrg));
    assert!(mock.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_while_waiting_for_package() {
    let mock = uploaded(applied(resolved(), [MockResponse::json(fixtures::job("job-1", "COMPLETE"))]));
    let (push, _mock) = operation(mock);
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            cancel.cancel();
        })
    };

    let err = push.push(&manifest(), b"zip".to_vec(), &cancel).await.unwrap_err();
    canceller.await.unwrap();

    assert!(err.is_cancelled());
    assert_eq!(err.step(), Some(PushStep::PollPackage));
}

#[tokio::test]
async fn test_invalid_manifest_is_rejected_before_any_request() {
    let (push, mock) = operation(happy_mock());

    let err = push
        .push(&AppManifest::new(""), Vec::new(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Manifest(ApiContractError::Validation(_))));
    assert_eq!(err.step(), None);
    assert!(mock.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_no_staged_droplet_fails_droplet_step() {
    let mock = started_with(
        staged(),
        vec![],
        MockResponse::json(json!({ "data": { "guid": "droplet-1" } })),
        MockResponse::json(fixtures::app("app-1", "web", "space-1", "STARTED")),
    );
    let (push, mock) = operation(mock);

    let err = push
        .push(&manifest(), b"zip".to_vec(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::ResolveDroplet));
    assert!(matches!(
        &err,
        Error::Push { subject, source: RestClientError::NotFound, .. } if subject == "web"
    ));
    assert!(mock
        .requests_to(Method::Patch, "/v3/apps/app-1/relationships/current_droplet")
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_two_staged_droplets_are_ambiguous() {
    let mock = started_with(
        staged(),
        vec![
            fixtures::droplet("droplet-1", "app-1", "STAGED"),
            fixtures::droplet("droplet-2", "app-1", "STAGED"),
        ],
        MockResponse::json(json!({ "data": { "guid": "droplet-1" } })),
        MockResponse::json(fixtures::app("app-1", "web", "space-1", "STARTED")),
    );
    let (push, _mock) = operation(mock);

    let err = push
        .push(&manifest(), b"zip".to_vec(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::ResolveDroplet));
    assert!(matches!(
        &err,
        Error::Push { subject, source: RestClientError::AmbiguousResult(2), .. } if subject == "web"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_upload_fails_upload_step() {
    let mock = uploaded_with(
        applied(resolved(), [MockResponse::json(fixtures::job("job-1", "COMPLETE"))]),
        MockResponse::api_error(422, 10008, "CF-UnprocessableEntity", "Zip file is invalid"),
    );
    let (push, mock) = operation(mock);

    let err = push
        .push(&manifest(), b"not a zip".to_vec(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::UploadBits));
    assert!(matches!(
        push_source(&err),
        RestClientError::Transport(transport) if transport.status() == Some(422)
    ));
    assert!(mock.requests_to(Method::Get, "/v3/packages/pkg-1").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_rejected_droplet_assignment_fails_assign_step() {
    let mock = started_with(
        staged(),
        vec![fixtures::droplet("droplet-1", "app-1", "STAGED")],
        MockResponse::api_error(422, 10008, "CF-UnprocessableEntity", "Droplet is not staged"),
        MockResponse::json(fixtures::app("app-1", "web", "space-1", "STARTED")),
    );
    let (push, mock) = operation(mock);

    let err = push
        .push(&manifest(), b"zip".to_vec(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::AssignDroplet));
    assert!(err.to_string().contains("for web"));
    assert!(mock
        .requests_to(Method::Post, "/v3/apps/app-1/actions/start")
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_start_fails_last_step() {
    let mock = started_with(
        staged(),
        vec![fixtures::droplet("droplet-1", "app-1", "STAGED")],
        MockResponse::json(json!({ "data": { "guid": "droplet-1" } })),
        MockResponse::transport_failure("connection reset by peer"),
    );
    let (push, _mock) = operation(mock);

    let err = push
        .push(&manifest(), b"zip".to_vec(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(PushStep::StartApp));
    assert!(matches!(push_source(&err), RestClientError::Transport(_)));
}
