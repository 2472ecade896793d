use std::sync::Arc;
use std::time::Duration;

use cf_client_api::{Method, RequestBody, TransportError};
use cf_rest_api_contract::{
    AppManifest, AppState, BuildState, DeploymentStatusReason, EnvironmentVariables, JobRef, JobState,
    Manifest, OrganizationCreate, PackageCreate, PackageState, TaskState,
};
use cf_rest_client::{
    AppListOptions, CancellationToken, CfClient, Filter, OrganizationListOptions, PollOptions,
    RestClientError, SpaceListOptions,
};
use cf_rest_client_mock::{fixtures, MockResponse, MockTransport};
use serde_json::json;

fn client(mock: MockTransport) -> (CfClient, Arc<MockTransport>) {
    let mock = Arc::new(mock);
    (CfClient::new(mock.clone()), mock)
}

fn fast_polls() -> PollOptions {
    PollOptions::new(Duration::from_secs(1), Duration::from_secs(60))
}

#[tokio::test]
async fn test_list_all_walks_every_page() {
    let path = "/v3/organizations";
    let (cf, mock) = client(
        MockTransport::new()
            .with_response(
                Method::Get,
                "/v3/organizations?names=a,b&page=1&per_page=50",
                MockResponse::json(fixtures::list_page(
                    path,
                    vec![fixtures::organization("o1", "a")],
                    1,
                    2,
                    2,
                )),
            )
            .with_response(
                Method::Get,
                "/v3/organizations?names=a,b&page=2&per_page=50",
                MockResponse::json(fixtures::list_page(
                    path,
                    vec![fixtures::organization("o2", "b")],
                    2,
                    2,
                    2,
                )),
            ),
    );

    let options = OrganizationListOptions {
        names: Filter::new(["a", "b"]),
        ..Default::default()
    };
    let orgs = cf.organizations().list_all(Some(options)).await.unwrap();

    let names: Vec<_> = orgs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(
        mock.calls(),
        vec![
            "GET /v3/organizations?names=a,b&page=1&per_page=50",
            "GET /v3/organizations?names=a,b&page=2&per_page=50",
        ]
    );
}

#[tokio::test]
async fn test_list_all_empty_listing() {
    let (cf, mock) = client(MockTransport::new().with_response(
        Method::Get,
        "/v3/apps?space_guids=s1&page=1&per_page=50",
        MockResponse::json(fixtures::single_page("/v3/apps", vec![])),
    ));

    let options = AppListOptions {
        space_guids: Filter::new(["s1"]),
        ..Default::default()
    };
    let apps = cf.apps().list_all(Some(options)).await.unwrap();

    assert!(apps.is_empty());
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_list_returns_pager_for_manual_paging() {
    let (cf, _mock) = client(MockTransport::new().with_response(
        Method::Get,
        "/v3/apps",
        MockResponse::json(fixtures::list_page(
            "/v3/apps",
            vec![fixtures::app("a1", "web", "s1", "STARTED")],
            1,
            3,
            120,
        )),
    ));

    let mut options = AppListOptions::default();
    let (apps, pager) = cf.apps().list(&options).await.unwrap();

    assert_eq!(apps[0].state, AppState::Started);
    assert_eq!(pager.total_results(), 120);
    assert!(pager.has_next_page());
    pager.advance(&mut options).unwrap();
    assert_eq!(options.page.page, 2);
}

#[tokio::test]
async fn test_single_space_by_name() {
    let (cf, mock) = client(MockTransport::new().with_response(
        Method::Get,
        "/v3/spaces",
        MockResponse::json(fixtures::single_page("/v3/spaces", vec![fixtures::space("s1", "dev", "o1")])),
    ));

    let space = cf
        .spaces()
        .single(SpaceListOptions::by_name("dev", "o1"))
        .await
        .unwrap();

    assert_eq!(space.guid, "s1");
    assert_eq!(space.organization_guid(), Some("o1"));
    assert_eq!(
        mock.calls(),
        vec!["GET /v3/spaces?names=dev&organization_guids=o1&page=1&per_page=2"]
    );
}

#[tokio::test]
async fn test_single_reports_missing_and_ambiguous() {
    let (cf, _mock) = client(
        MockTransport::new()
            .with_response(
                Method::Get,
                "/v3/organizations?names=none&page=1&per_page=2",
                MockResponse::json(fixtures::single_page("/v3/organizations", vec![])),
            )
            .with_response(
                Method::Get,
                "/v3/organizations?names=dup&page=1&per_page=2",
                MockResponse::json(fixtures::single_page(
                    "/v3/organizations",
                    vec![fixtures::organization("o1", "dup"), fixtures::organization("o2", "dup")],
                )),
            ),
    );

    let missing = cf.organizations().single(OrganizationListOptions::by_name("none")).await;
    assert!(matches!(missing, Err(RestClientError::NotFound)));

    let ambiguous = cf.organizations().single(OrganizationListOptions::by_name("dup")).await;
    assert!(matches!(ambiguous, Err(RestClientError::AmbiguousResult(2))));
}

#[tokio::test]
async fn test_create_validates_before_sending() {
    let (cf, mock) = client(MockTransport::new());

    let result = cf.organizations().create(&OrganizationCreate::new("")).await;

    assert!(matches!(result, Err(RestClientError::ApiContract(_))));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_create_sends_json_body() {
    let (cf, mock) = client(MockTransport::new().with_response(
        Method::Post,
        "/v3/packages",
        MockResponse::created(fixtures::package("p1", "a1", "AWAITING_UPLOAD")),
    ));

    let package = cf.packages().create(&PackageCreate::bits("a1")).await.unwrap();

    assert_eq!(package.state, PackageState::AwaitingUpload);
    let requests = mock.requests();
    assert_eq!(
        requests[0].body,
        RequestBody::Json(json!({
            "type": "bits",
            "relationships": { "app": { "data": { "guid": "a1" } } }
        }))
    );
}

#[tokio::test]
async fn test_api_errors_propagate_unchanged() {
    let (cf, _mock) = client(MockTransport::new().with_response(
        Method::Get,
        "/v3/apps/missing",
        MockResponse::not_found("App not found"),
    ));

    let err = cf.apps().get("missing").await.unwrap_err();

    match err {
        RestClientError::Transport(ref transport) => {
            assert!(transport.is_not_found());
            assert!(err.to_string().contains("App not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_delete_returns_job_reference() {
    let (cf, _mock) = client(MockTransport::new().with_response(
        Method::Delete,
        "/v3/organizations/o1",
        MockResponse::accepted_job("job-1"),
    ));

    let job = cf.organizations().delete("o1").await.unwrap();
    assert_eq!(job, JobRef::new("job-1"));
}

#[tokio::test]
async fn test_delete_without_location_is_unexpected() {
    let (cf, _mock) = client(MockTransport::new().with_response(
        Method::Delete,
        "/v3/apps/a1",
        MockResponse::no_content(),
    ));

    let result = cf.apps().delete("a1").await;
    assert!(matches!(result, Err(RestClientError::UnexpectedResponse(_))));
}

#[tokio::test]
async fn test_upload_bits_is_multipart() {
    let (cf, mock) = client(MockTransport::new().with_response(
        Method::Post,
        "/v3/packages/p1/upload",
        MockResponse::json(fixtures::package("p1", "a1", "PROCESSING_UPLOAD")),
    ));

    let package = cf.packages().upload_bits("p1", b"PK\x03\x04".to_vec()).await.unwrap();

    assert_eq!(package.state, PackageState::ProcessingUpload);
    match &mock.requests()[0].body {
        RequestBody::Upload { field, file_name, bytes } => {
            assert_eq!(field, "bits");
            assert_eq!(file_name, "bits.zip");
            assert_eq!(bytes, b"PK\x03\x04");
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test]
async fn test_apply_manifest_posts_yaml() {
    let (cf, mock) = client(MockTransport::new().with_response(
        Method::Post,
        "/v3/spaces/s1/actions/apply_manifest",
        MockResponse::accepted_job("job-m"),
    ));

    let mut app = AppManifest::new("web");
    app.instances = Some(2);
    let job = cf.manifests().apply("s1", &Manifest::single(app)).await.unwrap();

    assert_eq!(job.guid(), "job-m");
    match &mock.requests()[0].body {
        RequestBody::Yaml(yaml) => {
            let parsed: Manifest = serde_yaml::from_str(yaml).unwrap();
            assert_eq!(parsed.applications.len(), 1);
            assert_eq!(parsed.applications[0].name, "web");
            assert_eq!(parsed.applications[0].instances, Some(2));
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test]
async fn test_set_current_droplet() {
    let (cf, mock) = client(MockTransport::new().with_response(
        Method::Patch,
        "/v3/apps/a1/relationships/current_droplet",
        MockResponse::json(json!({ "data": { "guid": "d1" } })),
    ));

    cf.droplets().set_current_for_app("a1", "d1").await.unwrap();

    assert_eq!(
        mock.requests()[0].body,
        RequestBody::Json(json!({ "data": { "guid": "d1" } }))
    );
}

#[tokio::test]
async fn test_environment_variables_round_trip() {
    let (cf, mock) = client(MockTransport::new().with_response(
        Method::Patch,
        "/v3/apps/a1/environment_variables",
        MockResponse::json(json!({ "var": { "RAILS_ENV": "production" } })),
    ));

    let mut update = EnvironmentVariables::default();
    update.var.insert("RAILS_ENV".to_string(), Some("production".to_string()));
    update.var.insert("DEBUG".to_string(), None);
    let current = cf.apps().set_environment_variables("a1", &update).await.unwrap();

    assert_eq!(current.var.get("RAILS_ENV"), Some(&Some("production".to_string())));
    match &mock.requests()[0].body {
        RequestBody::Json(body) => assert_eq!(body["var"]["DEBUG"], json!(null)),
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_poll_job_complete() {
    let (cf, mock) = client(MockTransport::new().with_responses(
        Method::Get,
        "/v3/jobs/j1",
        [
            MockResponse::json(fixtures::job("j1", "PROCESSING")),
            MockResponse::json(fixtures::job("j1", "PROCESSING")),
            MockResponse::json(fixtures::job("j1", "COMPLETE")),
        ],
    ));

    let job = cf
        .jobs()
        .poll_complete(&JobRef::new("j1"), &fast_polls(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(job.state, JobState::Complete);
    assert_eq!(mock.requests_to(Method::Get, "/v3/jobs/j1").len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_poll_job_failure_joins_error_details() {
    let (cf, _mock) = client(MockTransport::new().with_response(
        Method::Get,
        "/v3/jobs/j1",
        MockResponse::json(fixtures::failed_job("j1", &["route taken", "quota exceeded"])),
    ));

    let err = cf
        .jobs()
        .poll_complete(&JobRef::new("j1"), &fast_polls(), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        RestClientError::OperationFailed { state, reason } => {
            assert_eq!(state, "FAILED");
            assert_eq!(reason, "route taken; quota exceeded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_poll_package_expired_is_failure() {
    let (cf, _mock) = client(MockTransport::new().with_response(
        Method::Get,
        "/v3/packages/p1",
        MockResponse::json(fixtures::package("p1", "a1", "EXPIRED")),
    ));

    let err = cf
        .packages()
        .poll_ready("p1", &fast_polls(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, RestClientError::OperationFailed { ref state, .. } if state == "EXPIRED"));
}

#[tokio::test(start_paused = true)]
async fn test_poll_build_staged() {
    let (cf, _mock) = client(MockTransport::new().with_responses(
        Method::Get,
        "/v3/builds/b1",
        [
            MockResponse::json(fixtures::build("b1", "p1", "STAGING", None)),
            MockResponse::json(fixtures::build("b1", "p1", "STAGED", None)),
        ],
    ));

    let build = cf
        .builds()
        .poll_staged("b1", &fast_polls(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(build.state, BuildState::Staged);
}

#[tokio::test(start_paused = true)]
async fn test_poll_build_failure_uses_build_error() {
    let (cf, _mock) = client(MockTransport::new().with_response(
        Method::Get,
        "/v3/builds/b1",
        MockResponse::json(fixtures::build(
            "b1",
            "p1",
            "FAILED",
            Some("StagingError - Staging error: no compatible buildpack"),
        )),
    ));

    let err = cf
        .builds()
        .poll_staged("b1", &fast_polls(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RestClientError::OperationFailed { ref reason, .. } if reason.contains("no compatible buildpack")
    ));
}

#[tokio::test(start_paused = true)]
async fn test_poll_task_failure_reason() {
    let (cf, _mock) = client(MockTransport::new().with_responses(
        Method::Get,
        "/v3/tasks/t1",
        [
            MockResponse::json(fixtures::task("t1", "migrate", "RUNNING", None)),
            MockResponse::json(fixtures::task("t1", "migrate", "FAILED", Some("Exited with status 1"))),
        ],
    ));

    let err = cf
        .tasks()
        .poll_succeeded("t1", &fast_polls(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RestClientError::OperationFailed { ref state, ref reason }
            if *state == TaskState::Failed.to_string() && reason == "Exited with status 1"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_poll_deployment_on_status_reason() {
    let (cf, _mock) = client(MockTransport::new().with_responses(
        Method::Get,
        "/v3/deployments/d1",
        [
            MockResponse::json(fixtures::deployment("d1", "ACTIVE", "DEPLOYING")),
            MockResponse::json(fixtures::deployment("d1", "FINALIZED", "DEPLOYED")),
        ],
    ));

    let deployment = cf
        .deployments()
        .poll_deployed("d1", &fast_polls(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(deployment.status.reason, DeploymentStatusReason::Deployed);
}

#[tokio::test(start_paused = true)]
async fn test_poll_fetch_error_aborts_polling() {
    let (cf, mock) = client(MockTransport::new().with_responses(
        Method::Get,
        "/v3/jobs/j1",
        [
            MockResponse::json(fixtures::job("j1", "PROCESSING")),
            MockResponse::transport_failure("connection reset by peer"),
        ],
    ));

    let err = cf
        .jobs()
        .poll_complete(&JobRef::new("j1"), &fast_polls(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, RestClientError::Transport(TransportError::Http(_))));
    assert_eq!(mock.requests().len(), 2);
}
