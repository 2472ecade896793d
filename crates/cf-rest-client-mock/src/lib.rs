//! Mock transport backed by scripted responses
//!
//! Responses are registered per `(method, path)`. A path registered with a
//! query string only matches that exact request; a bare path matches any
//! query. Several responses for the same route are served in order and the
//! last one keeps being served, which is how paged listings and polled state
//! sequences are scripted. Every request is recorded for later assertions.

pub mod fixtures;

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use cf_client_api::{ApiRequest, ApiResponse, Method, Transport, TransportError, TransportResult};
use cf_rest_api_contract::ApiError;
use serde_json::Value;

pub const MOCK_API_URL: &str = "https://api.example.org";

/// A scripted reply
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    Success(ApiResponse),
    ApiError { status: u16, errors: Vec<ApiError> },
    TransportFailure(String),
}

impl MockResponse {
    /// `200 OK` with a JSON body
    pub fn json(body: Value) -> Self {
        Self::with_status(200, body)
    }

    /// `201 Created` with a JSON body
    pub fn created(body: Value) -> Self {
        Self::with_status(201, body)
    }

    pub fn with_status(status: u16, body: Value) -> Self {
        Self::Success(ApiResponse {
            status,
            location: None,
            body: Some(body),
        })
    }

    /// `202 Accepted` pointing at a job
    pub fn accepted_job(job_guid: &str) -> Self {
        Self::Success(ApiResponse {
            status: 202,
            location: Some(format!("{MOCK_API_URL}/v3/jobs/{job_guid}")),
            body: None,
        })
    }

    pub fn no_content() -> Self {
        Self::Success(ApiResponse {
            status: 204,
            location: None,
            body: None,
        })
    }

    pub fn api_error(status: u16, code: i64, title: &str, detail: &str) -> Self {
        Self::ApiError {
            status,
            errors: vec![ApiError {
                code,
                title: title.to_string(),
                detail: detail.to_string(),
            }],
        }
    }

    pub fn not_found(detail: &str) -> Self {
        Self::api_error(404, 10010, "CF-ResourceNotFound", detail)
    }

    pub fn transport_failure(message: &str) -> Self {
        Self::TransportFailure(message.to_string())
    }

    fn into_result(self) -> TransportResult<ApiResponse> {
        match self {
            MockResponse::Success(response) => Ok(response),
            MockResponse::ApiError { status, errors } => Err(TransportError::Api { status, errors }),
            MockResponse::TransportFailure(message) => Err(TransportError::Http(message)),
        }
    }
}

/// In-memory [`Transport`] serving scripted responses
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<MockResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`
    pub fn with_response(self, method: Method, path: &str, response: MockResponse) -> Self {
        self.respond(method, path, response);
        self
    }

    /// Queue several responses for `method path`, served in order
    pub fn with_responses<I>(self, method: Method, path: &str, responses: I) -> Self
    where
        I: IntoIterator<Item = MockResponse>,
    {
        for response in responses {
            self.respond(method, path, response);
        }
        self
    }

    pub fn respond(&self, method: Method, path: &str, response: MockResponse) {
        lock(&self.routes)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    /// Requests rendered as `METHOD /path?query`
    pub fn calls(&self) -> Vec<String> {
        lock(&self.requests)
            .iter()
            .map(|request| format!("{} {}", request.method, request.path))
            .collect()
    }

    /// Requests whose path (without query) equals `path`
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        lock(&self.requests)
            .iter()
            .filter(|request| request.method == method && strip_query(&request.path) == path)
            .cloned()
            .collect()
    }

    fn next_response(&self, method: Method, path: &str) -> Option<MockResponse> {
        let mut routes = lock(&self.routes);
        let key = if routes.contains_key(&(method, path.to_string())) {
            (method, path.to_string())
        } else {
            (method, strip_query(path).to_string())
        };
        let queue = routes.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> TransportResult<ApiResponse> {
        let method = request.method;
        let path = request.path.clone();
        lock(&self.requests).push(request);

        match self.next_response(method, &path) {
            Some(response) => response.into_result(),
            None => Err(TransportError::Api {
                status: 404,
                errors: vec![ApiError {
                    code: 10000,
                    title: "CF-NotFound".to_string(),
                    detail: format!("no mock response for {method} {path}"),
                }],
            }),
        }
    }
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map(|(p, _)| p).unwrap_or(path)
}

// A panicking test thread must not hide the recorded requests from others.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
