//! HTTP transport backed by reqwest

use async_trait::async_trait;
use cf_client_api::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError, TransportResult};
use cf_rest_api_contract::ErrorEnvelope;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Response};
use tracing::{debug, warn};
use url::Url;

use crate::auth::AuthConfig;
use crate::config::ClientConfig;
use crate::error::RestClientResult;

/// REST transport talking to a Cloud Foundry API endpoint
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
    auth: AuthConfig,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(config: &ClientConfig) -> RestClientResult<Self> {
        let base_url = Url::parse(&config.api_url)?;
        if config.skip_tls_verification {
            warn!(api = %base_url, "TLS certificate verification is disabled");
        }
        let http_client = HttpClient::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.skip_tls_verification)
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            auth: config.auth(),
        })
    }

    /// Create a client from a base URL string with default settings
    pub fn from_url(base_url: &str, auth: AuthConfig) -> RestClientResult<Self> {
        let mut client = Self::new(&ClientConfig::new(base_url))?;
        client.auth = auth;
        Ok(client)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the authentication config
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    async fn request(&self, request: ApiRequest) -> TransportResult<ApiResponse> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|e| TransportError::Http(format!("invalid path {}: {e}", request.path)))?;

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        debug!(method = %request.method, %url, "Sending request");

        let mut builder = self.http_client.request(method, url);

        // Add authentication headers
        let auth_headers = self
            .auth
            .headers()
            .map_err(|e| TransportError::Auth(e.to_string()))?;
        builder = builder.headers(auth_headers);

        builder = match request.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Yaml(text) => builder.header(CONTENT_TYPE, "application/x-yaml").body(text),
            RequestBody::Upload {
                field,
                file_name,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("application/zip")
                    .map_err(|e| TransportError::Http(e.to_string()))?;
                builder.multipart(Form::new().part(field, part))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> TransportResult<ApiResponse> {
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        if status.is_success() {
            let body = if text.trim().is_empty() {
                None
            } else {
                Some(serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))?)
            };
            Ok(ApiResponse {
                status: status.as_u16(),
                location,
                body,
            })
        } else {
            match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => Err(TransportError::Api {
                    status: status.as_u16(),
                    errors: envelope.errors,
                }),
                Err(_) => Err(TransportError::UnexpectedResponse(format!(
                    "status {}: {}",
                    status.as_u16(),
                    text
                ))),
            }
        }
    }
}

#[async_trait]
impl Transport for RestClient {
    async fn send(&self, request: ApiRequest) -> TransportResult<ApiResponse> {
        self.request(request).await
    }
}
