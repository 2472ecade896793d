//! Typed request helpers on top of a [`Transport`]

use std::fmt;
use std::sync::Arc;

use cf_client_api::{ApiRequest, ApiResponse, Method, RequestBody, Transport};
use cf_rest_api_contract::{JobRef, ListResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{RestClientError, RestClientResult};
use crate::pager::Pager;
use crate::paging;
use crate::query::ListOptions;

/// Shared handle to a transport; cheap to clone
#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api").finish_non_exhaustive()
    }
}

impl Api {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> RestClientResult<T> {
        let response = self.send(ApiRequest::new(Method::Get, path)).await?;
        decode(response)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> RestClientResult<T> {
        let request = ApiRequest::new(Method::Post, path).with_body(json_body(body)?);
        decode(self.send(request).await?)
    }

    /// POST without a body, as used by `actions/*` endpoints
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> RestClientResult<T> {
        decode(self.send(ApiRequest::new(Method::Post, path)).await?)
    }

    /// POST a YAML document; the operation runs as a job
    pub async fn post_yaml(&self, path: &str, yaml: String) -> RestClientResult<JobRef> {
        let request = ApiRequest::new(Method::Post, path).with_body(RequestBody::Yaml(yaml));
        job_ref(self.send(request).await?)
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> RestClientResult<T> {
        let request = ApiRequest::new(Method::Patch, path).with_body(json_body(body)?);
        decode(self.send(request).await?)
    }

    /// DELETE a resource whose removal runs as a job
    pub async fn delete(&self, path: &str) -> RestClientResult<JobRef> {
        job_ref(self.send(ApiRequest::new(Method::Delete, path)).await?)
    }

    /// DELETE that completes synchronously (`204 No Content`)
    pub async fn delete_sync(&self, path: &str) -> RestClientResult<()> {
        self.send(ApiRequest::new(Method::Delete, path)).await?;
        Ok(())
    }

    /// Upload a file as a single-part multipart form
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> RestClientResult<T> {
        let request = ApiRequest::new(Method::Post, path).with_body(RequestBody::Upload {
            field: field.to_string(),
            file_name: file_name.to_string(),
            bytes,
        });
        decode(self.send(request).await?)
    }

    /// Fetch one page of a list endpoint
    pub async fn list_page<R, O>(&self, path: &str, options: &O) -> RestClientResult<(Vec<R>, Pager)>
    where
        R: DeserializeOwned,
        O: ListOptions,
    {
        let query = options.to_query_string();
        let path = if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        };
        let page: ListResponse<R> = self.get(&path).await?;
        Ok((page.resources, Pager::new(page.pagination)))
    }

    /// Fetch every page of a list endpoint
    pub async fn list_all<R, O>(&self, path: &str, options: Option<O>) -> RestClientResult<Vec<R>>
    where
        R: DeserializeOwned,
        O: ListOptions,
    {
        paging::auto_page(options, |options| async move { self.list_page(path, &options).await }).await
    }

    /// Fetch exactly one resource matching `options`
    pub async fn single<R, O>(&self, path: &str, options: O) -> RestClientResult<R>
    where
        R: DeserializeOwned,
        O: ListOptions,
    {
        paging::single(Some(options), |options| async move { self.list_page(path, &options).await }).await
    }

    async fn send(&self, request: ApiRequest) -> RestClientResult<ApiResponse> {
        Ok(self.transport.send(request).await?)
    }
}

fn json_body<B: Serialize>(body: &B) -> RestClientResult<RequestBody> {
    Ok(RequestBody::Json(serde_json::to_value(body)?))
}

fn decode<T: DeserializeOwned>(response: ApiResponse) -> RestClientResult<T> {
    Ok(serde_json::from_value(response.body.unwrap_or(Value::Null))?)
}

fn job_ref(response: ApiResponse) -> RestClientResult<JobRef> {
    let location = response.location.ok_or_else(|| {
        RestClientError::UnexpectedResponse(format!(
            "status {} without a job Location header",
            response.status
        ))
    })?;
    JobRef::from_location(&location)
        .ok_or_else(|| RestClientError::UnexpectedResponse(format!("not a job location: {location}")))
}
