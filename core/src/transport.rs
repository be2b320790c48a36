//! The seam between request building and the network.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and hands back the raw
//! `HttpResponse`, status interpretation included. Non-2xx statuses are data,
//! not errors; only connectivity failures and timeouts come back as `Err`.
//!
//! `UreqTransport` runs a blocking `ureq` agent on tokio's blocking pool, so
//! callers see an ordinary suspension point per request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        (**self).execute(request).await
    }
}

/// Production transport backed by `ureq`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build an agent that fails any request taking longer than `timeout`.
    ///
    /// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
    /// responses reach `CatalogClient` as data.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(format!("request task failed: {e}")))?
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> ApiResult<HttpResponse> {
    let mut builder = agent.get(&request.url);
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    for (key, value) in &request.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    let mut response = builder
        .call()
        .map_err(|e| ApiError::Transport(format!("GET {}: {e}", request.url)))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(format!("reading body of {}: {e}", request.url)))?;

    Ok(HttpResponse { status, body })
}
