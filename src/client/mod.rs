//! HTTP client for the listing site's REST backend.
//!
//! Every request is built and sent through `ApiClient`, which runs the
//! `AuthInterceptor` on the way out and on the way back.

pub mod auth;
pub mod content;
pub mod interceptor;
pub mod messages;
pub mod properties;
pub mod uploads;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub use content::ContentSection;
pub use interceptor::AuthInterceptor;

use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::session::SessionGuard;

/// Whether an endpoint needs the session credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    interceptor: AuthInterceptor,
}

impl ApiClient {
    /// Build the client with the interceptor installed. This is the only way
    /// to obtain one.
    pub fn new(config: &ApiConfig, interceptor: AuthInterceptor) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_in_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(ApiClient {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            interceptor,
        })
    }

    pub fn guard(&self) -> &Arc<SessionGuard> {
        self.interceptor.guard()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// A request for `path` with credentials attached per `access`.
    pub(crate) fn request(&self, method: Method, path: &str, access: Access) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));
        self.interceptor.authorize(request, access)
    }

    /// Send, run the rejection check, and turn any other failure status into
    /// `ApiError::Status`.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        debug!(
            status = response.status().as_u16(),
            path = response.url().path(),
            "response received"
        );
        let response = self.interceptor.inspect(response)?;
        ensure_success(response).await
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return serde_json::from_value(Value::Null).map_err(|e| ApiError::Decode(e.to_string()));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Server failures stay local to the caller; the message comes from the
/// body's `message` field when the backend sends one.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Err(ApiError::Status { status, message })
}
