//! HTTP binding for the NocoDB v2 API.
//!
//! A thin wrapper over `reqwest` holding the base URL, auth header and
//! request timeout. All higher-level operations go through [`NocoClient`];
//! the client itself keeps no mutable state, so concurrent calls are safe.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::ConnectionConfig;
use crate::error::ClientError;

/// Upper bound on every individual HTTP call. Timed-out requests fail with
/// a transport error and are not retried.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a single NocoDB deployment.
pub struct NocoClient {
    http: Client,
    config: ConnectionConfig,
}

impl NocoClient {
    /// Build a client from connection parameters. Fails only when the API
    /// token cannot be used as a header value.
    pub fn new(config: ConnectionConfig) -> Result<Self, ClientError> {
        let token = HeaderValue::from_str(&config.api_token).map_err(|_| {
            ClientError::Config("API token contains characters not allowed in a header".into())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert("xc-token", token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// The configured base (workspace) identifier.
    pub fn base_id(&self) -> &str {
        &self.config.base_id
    }

    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        self.send(Method::GET, path, None).await
    }

    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn patch_json(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    pub(crate) async fn delete_json(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.send(Method::DELETE, path, body).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, "request failed");
            return Err(ClientError::Status { status, body });
        }

        // Some metadata endpoints answer with an empty or non-JSON body.
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}
