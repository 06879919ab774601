//! HTTP transport used by provider clients
//!
//! Provider clients only build [`RequestOptions`] and read [`HttpResponse`]s;
//! connection handling, timeouts and pooling belong to the transport.

use crate::attributes::AttributeSet;
use crate::{NgPaymentsError, Result};
use async_trait::async_trait;
use http::Method;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Request body or query string
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    None,
    /// JSON request body
    Json(Value),
    /// URL query parameters
    Query(AttributeSet),
}

/// Per-call request options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Body or query parameters
    pub payload: Payload,
    /// Whether a non-2xx status is returned as [`NgPaymentsError::Transport`]
    pub http_errors: bool,
}

impl RequestOptions {
    /// Create empty request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Send `body` as JSON
    pub fn json(mut self, body: Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    /// Send `params` as the query string
    pub fn query(mut self, params: AttributeSet) -> Self {
        self.payload = Payload::Query(params);
        self
    }

    /// Set the HTTP error mode
    pub fn http_errors(mut self, http_errors: bool) -> Self {
        self.http_errors = http_errors;
        self
    }

    /// Look up a header by case-insensitive name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw gateway response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body, `Value::Null` when empty or not JSON
    pub body: Value,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Apply the HTTP error mode of a request
    pub fn error_for_status(self, http_errors: bool) -> Result<Self> {
        if http_errors && !self.is_success() {
            return Err(NgPaymentsError::Transport {
                status: self.status,
                body: self.body,
            });
        }
        Ok(self)
    }
}

/// HTTP transport consumed by provider clients
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a request against `path`, relative to the transport's base URL
    async fn send(&self, method: Method, path: &str, options: RequestOptions)
        -> Result<HttpResponse>;

    /// Issue a GET request
    async fn get(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.send(Method::GET, path, options).await
    }

    /// Issue a POST request
    async fn post(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.send(Method::POST, path, options).await
    }

    /// Issue a PUT request
    async fn put(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.send(Method::PUT, path, options).await
    }
}

/// [`Transport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// Base URL all paths are appended to
    base_url: String,
    /// HTTP client
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport for `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)
            .map_err(|e| NgPaymentsError::config(format!("Invalid base URL: {}", e)))?;

        let mut client_builder = Client::builder();
        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| NgPaymentsError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the base URL of this transport
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %path, "sending gateway request");

        let mut request = self.client.request(method, url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request = match &options.payload {
            Payload::None => request,
            Payload::Json(body) => request.json(body),
            Payload::Query(params) => request.query(&query_pairs(params)),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(status, %path, "gateway responded");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|e| {
                debug!(error = %e, "gateway response is not JSON");
                Value::Null
            })
        };

        HttpResponse::new(status, body).error_for_status(options.http_errors)
    }
}

/// Flatten attributes into query pairs; nulls are skipped
fn query_pairs(params: &AttributeSet) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}
