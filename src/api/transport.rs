//! Transport seam between the hero client and the remote API
//!
//! The client only depends on the `Transport` trait. `HttpTransport` is the
//! reqwest-backed implementation used by the binary; tests plug in their own.

use super::constants::headers;
use super::error::TransportError;
use crate::config::ApiConfig;
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};

/// HTTP methods used by hero operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against the heroes API, relative to the base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark the request as carrying JSON, without attaching a body
    pub fn json_content(self) -> Self {
        self.header(headers::CONTENT_TYPE, headers::CONTENT_TYPE_JSON)
    }

    /// Attach a JSON body and the matching content type header
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self.json_content()
    }

    /// Look up a header value (case-insensitive name match)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Capability to send one request and receive its decoded JSON payload
///
/// Implementations fail with an error whose display text is a short,
/// human-readable message. An empty successful body yields `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<Value>;
}

/// reqwest-backed transport with connection pooling
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from API configuration
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(headers::USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(config.base_url.clone(), http_client))
    }

    /// Create a transport around an existing reqwest client
    pub fn with_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a relative API path onto the base URL
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<Value> {
        let url = self.url(&request.path);

        let mut builder = match request.method {
            Method::Get => self.http_client.get(&url),
            Method::Post => self.http_client.post(&url),
            Method::Put => self.http_client.put(&url),
            Method::Delete => self.http_client.delete(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(TransportError::from)?;
        let status = response.status();
        debug!("{} {} -> {} in {:?}", request.method, url, status, started.elapsed());

        let text = response.text().await.map_err(TransportError::from)?;
        if !status.is_success() {
            return Err(TransportError::Status { status, body: text }.into());
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let payload = serde_json::from_str(&text).map_err(TransportError::from)?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_base_and_path() {
        let transport =
            HttpTransport::with_client("http://localhost:8080/", reqwest::Client::new());
        assert_eq!(transport.url("api/heroes"), "http://localhost:8080/api/heroes");
        assert_eq!(transport.url("/api/heroes/5"), "http://localhost:8080/api/heroes/5");
    }

    #[test]
    fn test_json_request_sets_content_type() {
        let request = ApiRequest::new(Method::Post, "api/heroes").json(json!({"name": "Tornado"}));

        assert_eq!(request.body, Some(json!({"name": "Tornado"})));
        assert_eq!(request.header_value("content-type"), Some("application/json"));
    }

    #[test]
    fn test_plain_request_has_no_headers() {
        let request = ApiRequest::new(Method::Get, "api/heroes");
        assert!(request.body.is_none());
        assert!(request.header_value("Content-Type").is_none());
        assert_eq!(request.method.to_string(), "GET");
    }
}
