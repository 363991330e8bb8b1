//! Signed HTTP transport for control-plane calls.
//!
//! Every network interaction in the crate goes through the [`AwsTransport`]
//! trait, which is the seam tests stub. The real implementation lives in
//! [`HttpTransport`]; scripted doubles live in [`crate::testing`].

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Credentials;
use crate::errors::TransportError;

/// HTTP method of a control-plane request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// DELETE request.
    Delete,
}

impl Method {
    /// Uppercase method name, as signed.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A control-plane request prior to signing.
#[derive(Debug, Clone)]
pub struct AwsRequest {
    /// Service signing name (e.g. `ses`), not always the endpoint prefix.
    pub service: &'static str,
    /// Host prefix for endpoint construction (e.g. `email` for SESv2).
    pub endpoint_prefix: &'static str,
    /// Logical operation name, used for logging and test matching.
    pub action: &'static str,
    /// HTTP method.
    pub method: Method,
    /// URI path.
    pub path: String,
    /// Query parameters, unencoded.
    pub query: Vec<(String, String)>,
    /// Extra headers; all of them are signed.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: String,
    /// Region the endpoint lives in.
    pub region: String,
}

impl AwsRequest {
    /// Creates a POST request to `/` for a service whose endpoint prefix
    /// equals its signing name.
    #[must_use]
    pub fn new(service: &'static str, action: &'static str) -> Self {
        Self {
            service,
            endpoint_prefix: service,
            action,
            method: Method::Post,
            path: "/".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: String::new(),
            region: String::new(),
        }
    }

    /// Overrides the endpoint host prefix.
    #[must_use]
    pub fn with_endpoint_prefix(mut self, prefix: &'static str) -> Self {
        self.endpoint_prefix = prefix;
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the URI path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Host the request is sent to.
    #[must_use]
    pub fn host(&self) -> String {
        format!("{}.{}.amazonaws.com", self.endpoint_prefix, self.region)
    }

    /// Full endpoint URL without query string.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("https://{}{}", self.host(), self.path)
    }
}

/// A control-plane response.
///
/// Non-2xx statuses arrive here as data; only failures below the protocol
/// level surface as [`TransportError`].
#[derive(Debug, Clone)]
pub struct AwsResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl AwsResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the call succeeded (2xx status).
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON, if it is JSON.
    #[must_use]
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Transport for signed control-plane requests.
#[async_trait]
pub trait AwsTransport: Send + Sync {
    /// Signs and delivers a request, returning the response regardless of
    /// status.
    async fn send(
        &self,
        credentials: &Credentials,
        request: AwsRequest,
    ) -> Result<AwsResponse, TransportError>;
}

fn default_timeout() -> f64 {
    30.0
}

fn default_connect_timeout() -> f64 {
    10.0
}

fn default_user_agent() -> String {
    "mailrig/0.1".to_string()
}

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl TransportConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }

    /// Connection timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.connect_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = AwsRequest::new("sqs", "CreateQueue");

        assert_eq!(request.service, "sqs");
        assert_eq!(request.endpoint_prefix, "sqs");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/");
    }

    #[test]
    fn test_request_host_uses_endpoint_prefix() {
        let request = AwsRequest::new("ses", "CreateConfigurationSet")
            .with_endpoint_prefix("email")
            .with_region("eu-north-1")
            .with_path("/v2/email/configuration-sets");

        assert_eq!(request.host(), "email.eu-north-1.amazonaws.com");
        assert_eq!(
            request.endpoint(),
            "https://email.eu-north-1.amazonaws.com/v2/email/configuration-sets"
        );
        assert_eq!(request.service, "ses");
    }

    #[test]
    fn test_response_is_success() {
        assert!(AwsResponse::new(200, "").is_success());
        assert!(AwsResponse::new(204, "").is_success());
        assert!(!AwsResponse::new(301, "").is_success());
        assert!(!AwsResponse::new(403, "").is_success());
    }

    #[test]
    fn test_response_json() {
        let response = AwsResponse::new(200, r#"{"QueueUrl":"https://example"}"#);
        let value = response.json().unwrap();
        assert_eq!(value["QueueUrl"], "https://example");

        assert!(AwsResponse::new(200, "<xml/>").json().is_none());
    }

    #[test]
    fn test_transport_config_defaults() {
        let config = TransportConfig::default();
        assert!((config.timeout_seconds - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }
}
