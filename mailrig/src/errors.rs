//! Error types for the mailrig toolkit.
//!
//! Lower layers return tagged results and never panic across their own
//! boundary; the shapes here are the whole propagation surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to build or deliver a signed request.
///
/// Non-2xx statuses are not transport errors: the response is returned to
/// the caller as data and classified there.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request could not be constructed or signed.
    #[error("request build failed: {0}")]
    Build(String),

    /// The request left the process but no response came back.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {0:.1}s")]
    Timeout(f64),
}

/// Failure of a single control-plane call.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        /// Signing name of the service that answered.
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// A success response did not carry the expected fields.
    #[error("unexpected response shape: {0}")]
    Response(String),
}

impl ApiError {
    /// Returns the HTTP status if the service answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Stable classification of a credential-verification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyErrorKind {
    /// The key/secret pair failed the format check; no call was made.
    InvalidCredentials,
    /// The request could not be built or signed.
    ConfigurationError,
    /// The identity service rejected the credentials (or the region does
    /// not exist).
    AuthenticationFailed,
    /// The identity service is throttling requests.
    RateLimited,
    /// The call failed below the protocol level.
    NetworkError,
    /// The identity service answered success with an unreadable body.
    ResponseError,
}

impl VerifyErrorKind {
    /// Returns the stable snake_case name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::ConfigurationError => "configuration_error",
            Self::AuthenticationFailed => "authentication_failed",
            Self::RateLimited => "rate_limited",
            Self::NetworkError => "network_error",
            Self::ResponseError => "response_error",
        }
    }
}

impl std::fmt::Display for VerifyErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by credential verification.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct VerifyError {
    /// Stable failure kind.
    pub kind: VerifyErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl VerifyError {
    /// Creates a new verification error.
    #[must_use]
    pub fn new(kind: VerifyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_kind_names() {
        assert_eq!(VerifyErrorKind::InvalidCredentials.as_str(), "invalid_credentials");
        assert_eq!(VerifyErrorKind::AuthenticationFailed.as_str(), "authentication_failed");
        assert_eq!(VerifyErrorKind::RateLimited.to_string(), "rate_limited");
    }

    #[test]
    fn test_verify_kind_serde() {
        let json = serde_json::to_string(&VerifyErrorKind::NetworkError).unwrap();
        assert_eq!(json, "\"network_error\"");
    }

    #[test]
    fn test_verify_error_display() {
        let err = VerifyError::new(VerifyErrorKind::ResponseError, "missing Account field");
        assert_eq!(err.to_string(), "response_error: missing Account field");
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::Status {
            service: "sts",
            status: 403,
            body: "denied".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("403"));

        let err = ApiError::Transport(TransportError::Network("refused".to_string()));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Timeout(30.0);
        assert_eq!(err.to_string(), "request timed out after 30.0s");
    }
}
