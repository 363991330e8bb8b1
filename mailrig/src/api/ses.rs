//! The two SESv2 control-plane operations the pipeline needs.
//!
//! SESv2 lives at `email.{region}` but must be signed under the `ses`
//! service name; signing under the host prefix is rejected. Both write
//! operations normalize "already exists" to success, which is what makes
//! the whole pipeline safely re-runnable.

use std::sync::Arc;

use serde_json::json;

use super::error_for_status;
use crate::config::Credentials;
use crate::errors::ApiError;
use crate::transport::{AwsRequest, AwsTransport, Method};

const ENDPOINT_PREFIX: &str = "email";
const CONFIGURATION_SETS_PATH: &str = "/v2/email/configuration-sets";

/// Email lifecycle event categories forwarded to the topic.
pub const TRACKED_EVENT_TYPES: &[&str] = &[
    "SEND",
    "REJECT",
    "BOUNCE",
    "COMPLAINT",
    "DELIVERY",
    "OPEN",
    "CLICK",
    "RENDERING_FAILURE",
];

/// Client for the email-sending control plane.
#[derive(Clone)]
pub struct SesClient {
    transport: Arc<dyn AwsTransport>,
}

impl SesClient {
    /// Creates a client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn AwsTransport>) -> Self {
        Self { transport }
    }

    fn request(action: &'static str, path: impl Into<String>, region: &str) -> AwsRequest {
        AwsRequest::new("ses", action)
            .with_endpoint_prefix(ENDPOINT_PREFIX)
            .with_region(region)
            .with_path(path)
            .with_header("content-type", "application/json")
    }

    /// Creates a configuration set; an existing one counts as success.
    pub async fn create_configuration_set(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<(), ApiError> {
        let request = Self::request(
            "CreateConfigurationSet",
            CONFIGURATION_SETS_PATH,
            &credentials.region,
        )
        .with_body(json!({ "ConfigurationSetName": name }).to_string());

        let response = self.transport.send(credentials, request).await?;
        if response.is_success() || is_conflict(response.status, &response.body) {
            Ok(())
        } else {
            Err(error_for_status("ses", &response))
        }
    }

    /// Attaches an event destination forwarding the tracked event types to
    /// a topic; an existing destination counts as success.
    pub async fn create_configuration_set_event_destination(
        &self,
        credentials: &Credentials,
        configuration_set: &str,
        destination_name: &str,
        topic_arn: &str,
        event_types: &[&str],
    ) -> Result<(), ApiError> {
        let path = format!("{CONFIGURATION_SETS_PATH}/{configuration_set}/event-destinations");
        let body = json!({
            "EventDestinationName": destination_name,
            "EventDestination": {
                "Enabled": true,
                "MatchingEventTypes": event_types,
                "SnsDestination": { "TopicArn": topic_arn },
            }
        });
        let request = Self::request(
            "CreateConfigurationSetEventDestination",
            path,
            &credentials.region,
        )
        .with_body(body.to_string());

        let response = self.transport.send(credentials, request).await?;
        if response.is_success() || is_conflict(response.status, &response.body) {
            Ok(())
        } else {
            Err(error_for_status("ses", &response))
        }
    }

    /// Read-only listing used as a permission probe.
    pub async fn list_configuration_sets(
        &self,
        credentials: &Credentials,
    ) -> Result<(), ApiError> {
        let request = Self::request(
            "ListConfigurationSets",
            CONFIGURATION_SETS_PATH,
            &credentials.region,
        )
        .with_method(Method::Get);

        let response = self.transport.send(credentials, request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(error_for_status("ses", &response))
        }
    }
}

/// Whether an error response means the resource already exists.
///
/// Three shapes count: HTTP 409; an error body typed
/// `AlreadyExistsException`; or a message containing "already exists".
#[must_use]
pub fn is_conflict(status: u16, body: &str) -> bool {
    if status == 409 {
        return true;
    }
    if (200..300).contains(&status) {
        return false;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let typed_conflict = value
            .get("__type")
            .or_else(|| value.get("Type"))
            .and_then(serde_json::Value::as_str)
            .is_some_and(|t| t.contains("AlreadyExistsException"));
        if typed_conflict {
            return true;
        }

        let message_conflict = value
            .get("message")
            .or_else(|| value.get("Message"))
            .and_then(serde_json::Value::as_str)
            .is_some_and(|m| m.to_lowercase().contains("already exists"));
        if message_conflict {
            return true;
        }
    }

    body.contains("AlreadyExistsException")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_on_409() {
        assert!(is_conflict(409, ""));
    }

    #[test]
    fn test_conflict_on_typed_body() {
        let body = r#"{"__type":"AlreadyExistsException","message":"Configuration set exists"}"#;
        assert!(is_conflict(400, body));
    }

    #[test]
    fn test_conflict_on_message_body() {
        let body = r#"{"message":"Resource already exists in this account"}"#;
        assert!(is_conflict(400, body));
    }

    #[test]
    fn test_conflict_on_raw_body() {
        assert!(is_conflict(400, "AlreadyExistsException: configuration set"));
    }

    #[test]
    fn test_not_conflict_on_other_errors() {
        assert!(!is_conflict(400, r#"{"__type":"BadRequestException"}"#));
        assert!(!is_conflict(403, r#"{"message":"Access denied"}"#));
        assert!(!is_conflict(200, ""));
    }

    #[test]
    fn test_tracked_event_types_complete() {
        assert_eq!(TRACKED_EVENT_TYPES.len(), 8);
        assert!(TRACKED_EVENT_TYPES.contains(&"BOUNCE"));
        assert!(TRACKED_EVENT_TYPES.contains(&"RENDERING_FAILURE"));
    }
}
