//! Queue operations over the SQS JSON protocol.

use std::sync::Arc;

use serde_json::json;

use super::{envelope_field, error_for_status};
use crate::config::Credentials;
use crate::errors::ApiError;
use crate::transport::{AwsRequest, AwsTransport};

const TARGET_PREFIX: &str = "AmazonSQS";
const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// Client for the queue service.
#[derive(Clone)]
pub struct SqsClient {
    transport: Arc<dyn AwsTransport>,
}

impl SqsClient {
    /// Creates a client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn AwsTransport>) -> Self {
        Self { transport }
    }

    fn request(action: &'static str, body: &serde_json::Value, region: &str) -> AwsRequest {
        AwsRequest::new("sqs", action)
            .with_region(region)
            .with_header("content-type", CONTENT_TYPE)
            .with_header("x-amz-target", format!("{TARGET_PREFIX}.{action}"))
            .with_body(body.to_string())
    }

    /// Creates a queue and returns its URL.
    ///
    /// A name conflict surfaces as an `ApiError::Status`; callers that want
    /// already-exists tolerance pair this with [`Self::get_queue_url`] via
    /// [`is_queue_conflict`].
    pub async fn create_queue(
        &self,
        credentials: &Credentials,
        name: &str,
        attributes: &serde_json::Value,
    ) -> Result<String, ApiError> {
        let body = json!({ "QueueName": name, "Attributes": attributes });
        let request = Self::request("CreateQueue", &body, &credentials.region);

        let response = self.transport.send(credentials, request).await?;
        if !response.is_success() {
            return Err(error_for_status("sqs", &response));
        }
        queue_url_from(&response.body, "CreateQueue")
    }

    /// Resolves the URL of an existing queue by name.
    pub async fn get_queue_url(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<String, ApiError> {
        let body = json!({ "QueueName": name });
        let request = Self::request("GetQueueUrl", &body, &credentials.region);

        let response = self.transport.send(credentials, request).await?;
        if !response.is_success() {
            return Err(error_for_status("sqs", &response));
        }
        queue_url_from(&response.body, "GetQueueUrl")
    }

    /// Sets attributes on an existing queue.
    pub async fn set_queue_attributes(
        &self,
        credentials: &Credentials,
        queue_url: &str,
        attributes: &serde_json::Value,
    ) -> Result<(), ApiError> {
        let body = json!({ "QueueUrl": queue_url, "Attributes": attributes });
        let request = Self::request("SetQueueAttributes", &body, &credentials.region);

        let response = self.transport.send(credentials, request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(error_for_status("sqs", &response))
        }
    }

    /// Read-only listing used as a permission probe.
    pub async fn list_queues(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let body = json!({});
        let request = Self::request("ListQueues", &body, &credentials.region);

        let response = self.transport.send(credentials, request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(error_for_status("sqs", &response))
        }
    }
}

fn queue_url_from(body: &str, operation: &str) -> Result<String, ApiError> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            envelope_field(&value, operation, "QueueUrl")
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string)
        })
        .ok_or_else(|| ApiError::Response(format!("QueueUrl missing from: {body}")))
}

/// Whether an error response means the queue already exists.
#[must_use]
pub fn is_queue_conflict(status: u16, body: &str) -> bool {
    status == 400
        && (body.contains("QueueAlreadyExists") || body.contains("QueueNameExists"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_url_from_flat() {
        let url = queue_url_from(r#"{"QueueUrl":"https://sqs/q"}"#, "CreateQueue").unwrap();
        assert_eq!(url, "https://sqs/q");
    }

    #[test]
    fn test_queue_url_from_wrapped() {
        let body = r#"{
            "GetQueueUrlResponse": {
                "GetQueueUrlResult": { "QueueUrl": "https://sqs/q" }
            }
        }"#;
        assert_eq!(queue_url_from(body, "GetQueueUrl").unwrap(), "https://sqs/q");
    }

    #[test]
    fn test_queue_url_missing_is_response_error() {
        let err = queue_url_from("{}", "CreateQueue").unwrap_err();
        assert!(matches!(err, ApiError::Response(_)));
    }

    #[test]
    fn test_is_queue_conflict() {
        let json_protocol = r#"{"__type":"com.amazonaws.sqs#QueueNameExists","message":"exists"}"#;
        assert!(is_queue_conflict(400, json_protocol));
        assert!(is_queue_conflict(400, "QueueAlreadyExists"));

        assert!(!is_queue_conflict(400, "AccessDenied"));
        assert!(!is_queue_conflict(500, "QueueNameExists or not, server error"));
    }
}
