//! Topic operations over the SNS Query protocol.
//!
//! Responses are requested as JSON via the `Accept` header; parsing
//! tolerates both the enveloped and the flat field layout.

use std::sync::Arc;

use super::{envelope_field, error_for_status, form_body};
use crate::config::Credentials;
use crate::errors::ApiError;
use crate::transport::{AwsRequest, AwsTransport};

const API_VERSION: &str = "2010-03-31";

/// Client for the pub/sub service.
#[derive(Clone)]
pub struct SnsClient {
    transport: Arc<dyn AwsTransport>,
}

impl SnsClient {
    /// Creates a client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn AwsTransport>) -> Self {
        Self { transport }
    }

    fn request(action: &'static str, params: &[(&str, &str)], region: &str) -> AwsRequest {
        AwsRequest::new("sns", action)
            .with_region(region)
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_header("accept", "application/json")
            .with_body(form_body(params))
    }

    /// Creates (or re-resolves) a topic by name and returns its ARN.
    ///
    /// Topic creation is idempotent by name on the provider side, so this
    /// call succeeds on re-runs without any conflict handling.
    pub async fn create_topic(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<String, ApiError> {
        let request = Self::request(
            "CreateTopic",
            &[
                ("Action", "CreateTopic"),
                ("Name", name),
                ("Version", API_VERSION),
            ],
            &credentials.region,
        );

        let response = self.transport.send(credentials, request).await?;
        if !response.is_success() {
            return Err(error_for_status("sns", &response));
        }
        string_field(&response.body, "CreateTopic", "TopicArn")
    }

    /// Subscribes a queue to a topic and returns the subscription ARN.
    pub async fn subscribe(
        &self,
        credentials: &Credentials,
        topic_arn: &str,
        queue_arn: &str,
    ) -> Result<String, ApiError> {
        let request = Self::request(
            "Subscribe",
            &[
                ("Action", "Subscribe"),
                ("TopicArn", topic_arn),
                ("Protocol", "sqs"),
                ("Endpoint", queue_arn),
                ("Version", API_VERSION),
            ],
            &credentials.region,
        );

        let response = self.transport.send(credentials, request).await?;
        if !response.is_success() {
            return Err(error_for_status("sns", &response));
        }
        string_field(&response.body, "Subscribe", "SubscriptionArn")
    }

    /// Read-only listing used as a permission probe.
    pub async fn list_topics(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let request = Self::request(
            "ListTopics",
            &[("Action", "ListTopics"), ("Version", API_VERSION)],
            &credentials.region,
        );

        let response = self.transport.send(credentials, request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(error_for_status("sns", &response))
        }
    }
}

fn string_field(body: &str, operation: &str, field: &str) -> Result<String, ApiError> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            envelope_field(&value, operation, field)
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string)
        })
        .ok_or_else(|| ApiError::Response(format!("{field} missing from: {body}")))
}
