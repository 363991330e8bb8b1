//! The provisioning pipeline: ordered steps, fail-fast, idempotent re-runs.

mod provisioner;

pub use provisioner::Provisioner;

#[cfg(test)]
mod integration_tests;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Identifier of a pipeline step, as reported in failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Input and format checks before any network call.
    Validation,
    /// Account id resolution via the identity service.
    GetAccountId,
    /// Dead-letter queue creation.
    CreateDlq,
    /// Dead-letter queue access policy.
    SetDlqPolicy,
    /// Email-events topic creation.
    CreateSnsTopic,
    /// Main queue creation with redrive to the dead-letter queue.
    CreateMainQueue,
    /// Main queue access policy.
    SetMainQueuePolicy,
    /// Queue subscription; tolerated on failure, never reported.
    SubscribeQueueToTopic,
    /// Configuration-set creation.
    CreateSesConfigSet,
    /// Event-destination attachment.
    ConfigureSesEvents,
}

impl StepId {
    /// Returns the stable snake_case name of the step.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::GetAccountId => "get_account_id",
            Self::CreateDlq => "create_dlq",
            Self::SetDlqPolicy => "set_dlq_policy",
            Self::CreateSnsTopic => "create_sns_topic",
            Self::CreateMainQueue => "create_main_queue",
            Self::SetMainQueuePolicy => "set_main_queue_policy",
            Self::SubscribeQueueToTopic => "subscribe_queue_to_topic",
            Self::CreateSesConfigSet => "create_ses_config_set",
            Self::ConfigureSesEvents => "configure_ses_events",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error that aborts the pipeline at a given step.
///
/// The reason is the failing call's message, passed through uninterpreted.
#[derive(Debug, Clone, Error)]
#[error("step {step} failed: {reason}")]
pub struct StepError {
    /// The step that failed.
    pub step: StepId,
    /// Uninterpreted failure detail.
    pub reason: String,
}

impl StepError {
    /// Creates a new step error.
    #[must_use]
    pub fn new(step: StepId, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

/// A queue resource: URL as returned by the creation or lookup call, plus
/// the ARN templated from caller-known values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueHandle {
    /// Queue URL.
    pub url: String,
    /// Queue ARN.
    pub arn: String,
}

/// A topic resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicHandle {
    /// Topic ARN.
    pub arn: String,
}

/// A configuration-set resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSetHandle {
    /// Configuration-set name.
    pub name: String,
}

/// A subscription resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionHandle {
    /// Subscription ARN, or the `existing` sentinel when the subscribe call
    /// failed and was tolerated.
    pub arn: String,
}

impl SubscriptionHandle {
    /// Sentinel handle for the tolerated-failure path.
    #[must_use]
    pub fn existing() -> Self {
        Self {
            arn: "existing".to_string(),
        }
    }

    /// Whether this handle is the tolerated-failure sentinel.
    #[must_use]
    pub fn is_existing(&self) -> bool {
        self.arn == "existing"
    }
}

/// Handle to a resource a step created or confirmed.
///
/// Steps thread handles forward; no step mutates a handle it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceHandle {
    /// A queue.
    Queue(QueueHandle),
    /// A topic.
    Topic(TopicHandle),
    /// A configuration set.
    ConfigurationSet(ConfigurationSetHandle),
    /// A subscription.
    Subscription(SubscriptionHandle),
}

impl From<QueueHandle> for ResourceHandle {
    fn from(handle: QueueHandle) -> Self {
        Self::Queue(handle)
    }
}

impl From<TopicHandle> for ResourceHandle {
    fn from(handle: TopicHandle) -> Self {
        Self::Topic(handle)
    }
}

impl From<ConfigurationSetHandle> for ResourceHandle {
    fn from(handle: ConfigurationSetHandle) -> Self {
        Self::ConfigurationSet(handle)
    }
}

impl From<SubscriptionHandle> for ResourceHandle {
    fn from(handle: SubscriptionHandle) -> Self {
        Self::Subscription(handle)
    }
}

impl std::fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queue(queue) => write!(f, "queue {} ({})", queue.url, queue.arn),
            Self::Topic(topic) => write!(f, "topic {}", topic.arn),
            Self::ConfigurationSet(set) => write!(f, "configuration set {}", set.name),
            Self::Subscription(sub) => write!(f, "subscription {}", sub.arn),
        }
    }
}

/// Final outputs of a fully successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionOutputs {
    /// Region every resource was created in.
    pub aws_region: String,
    /// Email-events topic ARN.
    pub aws_sns_topic_arn: String,
    /// Main queue URL.
    pub aws_sqs_queue_url: String,
    /// Main queue ARN.
    pub aws_sqs_queue_arn: String,
    /// Dead-letter queue URL.
    pub aws_sqs_dlq_url: String,
    /// Configuration-set name.
    pub aws_ses_configuration_set: String,
    /// Consumer polling interval in milliseconds.
    pub sqs_polling_interval_ms: u64,
}

impl ProvisionOutputs {
    /// Flattens into the string-keyed map callers persist.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("aws_region".to_string(), self.aws_region);
        map.insert("aws_sns_topic_arn".to_string(), self.aws_sns_topic_arn);
        map.insert("aws_sqs_queue_url".to_string(), self.aws_sqs_queue_url);
        map.insert("aws_sqs_queue_arn".to_string(), self.aws_sqs_queue_arn);
        map.insert("aws_sqs_dlq_url".to_string(), self.aws_sqs_dlq_url);
        map.insert(
            "aws_ses_configuration_set".to_string(),
            self.aws_ses_configuration_set,
        );
        map.insert(
            "sqs_polling_interval_ms".to_string(),
            self.sqs_polling_interval_ms.to_string(),
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_id_names() {
        assert_eq!(StepId::Validation.as_str(), "validation");
        assert_eq!(StepId::GetAccountId.as_str(), "get_account_id");
        assert_eq!(StepId::CreateMainQueue.to_string(), "create_main_queue");
        assert_eq!(StepId::ConfigureSesEvents.as_str(), "configure_ses_events");
    }

    #[test]
    fn test_step_id_serde() {
        let json = serde_json::to_string(&StepId::CreateSnsTopic).unwrap();
        assert_eq!(json, "\"create_sns_topic\"");
    }

    #[test]
    fn test_step_error_display() {
        let err = StepError::new(StepId::CreateDlq, "HTTP 500");
        assert_eq!(err.to_string(), "step create_dlq failed: HTTP 500");
    }

    #[test]
    fn test_existing_subscription_sentinel() {
        let handle = SubscriptionHandle::existing();
        assert!(handle.is_existing());
        assert_eq!(handle.arn, "existing");

        let real = SubscriptionHandle {
            arn: "arn:aws:sns:eu-north-1:123456789012:t:sub-1".to_string(),
        };
        assert!(!real.is_existing());
    }

    #[test]
    fn test_resource_handle_display() {
        let handle = ResourceHandle::from(TopicHandle {
            arn: "arn:aws:sns:eu-north-1:123456789012:t".to_string(),
        });
        assert_eq!(handle.to_string(), "topic arn:aws:sns:eu-north-1:123456789012:t");
    }

    #[test]
    fn test_outputs_into_map() {
        let outputs = ProvisionOutputs {
            aws_region: "eu-north-1".to_string(),
            aws_sns_topic_arn: "arn:aws:sns:eu-north-1:123456789012:t".to_string(),
            aws_sqs_queue_url: "https://sqs/q".to_string(),
            aws_sqs_queue_arn: "arn:aws:sqs:eu-north-1:123456789012:q".to_string(),
            aws_sqs_dlq_url: "https://sqs/dlq".to_string(),
            aws_ses_configuration_set: "my-app-emailing".to_string(),
            sqs_polling_interval_ms: 5000,
        };

        let map = outputs.into_map();
        assert_eq!(map.len(), 7);
        assert_eq!(map["aws_region"], "eu-north-1");
        assert_eq!(map["sqs_polling_interval_ms"], "5000");
    }
}
