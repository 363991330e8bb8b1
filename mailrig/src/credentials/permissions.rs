//! Read-only permission probes.
//!
//! A probe can only ever yield `Granted` or `Denied`; transport failures,
//! error statuses, and unreadable bodies all collapse to `Denied` with a
//! logged warning. Nothing here propagates an error to the caller.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;

use crate::errors::ApiError;

/// Outcome of a single permission probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// The operation completed cleanly.
    Granted,
    /// The operation failed for any reason at all.
    Denied,
}

impl ProbeOutcome {
    /// Whether the probe succeeded.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => f.write_str("granted"),
            Self::Denied => f.write_str("denied"),
        }
    }
}

/// Result of probing one operation on one service.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeEntry {
    /// Operation that was probed.
    pub operation: &'static str,
    /// Probe outcome.
    pub outcome: ProbeOutcome,
    /// Whether the pipeline can run without this permission.
    pub optional: bool,
}

impl ProbeEntry {
    /// Creates a required probe entry.
    #[must_use]
    pub fn required(operation: &'static str, outcome: ProbeOutcome) -> Self {
        Self {
            operation,
            outcome,
            optional: false,
        }
    }

    /// Creates an optional probe entry.
    #[must_use]
    pub fn optional(operation: &'static str, outcome: ProbeOutcome) -> Self {
        Self {
            operation,
            outcome,
            optional: true,
        }
    }
}

/// Per-service probe results.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionReport {
    /// Queue listing probe.
    pub sqs: ProbeEntry,
    /// Topic listing probe.
    pub sns: ProbeEntry,
    /// Configuration-set listing probe.
    pub ses: ProbeEntry,
    /// Region listing probe; optional because the pipeline has a static
    /// fallback for it.
    pub ec2: ProbeEntry,
}

impl PermissionReport {
    /// Whether every permission the pipeline needs is granted.
    #[must_use]
    pub fn all_required_granted(&self) -> bool {
        [&self.sqs, &self.sns, &self.ses, &self.ec2]
            .iter()
            .all(|entry| entry.optional || entry.outcome.is_granted())
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut dict = HashMap::new();
        for (service, entry) in [
            ("sqs", &self.sqs),
            ("sns", &self.sns),
            ("ses", &self.ses),
            ("ec2", &self.ec2),
        ] {
            let mut value = serde_json::Map::new();
            value.insert(
                entry.operation.to_string(),
                serde_json::json!(entry.outcome.to_string()),
            );
            if entry.optional {
                value.insert("optional".to_string(), serde_json::json!(true));
            }
            dict.insert(service.to_string(), serde_json::Value::Object(value));
        }
        dict
    }
}

/// Runs one probe call, collapsing any failure to `Denied`.
pub(crate) async fn probe<F>(
    service: &'static str,
    operation: &'static str,
    call: F,
) -> ProbeOutcome
where
    F: Future<Output = Result<(), ApiError>>,
{
    match call.await {
        Ok(()) => ProbeOutcome::Granted,
        Err(err) => {
            tracing::warn!(service, operation, error = %err, "permission probe failed");
            ProbeOutcome::Denied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;

    fn report(ec2_outcome: ProbeOutcome) -> PermissionReport {
        PermissionReport {
            sqs: ProbeEntry::required("ListQueues", ProbeOutcome::Granted),
            sns: ProbeEntry::required("ListTopics", ProbeOutcome::Granted),
            ses: ProbeEntry::required("ListConfigurationSets", ProbeOutcome::Granted),
            ec2: ProbeEntry::optional("DescribeRegions", ec2_outcome),
        }
    }

    #[tokio::test]
    async fn test_probe_granted_on_success() {
        let outcome = probe("sqs", "ListQueues", async { Ok(()) }).await;
        assert_eq!(outcome, ProbeOutcome::Granted);
    }

    #[tokio::test]
    async fn test_probe_denied_on_api_error() {
        let outcome = probe("sqs", "ListQueues", async {
            Err(ApiError::Status {
                service: "sqs",
                status: 403,
                body: "AccessDenied".to_string(),
            })
        })
        .await;
        assert_eq!(outcome, ProbeOutcome::Denied);
    }

    #[tokio::test]
    async fn test_probe_denied_on_transport_error() {
        let outcome = probe("sns", "ListTopics", async {
            Err(ApiError::Transport(TransportError::Network(
                "connection reset".to_string(),
            )))
        })
        .await;
        assert_eq!(outcome, ProbeOutcome::Denied);
    }

    #[test]
    fn test_report_ignores_optional_denial() {
        assert!(report(ProbeOutcome::Denied).all_required_granted());
        assert!(report(ProbeOutcome::Granted).all_required_granted());
    }

    #[test]
    fn test_report_to_dict_shape() {
        let dict = report(ProbeOutcome::Denied).to_dict();

        assert_eq!(dict["sqs"]["ListQueues"], "granted");
        assert_eq!(dict["ec2"]["DescribeRegions"], "denied");
        assert_eq!(dict["ec2"]["optional"], true);
        assert!(dict["sqs"].get("optional").is_none());
    }

    #[test]
    fn test_outcome_serde() {
        let json = serde_json::to_string(&ProbeOutcome::Denied).unwrap();
        assert_eq!(json, "\"denied\"");
    }
}
