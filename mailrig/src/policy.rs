//! Queue access-policy documents.
//!
//! Policies are built as JSON values and attached to queues as stringified
//! attributes. Both builders are pure; the ARNs they reference are templated
//! by [`crate::naming`], never looked up.

use serde_json::{json, Value};

/// Actions the owning account may perform on either queue.
const ACCOUNT_QUEUE_ACTIONS: [&str; 4] = [
    "sqs:SendMessage",
    "sqs:ReceiveMessage",
    "sqs:DeleteMessage",
    "sqs:GetQueueAttributes",
];

fn account_principal(account_id: &str) -> Value {
    json!({ "AWS": format!("arn:aws:iam::{account_id}:root") })
}

/// Builds the owner-only access policy for the dead-letter queue.
#[must_use]
pub fn build_dlq_policy(dlq_arn: &str, account_id: &str) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "OwnerAccess",
                "Effect": "Allow",
                "Principal": account_principal(account_id),
                "Action": ACCOUNT_QUEUE_ACTIONS,
                "Resource": dlq_arn,
            }
        ]
    })
}

/// Builds the main queue policy.
///
/// Two statements: the named topic may publish (conditioned on an exact
/// source-ARN match), and the owning account gets full
/// send/receive/delete/get-attributes access.
#[must_use]
pub fn build_main_queue_policy(queue_arn: &str, topic_arn: &str, account_id: &str) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "AllowTopicPublish",
                "Effect": "Allow",
                "Principal": { "Service": "sns.amazonaws.com" },
                "Action": "sqs:SendMessage",
                "Resource": queue_arn,
                "Condition": {
                    "ArnEquals": { "aws:SourceArn": topic_arn }
                },
            },
            {
                "Sid": "AccountAccess",
                "Effect": "Allow",
                "Principal": account_principal(account_id),
                "Action": ACCOUNT_QUEUE_ACTIONS,
                "Resource": queue_arn,
            }
        ]
    })
}
