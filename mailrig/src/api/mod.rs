//! Narrow per-service clients over the signed transport.
//!
//! Each client models only the operations the pipeline and the credential
//! probes need, returns tagged results, and leaves outcome classification
//! to its callers.

pub mod ec2;
pub mod ses;
pub mod sns;
pub mod sqs;
pub mod sts;

use crate::errors::ApiError;
use crate::transport::AwsResponse;

/// Builds the `ApiError` for a non-success response.
pub(crate) fn error_for_status(service: &'static str, response: &AwsResponse) -> ApiError {
    ApiError::Status {
        service,
        status: response.status,
        body: response.body.clone(),
    }
}

/// Form-encodes Query-protocol parameters.
pub(crate) fn form_body(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", crate::signing::percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Looks up `field` either at the top level of a response value or nested
/// under the `{Operation}Response.{Operation}Result` envelope the Query
/// protocol wraps JSON answers in. Both shapes occur in the wild.
pub(crate) fn envelope_field<'a>(
    value: &'a serde_json::Value,
    operation: &str,
    field: &str,
) -> Option<&'a serde_json::Value> {
    if let Some(found) = value.get(field) {
        return Some(found);
    }
    value
        .get(format!("{operation}Response").as_str())?
        .get(format!("{operation}Result").as_str())?
        .get(field)
}
