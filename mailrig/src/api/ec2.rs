//! Region discovery via EC2 `DescribeRegions`.

use std::sync::Arc;

use regex::Regex;

use super::{error_for_status, form_body};
use crate::config::Credentials;
use crate::errors::ApiError;
use crate::transport::{AwsRequest, AwsTransport};

const API_VERSION: &str = "2016-11-15";

/// Client for the compute service, used only to list regions.
#[derive(Clone)]
pub struct Ec2Client {
    transport: Arc<dyn AwsTransport>,
}

impl Ec2Client {
    /// Creates a client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn AwsTransport>) -> Self {
        Self { transport }
    }

    /// Lists the region codes visible to the credentials.
    pub async fn describe_regions(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<String>, ApiError> {
        let request = AwsRequest::new("ec2", "DescribeRegions")
            .with_region(&credentials.region)
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_body(form_body(&[
                ("Action", "DescribeRegions"),
                ("Version", API_VERSION),
            ]));

        let response = self.transport.send(credentials, request).await?;
        if !response.is_success() {
            return Err(error_for_status("ec2", &response));
        }

        let regions = parse_region_names(&response.body)?;
        if regions.is_empty() {
            return Err(ApiError::Response(format!(
                "no region names found in: {}",
                response.body
            )));
        }
        Ok(regions)
    }
}

/// Extracts region names from a `DescribeRegions` response.
///
/// EC2 answers the Query protocol in XML only; this single read-only call
/// does not warrant an XML dependency, so the names are pattern-matched.
fn parse_region_names(body: &str) -> Result<Vec<String>, ApiError> {
    let pattern = Regex::new(r"<regionName>([a-z0-9-]+)</regionName>")
        .map_err(|err| ApiError::Response(err.to_string()))?;

    Ok(pattern
        .captures_iter(body)
        .map(|capture| capture[1].to_string())
        .collect())
}
