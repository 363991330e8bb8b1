//! reqwest-backed transport implementation.

use async_trait::async_trait;
use chrono::Utc;

use super::{AwsRequest, AwsResponse, AwsTransport, Method, TransportConfig};
use crate::config::Credentials;
use crate::errors::TransportError;
use crate::signing::{percent_encode, sign, SigningInput};

/// Signed HTTP transport over a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Creates a transport with default configuration.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(TransportConfig::default())
    }

    /// Creates a transport with explicit configuration.
    pub fn with_config(config: TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| TransportError::Build(err.to_string()))?;

        Ok(Self { client, config })
    }

    /// Returns the transport configuration.
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn url_for(request: &AwsRequest) -> String {
        let mut url = request.endpoint();
        if !request.query.is_empty() {
            let query = request
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

#[async_trait]
impl AwsTransport for HttpTransport {
    async fn send(
        &self,
        credentials: &Credentials,
        request: AwsRequest,
    ) -> Result<AwsResponse, TransportError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let host = request.host();

        let signature = sign(&SigningInput {
            method: request.method.as_str(),
            host: &host,
            path: &request.path,
            query: &request.query,
            headers: &request.headers,
            body: request.body.as_bytes(),
            service: request.service,
            region: &request.region,
            access_key_id: &credentials.access_key_id,
            secret_access_key: &credentials.secret_access_key,
            timestamp: Utc::now(),
        })
        .map_err(|err| TransportError::Build(err.to_string()))?;

        let url = Self::url_for(&request);
        tracing::debug!(
            service = request.service,
            action = request.action,
            %request_id,
            "sending control-plane request"
        );

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        builder = builder
            .header("x-amz-date", &signature.amz_date)
            .header("authorization", &signature.authorization);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                TransportError::Timeout(self.config.timeout_seconds)
            } else {
                TransportError::Network(err.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        tracing::debug!(
            service = request.service,
            action = request.action,
            %request_id,
            status,
            "control-plane response"
        );

        Ok(AwsResponse { status, body })
    }
}
