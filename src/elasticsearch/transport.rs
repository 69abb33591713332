//! HTTP transport backed by reqwest.
//!
//! This is the production [`Transport`]: it forwards a request as-is and
//! hands back the status and body bytes without interpreting either.

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::ClientError;
use crate::interfaces::{Method, Transport, TransportRequest, TransportResponse};

/// Transport implementation over a shared `reqwest::Client`.
///
/// The default client applies no request timeout; use
/// [`HttpTransport::with_client`] to supply a pre-configured client when one
/// is needed.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a default HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a transport around a caller-configured HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ClientError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))?
            .to_vec();

        Ok(TransportResponse { status, body })
    }
}
