//! Transport trait definition.
//!
//! This module defines the abstract HTTP layer the connector sends its
//! requests through, allowing tests to script responses and callers to bring
//! a pre-configured HTTP client.

use std::fmt;

use async_trait::async_trait;

use crate::errors::ClientError;

/// HTTP method of a transport request.
///
/// Search and scroll requests are GETs carrying a JSON body, which the
/// backend accepts; every write operation is a POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// The method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request handed to the transport.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully formed target URL.
    pub url: String,
    /// Header name/value pairs to attach.
    pub headers: Vec<(String, String)>,
    /// Request payload. JSON text for every operation in this crate.
    pub body: String,
}

impl TransportRequest {
    /// Create a request with no headers and an empty body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Attach a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request payload.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A raw response returned by the transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

/// Abstracts the HTTP client used to reach the search backend.
///
/// Implementations are injected into the connector to enable dependency
/// injection and easy testing with scripted responses. They must be
/// `Send + Sync` so a single connector can serve concurrent callers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response.
    ///
    /// # Arguments
    ///
    /// * `request` - The method, URL, headers, and body to send
    ///
    /// # Returns
    ///
    /// * `Ok(TransportResponse)` - The status code and body bytes, whatever
    ///   the status value; interpreting the body is the caller's concern
    /// * `Err(ClientError::TransportError)` - If the request could not complete
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }

    #[test]
    fn test_request_builder() {
        let request = TransportRequest::new(Method::Post, "http://localhost:9200/articles/_doc/1")
            .with_header("content-type", "application/json")
            .with_body(r#"{"title": "hello"}"#);

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://localhost:9200/articles/_doc/1");
        assert_eq!(
            request.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(request.body, r#"{"title": "hello"}"#);
    }
}
