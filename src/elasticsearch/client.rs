//! Elasticsearch connector implementation.
//!
//! This module provides the concrete implementation of `SearchConnector`
//! speaking the Elasticsearch REST conventions: request formatting, basic
//! authentication, envelope decoding, and the scroll pagination driver.

use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;
use serde_json::value::RawValue;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::ConnectorConfig;
use crate::elasticsearch::transport::HttpTransport;
use crate::errors::ClientError;
use crate::interfaces::{Method, SearchConnector, Transport, TransportRequest, TransportResponse};
use crate::types::SearchResult;

/// Default backend URL when `ELASTICSEARCH_URL` is not set.
const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";

/// Acknowledgement envelope for write operations. Only the `error` field
/// matters; everything else the backend sends is ignored.
#[derive(Debug, Deserialize)]
struct WriteAck {
    error: Option<Box<RawValue>>,
}

/// Elasticsearch connector implementation.
///
/// A configured connection to one Elasticsearch-compatible backend. The
/// connector is immutable after construction: endpoint, credentials, and
/// configuration are fixed, and every operation is an independent request
/// through the injected [`Transport`]. Share it across tasks with `Arc`.
///
/// # Example
///
/// ```ignore
/// let connector = ElasticsearchConnector::new("http://localhost:9200", "elastic", "secret")?;
///
/// let page = connector
///     .search("articles", r#"{"query": {"match_all": {}}}"#)
///     .await?;
/// ```
pub struct ElasticsearchConnector {
    endpoint: String,
    username: String,
    password: String,
    config: ConnectorConfig,
    transport: Arc<dyn Transport>,
}

impl ElasticsearchConnector {
    /// Create a connector for the given endpoint and basic-auth credentials.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The backend base URL (e.g., "http://localhost:9200");
    ///   a trailing slash is trimmed
    /// * `username` - Basic-auth user, sent on every request
    /// * `password` - Basic-auth password
    ///
    /// # Returns
    ///
    /// * `Ok(ElasticsearchConnector)` - A connector with the default HTTP
    ///   transport and default configuration
    /// * `Err(ClientError::TransportError)` - If the endpoint is not a valid URL
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint).map_err(|e| ClientError::transport(e.to_string()))?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(endpoint = %endpoint, "Created Elasticsearch connector");

        Ok(Self {
            endpoint,
            username: username.into(),
            password: password.into(),
            config: ConnectorConfig::default(),
            transport: Arc::new(HttpTransport::new()),
        })
    }

    /// Create a connector from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ELASTICSEARCH_URL`: backend URL (default: http://localhost:9200)
    /// - `ELASTICSEARCH_USERNAME`: basic-auth user (default: empty)
    /// - `ELASTICSEARCH_PASSWORD`: basic-auth password (default: empty)
    pub fn from_env() -> Result<Self, ClientError> {
        let endpoint =
            env::var("ELASTICSEARCH_URL").unwrap_or_else(|_| DEFAULT_ELASTICSEARCH_URL.to_string());
        let username = env::var("ELASTICSEARCH_USERNAME").unwrap_or_default();
        let password = env::var("ELASTICSEARCH_PASSWORD").unwrap_or_default();

        Self::new(endpoint, username, password)
    }

    /// Replace the connector configuration.
    pub fn with_config(mut self, config: ConnectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the transport (custom HTTP client, scripted responses).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// The configured endpoint, trailing slash trimmed.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The configured basic-auth username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Headers attached to every request: JSON content type plus basic auth.
    fn request_headers(&self) -> Vec<(String, String)> {
        let credentials = STANDARD.encode(format!("{}:{}", self.username, self.password));
        vec![
            ("content-type".to_string(), "application/json".to_string()),
            (
                "authorization".to_string(),
                format!("Basic {}", credentials),
            ),
        ]
    }

    fn search_url(&self, index: &str) -> String {
        format!("{}/{}/_search", self.endpoint, index)
    }

    fn scroll_search_url(&self, index: &str, scroll_ttl: &str) -> String {
        format!("{}/{}/_search?scroll={}", self.endpoint, index, scroll_ttl)
    }

    fn scroll_url(&self) -> String {
        format!("{}/_search/scroll", self.endpoint)
    }

    fn doc_url(&self, index: &str, id: &str) -> String {
        format!("{}/{}/_doc/{}", self.endpoint, index, id)
    }

    fn update_url(&self, index: &str, id: &str) -> String {
        format!("{}/{}/_doc/{}/_update", self.endpoint, index, id)
    }

    fn delete_by_query_url(&self, index: &str) -> String {
        format!("{}/{}/_delete_by_query", self.endpoint, index)
    }

    /// Send one request through the transport.
    async fn dispatch(
        &self,
        method: Method,
        url: String,
        body: &str,
    ) -> Result<TransportResponse, ClientError> {
        debug!(method = %method, url = %url, payload = %body, "Dispatching request");

        let mut request = TransportRequest::new(method, url).with_body(body);
        for (name, value) in self.request_headers() {
            request = request.with_header(name, value);
        }

        self.transport.send(request).await
    }

    /// Run one search-shaped request: dispatch, decode the envelope, and
    /// reject envelopes carrying a backend error.
    async fn fetch_page(
        &self,
        method: Method,
        url: String,
        body: &str,
    ) -> Result<SearchResult, ClientError> {
        let response = self.dispatch(method, url, body).await?;

        let result: SearchResult = serde_json::from_slice(&response.body).map_err(|e| {
            let raw = String::from_utf8_lossy(&response.body);
            error!(error = %e, body = %raw, "Failed to decode search envelope");
            ClientError::decode(e.to_string(), raw)
        })?;

        if result.error.is_some() {
            let raw = String::from_utf8_lossy(&response.body);
            error!(body = %raw, "Backend reported an error");
            return Err(ClientError::backend(raw));
        }

        Ok(result)
    }

    /// Shared write path: dispatch a POST, decode the acknowledgement, and
    /// reject acknowledgements carrying a backend error.
    async fn execute_write(&self, url: String, body: &str) -> Result<(), ClientError> {
        let response = self.dispatch(Method::Post, url, body).await?;

        let ack: WriteAck = serde_json::from_slice(&response.body).map_err(|e| {
            let raw = String::from_utf8_lossy(&response.body);
            error!(error = %e, body = %raw, "Failed to decode write acknowledgement");
            ClientError::decode(e.to_string(), raw)
        })?;

        if ack.error.is_some() {
            let raw = String::from_utf8_lossy(&response.body);
            error!(body = %raw, "Backend rejected write");
            return Err(ClientError::backend(raw));
        }

        Ok(())
    }

    /// The cursor of the most recent page, required while a scroll is live.
    fn require_cursor(page: &SearchResult) -> Result<String, ClientError> {
        page.scroll_cursor()
            .map(str::to_string)
            .ok_or_else(|| ClientError::decode("scroll page is missing _scroll_id", ""))
    }

    /// Whether a follow-up page's hit list is the empty-list literal, the
    /// backend's exhaustion signal.
    fn page_is_exhausted(page: &SearchResult) -> Result<bool, ClientError> {
        let raw = page
            .hits
            .as_ref()
            .and_then(|hits| hits.hits.as_deref())
            .ok_or_else(|| ClientError::decode("scroll page is missing hits", ""))?;

        Ok(raw.get() == "[]")
    }
}

#[async_trait]
impl SearchConnector for ElasticsearchConnector {
    async fn search(&self, index: &str, query: &str) -> Result<SearchResult, ClientError> {
        self.fetch_page(Method::Get, self.search_url(index), query)
            .await
    }

    /// Execute a scrolling search, following the backend's cursor until it
    /// reports an empty page.
    ///
    /// The initial request opens the scroll with the given keep-alive window;
    /// each follow-up forwards the most recent page's cursor. The initial
    /// page is always kept, follow-up pages are kept until the backend sends
    /// an empty hit list. A configured `max_scroll_pages` bound fails the
    /// whole scroll rather than silently truncating it.
    #[instrument(skip(self, query))]
    async fn scroll_search(
        &self,
        index: &str,
        scroll_ttl: &str,
        query: &str,
    ) -> Result<Vec<SearchResult>, ClientError> {
        let first = self
            .fetch_page(Method::Get, self.scroll_search_url(index, scroll_ttl), query)
            .await?;

        let mut cursor = Self::require_cursor(&first)?;
        let mut pages = vec![first];

        loop {
            let body = json!({"scroll": scroll_ttl, "scroll_id": cursor}).to_string();
            let page = self.fetch_page(Method::Get, self.scroll_url(), &body).await?;

            if Self::page_is_exhausted(&page)? {
                break;
            }

            if let Some(limit) = self.config.max_scroll_pages {
                if pages.len() >= limit {
                    error!(limit = limit, "Scroll did not exhaust within the page bound");
                    return Err(ClientError::ScrollLimitExceeded { limit });
                }
            }

            cursor = Self::require_cursor(&page)?;
            pages.push(page);
        }

        debug!(pages = pages.len(), "Scroll exhausted");
        Ok(pages)
    }

    async fn save(&self, index: &str, id: &str, document: &str) -> Result<(), ClientError> {
        // An empty id leaves the path ending in `_doc/`; the backend then
        // generates an id, which is not reported back.
        self.execute_write(self.doc_url(index, id), document).await
    }

    async fn update(&self, index: &str, id: &str, update: &str) -> Result<(), ClientError> {
        self.execute_write(self.update_url(index, id), update).await
    }

    async fn delete_by_query(&self, index: &str, query: &str) -> Result<(), ClientError> {
        self.execute_write(self.delete_by_query_url(index), query)
            .await
    }
}
