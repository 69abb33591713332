//! Search connector trait definition.
//!
//! This module defines the abstract interface for a configured backend
//! connection, allowing for different implementations (Elasticsearch, mocks).

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::types::SearchResult;

/// Abstracts one configured connection to a search backend.
///
/// Implementations are immutable after construction and safe to share across
/// tasks; every operation is a single request/response exchange with no retry
/// or connection state. The registry stores connectors as
/// `Arc<dyn SearchConnector>` so callers hold cheap cloneable handles.
///
/// All methods return `Result<T, ClientError>` for consistent error handling
/// across implementations.
#[async_trait]
pub trait SearchConnector: Send + Sync {
    /// Execute a single search request against an index.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name, interpolated into the request path
    /// * `query` - The query body, forwarded verbatim
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResult)` - The decoded response envelope
    /// * `Err(ClientError)` - If the transport fails, the envelope does not
    ///   decode, or the backend reports an error
    async fn search(&self, index: &str, query: &str) -> Result<SearchResult, ClientError>;

    /// Execute a scrolling search, following the backend's cursor until it
    /// reports an empty page.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `scroll_ttl` - Cursor keep-alive window (e.g. "1m"), sent on the
    ///   initial request and every follow-up
    /// * `query` - The query body for the initial request
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SearchResult>)` - All pages in fetch order
    /// * `Err(ClientError)` - If any page fails; pages accumulated before the
    ///   failure are discarded
    async fn scroll_search(
        &self,
        index: &str,
        scroll_ttl: &str,
        query: &str,
    ) -> Result<Vec<SearchResult>, ClientError>;

    /// Create or fully replace a document.
    ///
    /// An empty `id` asks the backend to generate one; the generated id is
    /// not reported back.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `id` - The document id, or empty for backend-assigned
    /// * `document` - The document body, forwarded verbatim
    async fn save(&self, index: &str, id: &str, document: &str) -> Result<(), ClientError>;

    /// Partially update an existing document.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `id` - The document id
    /// * `update` - The update body (e.g. a `doc` or `script` payload),
    ///   forwarded verbatim
    async fn update(&self, index: &str, id: &str, update: &str) -> Result<(), ClientError>;

    /// Delete every document in an index matching a query.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `query` - The query body selecting documents to delete
    async fn delete_by_query(&self, index: &str, query: &str) -> Result<(), ClientError>;
}
