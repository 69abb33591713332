//! # Search Pool
//!
//! This crate provides a minimal client for Elasticsearch-compatible search
//! backends: named connections held in a registry, single-shot search,
//! scroll-based pagination, and the save/update/delete-by-query write
//! operations, all over a pluggable HTTP transport.
//!
//! Response envelopes decode only their outer structure; hit documents and
//! aggregations stay as raw JSON fragments that callers bind to their own
//! shapes with [`types::bind`].
//!
//! ## Example
//!
//! ```ignore
//! use search_pool::ConnectorRegistry;
//!
//! let mut registry = ConnectorRegistry::new();
//! registry.register("primary", "http://localhost:9200", "elastic", "secret")?;
//!
//! let primary = registry.lookup("primary").expect("registered at startup");
//! let pages = primary
//!     .scroll_search("articles", "1m", r#"{"query": {"match_all": {}}}"#)
//!     .await?;
//! ```

pub mod config;
pub mod elasticsearch;
pub mod errors;
pub mod interfaces;
pub mod registry;
pub mod time;
pub mod types;

pub use config::ConnectorConfig;
pub use elasticsearch::{ElasticsearchConnector, HttpTransport};
pub use errors::ClientError;
pub use interfaces::{Method, SearchConnector, Transport, TransportRequest, TransportResponse};
pub use registry::ConnectorRegistry;
pub use types::{bind, AggregationBucket, SearchHits, SearchResult};
