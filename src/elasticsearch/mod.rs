//! Elasticsearch implementation of the search connector.
//!
//! This module provides a concrete implementation of `SearchConnector`
//! speaking the Elasticsearch REST conventions over a pluggable transport.

mod client;
mod transport;

pub use client::ElasticsearchConnector;
pub use transport::HttpTransport;
