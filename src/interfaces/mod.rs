//! Interface definitions for the search connector and its transport.
//!
//! This module defines the abstract `SearchConnector` trait that allows for
//! dependency injection and swappable backend implementations, and the
//! `Transport` trait the concrete connector sends its requests through.

mod connector;
mod transport;

pub use connector::SearchConnector;
pub use transport::{Method, Transport, TransportRequest, TransportResponse};
