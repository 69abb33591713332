//! Error types for the search pool.

mod client_error;

pub use client_error::ClientError;
