//! Search client error types.
//!
//! This module defines the error types that can occur during search backend operations.

use thiserror::Error;

/// Errors that can occur during search backend operations.
///
/// The variants separate failures of the transport itself, failures to decode
/// a response envelope, and failures the backend reported inside a well-formed
/// envelope.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Network or connection failure before a response could be read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Response body did not decode into the expected envelope shape.
    #[error("Decode error: {reason}")]
    DecodeError {
        /// What failed to decode.
        reason: String,
        /// The raw response body, kept for diagnostics.
        body: String,
    },

    /// Well-formed envelope whose `error` field was populated by the backend.
    #[error("Backend error: {body}")]
    BackendError { body: String },

    /// Scroll pagination accumulated more pages than the configured bound.
    #[error("Scroll accumulated {limit} pages without exhausting")]
    ScrollLimitExceeded { limit: usize },
}

impl ClientError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a decode error carrying the offending body.
    pub fn decode(reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self::DecodeError {
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Create a backend error from the raw response body.
    pub fn backend(body: impl Into<String>) -> Self {
        Self::BackendError { body: body.into() }
    }
}
