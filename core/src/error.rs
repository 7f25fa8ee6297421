//! Error types for the inventory API client.
//!
//! # Design
//! A failed call surfaces one of three shapes. Requests that could not be
//! built never leave the client. A server that answered with a non-2xx status
//! yields only its decoded body; status and headers are dropped once the
//! response interceptors have seen them. A transport that produced no
//! response at all yields its own error value untouched.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `ApiClient` and the `InventoryApi` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request could not be built, or a request interceptor rejected it.
    #[error("invalid request: {0}")]
    Request(String),

    /// The server answered with a non-2xx status. Holds the response body
    /// only: JSON as decoded, other text as a JSON string, empty as `null`.
    #[error("server rejected request: {0}")]
    Server(Value),

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 2xx body did not match the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),
}

/// What went wrong below HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Io,
    Other,
}

/// A failure raised by a `Transport` before any response arrived.
///
/// The underlying library error, when there is one, is kept as the
/// `source()`. Equality looks at `kind` and `message` only.
#[derive(Debug, Clone)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Same as `new`, keeping `source` in the error chain.
    pub fn with_source(
        kind: TransportErrorKind,
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error ({:?}): {}", self.kind, self.message)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}

impl PartialEq for TransportError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl Eq for TransportError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_error_displays_body() {
        let err = ApiError::Server(json!({"error": "not found"}));
        assert_eq!(
            err.to_string(),
            r#"server rejected request: {"error":"not found"}"#
        );
    }

    #[test]
    fn transport_error_converts_unchanged() {
        let original = TransportError::new(TransportErrorKind::Connect, "connection refused");
        let err: ApiError = original.clone().into();
        assert_eq!(err, ApiError::Transport(original));
    }

    #[test]
    fn transport_error_keeps_its_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::with_source(TransportErrorKind::Connect, "refused", io);
        let source = err.source().expect("source kept");
        assert_eq!(source.to_string(), "refused");

        let copy = err.clone();
        assert!(copy.source().is_some());
        assert_eq!(copy, TransportError::new(TransportErrorKind::Connect, "refused"));
        assert_eq!(err.to_string(), "transport error (Connect): refused");
    }

    #[test]
    fn api_error_exposes_transport_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "too slow");
        let err: ApiError =
            TransportError::with_source(TransportErrorKind::Timeout, "too slow", io).into();
        // `Transport` is transparent, so its source is the I/O error itself.
        let source = err.source().map(ToString::to_string);
        assert_eq!(source, Some("too slow".to_string()));
    }
}
