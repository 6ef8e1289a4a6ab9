//! HTTP Client port

use std::future::Future;

use music_smoke_domain::{RequestSpec, ResponseSpec, TransportErrorKind};
use thiserror::Error;

/// Errors raised when a request cannot produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The request URL was rejected by the client.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name could not be resolved.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error text.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}: {message}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
        /// Underlying error text.
        message: String,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// No response within the request timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// Any other client failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps this error onto the domain classification.
    #[must_use]
    pub const fn kind(&self) -> TransportErrorKind {
        match self {
            Self::InvalidUrl(_) => TransportErrorKind::InvalidUrl,
            Self::DnsError { .. } => TransportErrorKind::DnsError,
            Self::ConnectionRefused { .. } => TransportErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => TransportErrorKind::ConnectionFailed,
            Self::Timeout { .. } => TransportErrorKind::Timeout,
            Self::Other(_) => TransportErrorKind::Other,
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, keeping the runner
/// independent of a specific HTTP library and testable without a network.
pub trait HttpClient: Send + Sync {
    /// Sends the request and waits for the complete response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received: network failure,
    /// timeout, or a URL the client rejects.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}
