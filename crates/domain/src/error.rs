//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building or resolving test cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The base URL or a resolved request URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A test case path is not an absolute path.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
