//! Application error types

use thiserror::Error;

/// Application-level errors.
///
/// Test failures are never errors here: they are recorded as outcomes. Only
/// problems that stop the run itself surface through this type.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Writing the report failed.
    #[error("report output failed: {0}")]
    Report(#[from] std::io::Error),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
