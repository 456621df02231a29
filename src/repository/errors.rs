//! Repository error types

use thiserror::Error;

use crate::key::CompositeKey;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures raised by the persistence boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Store could not serve the request
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    /// Store did not answer in time
    #[error("Repository timed out")]
    Timeout,

    /// Caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// Caller deadline passed
    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    /// Relation is not declared on this store
    #[error("Unknown relation: {0}")]
    UnknownRelation(String),

    /// A row with this composite key already exists
    #[error("Duplicate row {}::{}", .0.id(), .0.version())]
    DuplicateRow(CompositeKey),
}

impl RepositoryError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RepositoryError::Unavailable(_) => "VSEL_REPOSITORY_UNAVAILABLE",
            RepositoryError::Timeout => "VSEL_REPOSITORY_TIMEOUT",
            RepositoryError::Cancelled => "VSEL_REQUEST_CANCELLED",
            RepositoryError::DeadlineExceeded => "VSEL_DEADLINE_EXCEEDED",
            RepositoryError::UnknownRelation(_) => "VSEL_UNKNOWN_RELATION",
            RepositoryError::DuplicateRow(_) => "VSEL_DUPLICATE_ROW",
        }
    }

    /// Returns true for time-bound failures
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            RepositoryError::Timeout | RepositoryError::DeadlineExceeded
        )
    }
}
