//! Selector error types

use thiserror::Error;

use crate::repository::RepositoryError;

/// Result type for selector searches
pub type SearchResult<T> = Result<T, SearchError>;

/// Failures while evaluating a scope/search query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Requested scope is not declared
    #[error("Selector '{resource}' has no scope '{scope}'")]
    UnknownScope { resource: String, scope: String },

    /// The repository call failed
    #[error("Search on selector '{resource}' failed: {source}")]
    Repository {
        resource: String,
        #[source]
        source: RepositoryError,
    },
}

impl SearchError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::UnknownScope { .. } => "VSEL_UNKNOWN_SCOPE",
            SearchError::Repository { .. } => "VSEL_SEARCH",
        }
    }
}
