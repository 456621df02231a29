//! Binding error types

use thiserror::Error;

use crate::key::MalformedTokenError;
use crate::relation::RelationResolutionError;
use crate::selector::SearchError;

/// Result type for binding operations
pub type BindingResult<T> = Result<T, BindingError>;

/// Binding failures. Each wraps the underlying Core error unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// Resolver does not declare the bound relation
    #[error("Binding relation '{0}' is not declared on its resolver")]
    UnboundRelation(String),

    /// Current selections could not be resolved
    #[error(transparent)]
    Selections(#[from] RelationResolutionError),

    /// Candidate search failed
    #[error(transparent)]
    Candidates(#[from] SearchError),

    /// A submitted token is malformed
    #[error(transparent)]
    Token(#[from] MalformedTokenError),
}

impl BindingError {
    /// Stable error code of the underlying failure
    pub fn code(&self) -> &'static str {
        match self {
            BindingError::UnboundRelation(_) => "VSEL_UNKNOWN_RELATION",
            BindingError::Selections(e) => e.code(),
            BindingError::Candidates(e) => e.code(),
            BindingError::Token(e) => e.code(),
        }
    }
}
