//! Relation resolution error types

use thiserror::Error;

use crate::key::{CompositeKey, EntityId};
use crate::repository::RepositoryError;

/// Result type for relation resolution
pub type RelationResult<T> = Result<T, RelationResolutionError>;

/// The persistence layer failed or returned inconsistent data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationResolutionError {
    /// Relation is not declared on the resolver
    #[error("Relation '{relation}' is not declared for resource '{resource}'")]
    UnknownRelation {
        resource: &'static str,
        relation: String,
    },

    /// The repository call failed
    #[error("Resolving relation '{relation}' failed: {source}")]
    Repository {
        relation: String,
        #[source]
        source: RepositoryError,
    },

    /// A linked child identity has no stored rows at all
    #[error("Relation '{relation}' links child {child} which has no stored versions")]
    DanglingLink { relation: String, child: EntityId },

    /// The repository returned a row that was not requested
    #[error("Relation '{relation}' returned unrequested child {child}")]
    UnrequestedRow { relation: String, child: EntityId },

    /// The repository returned two rows with the same composite key
    #[error("Relation '{relation}' returned duplicate row {}::{}", .key.id(), .key.version())]
    DuplicateRow { relation: String, key: CompositeKey },
}

impl RelationResolutionError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RelationResolutionError::UnknownRelation { .. } => "VSEL_UNKNOWN_RELATION",
            RelationResolutionError::Repository { .. } => "VSEL_RELATION_RESOLUTION",
            RelationResolutionError::DanglingLink { .. }
            | RelationResolutionError::UnrequestedRow { .. }
            | RelationResolutionError::DuplicateRow { .. } => "VSEL_RELATION_INCONSISTENT",
        }
    }

    /// Returns true when the store returned data that contradicts itself
    pub fn is_inconsistent(&self) -> bool {
        matches!(
            self,
            RelationResolutionError::DanglingLink { .. }
                | RelationResolutionError::UnrequestedRow { .. }
                | RelationResolutionError::DuplicateRow { .. }
        )
    }

    pub(crate) fn repository(relation: &str, source: RepositoryError) -> Self {
        RelationResolutionError::Repository {
            relation: relation.to_string(),
            source,
        }
    }
}
