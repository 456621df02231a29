//! Descriptor error types

use thiserror::Error;

/// Result type for descriptor lookups
pub type DescriptorResult<T> = Result<T, DescriptorError>;

/// Descriptor configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Field is not in the resource's field table
    #[error("Resource '{resource}' has no field '{field}'")]
    UnknownField {
        resource: &'static str,
        field: String,
    },

    /// More than one scope claims to be the default
    #[error("Resource '{resource}' declares more than one default scope")]
    MultipleDefaultScopes { resource: &'static str },

    /// Two scopes share a name
    #[error("Resource '{resource}' declares scope '{scope}' twice")]
    DuplicateScope {
        resource: &'static str,
        scope: String,
    },

    /// No searchable attribute configured
    #[error("Resource '{resource}' has no search attributes")]
    NoSearchAttributes { resource: &'static str },
}

impl DescriptorError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DescriptorError::UnknownField { .. } => "VSEL_UNKNOWN_FIELD",
            DescriptorError::MultipleDefaultScopes { .. } => "VSEL_MULTIPLE_DEFAULT_SCOPES",
            DescriptorError::DuplicateScope { .. } => "VSEL_DUPLICATE_SCOPE",
            DescriptorError::NoSearchAttributes { .. } => "VSEL_NO_SEARCH_ATTRIBUTES",
        }
    }
}
