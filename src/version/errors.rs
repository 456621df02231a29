//! Version error types

use thiserror::Error;

/// Result type for version operations
pub type VersionResult<T> = Result<T, VersionError>;

/// Version name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The name contains the reserved composite key separator
    #[error("Version name '{0}' contains the reserved separator '::'")]
    ReservedSeparator(String),

    /// The name contains a control character
    #[error("Version name {0:?} contains a control character")]
    ControlCharacter(String),
}

impl VersionError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            VersionError::ReservedSeparator(_) => "VSEL_VERSION_RESERVED_SEPARATOR",
            VersionError::ControlCharacter(_) => "VSEL_VERSION_CONTROL_CHARACTER",
        }
    }
}
