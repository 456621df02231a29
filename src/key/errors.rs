//! Codec error types

use thiserror::Error;

use crate::version::VersionError;

/// Why a token failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// No separator present
    #[error("missing separator")]
    MissingSeparator,

    /// More than one separator present
    #[error("ambiguous separator")]
    AmbiguousSeparator,

    /// Identity segment is not a canonical unsigned integer
    #[error("identity segment {0:?} is not a canonical unsigned integer")]
    InvalidIdentity(String),

    /// Version segment is not a valid version name
    #[error("invalid version segment: {0}")]
    InvalidVersion(#[from] VersionError),

    /// A length prefix is missing, non-canonical, or does not match its segment
    #[error("length prefix does not match segment")]
    LengthMismatch,

    /// Bytes remain after the last segment
    #[error("trailing data after version segment")]
    TrailingData,
}

/// A token that does not satisfy the codec's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed composite key token {token:?}: {reason}")]
pub struct MalformedTokenError {
    token: String,
    reason: MalformedReason,
}

impl MalformedTokenError {
    /// Creates an error for `token`.
    pub fn new(token: impl Into<String>, reason: MalformedReason) -> Self {
        Self {
            token: token.into(),
            reason,
        }
    }

    /// Returns the rejected token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the rejection reason.
    pub fn reason(&self) -> &MalformedReason {
        &self.reason
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        "VSEL_MALFORMED_TOKEN"
    }
}
