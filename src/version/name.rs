//! VersionName - Validated version label
//!
//! A version name identifies one row inside a version family. The empty name
//! is the default (unversioned) version.
//!
//! Names may never contain the composite key separator. That single rule is
//! what keeps `<id>::<version>` tokens injective.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{VersionError, VersionResult};

/// Separator reserved for composite key tokens.
pub const RESERVED_SEPARATOR: &str = "::";

/// A validated version name.
///
/// Construction is the only validation point; every `VersionName` in the
/// process is known to be separator-free.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionName(String);

impl VersionName {
    /// Validates and wraps a version name.
    pub fn new(name: impl Into<String>) -> VersionResult<Self> {
        let name = name.into();

        if name.contains(RESERVED_SEPARATOR) {
            return Err(VersionError::ReservedSeparator(name));
        }
        if name.chars().any(char::is_control) {
            return Err(VersionError::ControlCharacter(name));
        }

        Ok(Self(name))
    }

    /// The default (empty) version name.
    #[inline]
    pub fn default_version() -> Self {
        Self(String::new())
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the default (empty) version.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for VersionName {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for VersionName {
    type Error = VersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionName> for String {
    fn from(name: VersionName) -> Self {
        name.0
    }
}

impl AsRef<str> for VersionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
