//! CompositeKey and its token form

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::VersionName;

use super::EntityId;

/// (identity, version name) pair uniquely identifying one row of a family.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompositeKey {
    id: EntityId,
    version: VersionName,
}

impl CompositeKey {
    /// Creates a composite key.
    pub fn new(id: EntityId, version: VersionName) -> Self {
        Self { id, version }
    }

    /// Composite key of the default (unversioned) row of a family.
    pub fn unversioned(id: EntityId) -> Self {
        Self::new(id, VersionName::default_version())
    }

    /// Returns the family identity.
    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the version name.
    #[inline]
    pub fn version(&self) -> &VersionName {
        &self.version
    }

    /// Splits the key into its parts.
    pub fn into_parts(self) -> (EntityId, VersionName) {
        (self.id, self.version)
    }
}

/// Canonical string serialization of a `CompositeKey`.
///
/// Only `KeyCodec` produces tokens. Two tokens are equal exactly when they
/// were encoded from equal keys with the same encoding.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CompositeKeyToken(String);

impl CompositeKeyToken {
    pub(super) fn from_encoded(encoded: String) -> Self {
        Self(encoded)
    }

    /// Returns the token text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompositeKeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompositeKeyToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CompositeKeyToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CompositeKeyToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
