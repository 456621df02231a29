//! VersionPriority - Ordering among versions of one family
//!
//! When a browsing context names a version that a family does not have, the
//! resolver may fall back to the family member with the highest priority.
//! Priority is the moment the version became (or is scheduled to become)
//! current.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Totally ordered version priority.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionPriority(DateTime<Utc>);

impl VersionPriority {
    /// Creates a priority from a timestamp.
    #[inline]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Lowest possible priority (the Unix epoch).
    pub fn lowest() -> Self {
        Self(DateTime::<Utc>::default())
    }

    /// Returns the underlying timestamp.
    #[inline]
    pub fn at(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for VersionPriority {
    fn default() -> Self {
        Self::lowest()
    }
}
