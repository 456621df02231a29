//! Version-visibility modes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::VersionName;

/// Which versions of linked children a resolution returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMode {
    /// Every linked version, as stored
    Unfiltered,
    /// Only the named version of each linked child
    ContextualVersion(VersionName),
}

impl VersionMode {
    /// Contextual mode for `name`.
    pub fn contextual(name: VersionName) -> Self {
        VersionMode::ContextualVersion(name)
    }

    /// Returns true for `Unfiltered`.
    pub fn is_unfiltered(&self) -> bool {
        matches!(self, VersionMode::Unfiltered)
    }
}

impl fmt::Display for VersionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionMode::Unfiltered => write!(f, "unfiltered"),
            VersionMode::ContextualVersion(name) => write!(f, "contextual({})", name),
        }
    }
}

/// What a contextual resolution returns for a child lacking the named version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextFallback {
    /// The version with the highest priority (first stored wins ties)
    #[default]
    HighestPriority,
    /// The default (empty-named) version, if stored
    DefaultVersion,
    /// Nothing
    Exclude,
}

impl ContextFallback {
    /// Configuration name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextFallback::HighestPriority => "highest_priority",
            ContextFallback::DefaultVersion => "default_version",
            ContextFallback::Exclude => "exclude",
        }
    }
}
