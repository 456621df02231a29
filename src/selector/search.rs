//! Search term matching

use serde::{Deserialize, Serialize};

/// How a term is compared against a searchable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Term appears anywhere in the value
    #[default]
    Substring,
    /// Value starts with the term
    Prefix,
}

/// A normalized, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    folded: String,
}

impl SearchTerm {
    /// Normalizes raw input. Blank input means "no term".
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            folded: trimmed.to_lowercase(),
        })
    }

    /// Case-insensitive comparison against `value`.
    pub fn matches(&self, value: &str, mode: MatchMode) -> bool {
        let value = value.to_lowercase();
        match mode {
            MatchMode::Substring => value.contains(&self.folded),
            MatchMode::Prefix => value.starts_with(&self.folded),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }
}
