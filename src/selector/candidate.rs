//! SelectorCandidate - presentation projection of a child row

use serde::Serialize;

use crate::key::CompositeKeyToken;

/// (token, label) pair. Produced on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorCandidate {
    /// Selectable value: the row's composite key token
    pub token: CompositeKeyToken,
    /// Human-readable label
    pub label: String,
}

impl SelectorCandidate {
    pub fn new(token: CompositeKeyToken, label: impl Into<String>) -> Self {
        Self {
            token,
            label: label.into(),
        }
    }

    /// Returns the pair as borrowed strings.
    pub fn as_pair(&self) -> (&str, &str) {
        (self.token.as_str(), &self.label)
    }
}
