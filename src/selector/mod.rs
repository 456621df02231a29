//! Selector Resource
//!
//! A read-only, searchable catalog of candidate rows for a many-to-many
//! picker. Independent of any parent record.
//!
//! This module provides:
//! - `SelectorResource` - search, label and token for one entity type
//! - `Scope` / `ScopeSet` - named row predicates with an always-present default
//! - `MatchMode` / `SearchTerm` - case-insensitive term matching
//! - `SelectorCandidate` - (token, label) projection handed to the UI
//!
//! Tokens are computed from each row's own identity and own version, never
//! from the browsing context, so a row has the same token here as in the
//! association binding.

mod candidate;
mod errors;
mod resource;
mod scope;
mod search;

pub use candidate::SelectorCandidate;
pub use errors::{SearchError, SearchResult};
pub use resource::{IndexAttr, SelectorBuilder, SelectorResource};
pub use scope::{Scope, ScopeSet, DEFAULT_SCOPE};
pub use search::{MatchMode, SearchTerm};
