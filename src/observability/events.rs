//! Observable events
//!
//! Events are explicit and typed. Each maps to one stable upper-case name.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,
    /// Demo catalog fixture loaded
    CatalogLoaded,

    // Relation resolution
    /// Linked rows resolved for a parent
    RelationResolved,
    /// Relation resolution failed
    RelationResolutionFailed,

    // Selection
    /// Current selections produced for a parent
    SelectionsResolved,
    /// Candidate list produced by a selector
    CandidatesListed,
    /// Selector search failed
    SearchFailed,
    /// A composite key token failed to decode
    TokenRejected,

    // Server
    /// HTTP server starting
    ServerStart,
    /// HTTP server ready
    Serving,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogLoaded => "CATALOG_LOADED",

            Event::RelationResolved => "RELATION_RESOLVED",
            Event::RelationResolutionFailed => "RELATION_RESOLUTION_FAILED",

            Event::SelectionsResolved => "SELECTIONS_RESOLVED",
            Event::CandidatesListed => "CANDIDATES_LISTED",
            Event::SearchFailed => "SEARCH_FAILED",
            Event::TokenRejected => "TOKEN_REJECTED",

            Event::ServerStart => "SERVER_START",
            Event::Serving => "VERSELECT_SERVING",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::RelationResolutionFailed | Event::SearchFailed | Event::TokenRejected
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
