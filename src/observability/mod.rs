//! Observability for verselect
//!
//! This module provides:
//! - Structured logging (one JSON object per line, stderr)
//! - Typed events for every Core outcome
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on resolution or search results
//! 3. No background threads or buffering
//! 4. Deterministic key ordering
//!
//! # Usage
//!
//! ```ignore
//! use verselect::observability::{Event, Logger};
//!
//! Logger::info(Event::CandidatesListed, &[("count", "2")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
