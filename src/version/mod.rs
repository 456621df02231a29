//! Version Store
//!
//! Answers one question for any versionable entity: which named version does
//! this in-memory instance represent?
//!
//! This module provides:
//! - `VersionName` - Validated version label (empty = default version)
//! - `VersionPriority` - Ordering used when a context has no exact match
//! - `Versioned` - Trait implemented by every versionable entity
//! - `VersionStore` - Read-only accessors over `Versioned` values
//!
//! Version assignment belongs to the persistence layer. Nothing here mutates.

mod errors;
mod name;
mod priority;
mod store;

pub use errors::{VersionError, VersionResult};
pub use name::{VersionName, RESERVED_SEPARATOR};
pub use priority::VersionPriority;
pub use store::{VersionStore, Versioned};
