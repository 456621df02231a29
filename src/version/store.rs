//! Versioned entities and the read-only version store

use crate::key::{CompositeKey, EntityId};

use super::{VersionName, VersionPriority};

/// Any record that belongs to a version family.
///
/// Implementors expose a stable numeric identity and the version the
/// in-memory value represents. `version_name` returns `None` for values that
/// were never assigned a version.
pub trait Versioned {
    /// Stable numeric identity shared by the whole version family.
    fn entity_id(&self) -> EntityId;

    /// Version this value represents, if one was ever assigned.
    fn version_name(&self) -> Option<&VersionName>;

    /// Priority of this version inside its family.
    fn version_priority(&self) -> VersionPriority {
        VersionPriority::lowest()
    }
}

/// Stateless accessors over `Versioned` values.
pub struct VersionStore;

impl VersionStore {
    /// Returns the version name attached to `entity`.
    ///
    /// Entities without an assigned version report the default (empty) name.
    pub fn current_version_name<E: Versioned + ?Sized>(entity: &E) -> VersionName {
        entity
            .version_name()
            .cloned()
            .unwrap_or_else(VersionName::default_version)
    }

    /// Derives the composite key of `entity` from its own identity and version.
    pub fn composite_key<E: Versioned + ?Sized>(entity: &E) -> CompositeKey {
        CompositeKey::new(entity.entity_id(), Self::current_version_name(entity))
    }
}
