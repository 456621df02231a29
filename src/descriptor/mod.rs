//! Typed field and relation descriptors
//!
//! Admin frameworks commonly configure resources through string-keyed,
//! runtime-reflected value callbacks. Here every field is a static table
//! entry pairing a name with a typed accessor, so a misspelled accessor is a
//! compile error and a misspelled field name is caught once, when a
//! selector is built.

mod errors;
mod field;

pub use errors::{DescriptorError, DescriptorResult};
pub use field::{FieldAccessor, FieldDescriptor, FieldTable, COMPOSITE_KEY_FIELD};

use crate::version::Versioned;

/// A versionable record type exposed to selectors.
pub trait Entity: Versioned + Clone + Send + Sync + 'static {
    /// Resource name used in logs and errors
    const RESOURCE: &'static str;

    /// Static field table for this entity type
    fn fields() -> &'static FieldTable<Self>;
}

/// A declared many-to-many relation from a parent resource to a child resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDescriptor {
    /// Relation name on the parent (e.g. "items")
    pub name: &'static str,
    /// Resource name of the child side
    pub child: &'static str,
}

impl RelationDescriptor {
    /// Declares a many-to-many relation.
    pub const fn many_to_many(name: &'static str, child: &'static str) -> Self {
        Self { name, child }
    }
}
