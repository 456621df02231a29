//! Repository - persistence accessor consumed by the Core
//!
//! The Core never talks to a database handle directly. Each component is
//! constructed with an explicit repository and passes the version mode and
//! request context as plain arguments.
//!
//! Contract:
//! - `linked_ids` - ordered child identities linked to one parent version
//! - `load_families` - every stored version of the requested identities
//! - `query` - stored rows accepted by a predicate
//!
//! `MemoryRepository` implements it in process for demos and tests.

mod errors;
mod memory;

pub use errors::{RepositoryError, RepositoryResult};
pub use memory::MemoryRepository;

use crate::context::RequestContext;
use crate::key::{CompositeKey, EntityId};

/// Read access to a child table and its join rows.
///
/// Implementations must be safe to call concurrently from many requests.
/// Every call is one synchronous boundary that can fail; the Core does not
/// retry.
pub trait ChildRepository<C>: Send + Sync {
    /// Child identities linked to `parent` through `relation`, in association order.
    ///
    /// Join rows reference child identities only. A declared relation with no
    /// rows for `parent` yields an empty list.
    fn linked_ids(
        &self,
        relation: &str,
        parent: &CompositeKey,
        ctx: &RequestContext,
    ) -> RepositoryResult<Vec<EntityId>>;

    /// Every stored version of each identity in `ids`, in stored order.
    fn load_families(&self, ids: &[EntityId], ctx: &RequestContext) -> RepositoryResult<Vec<C>>;

    /// Stored rows accepted by `predicate`, in stored order.
    fn query(
        &self,
        predicate: &dyn Fn(&C) -> bool,
        ctx: &RequestContext,
    ) -> RepositoryResult<Vec<C>>;
}
