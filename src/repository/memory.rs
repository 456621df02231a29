//! In-memory repository
//!
//! Rows are kept in insertion order. Join rows are keyed by relation name and
//! parent composite key, each holding an ordered list of child identities.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use crate::context::RequestContext;
use crate::key::{CompositeKey, EntityId};
use crate::version::{VersionStore, Versioned};

use super::{ChildRepository, RepositoryError, RepositoryResult};

type LinkTable = HashMap<CompositeKey, Vec<EntityId>>;

/// Process-local child table plus join tables.
#[derive(Debug)]
pub struct MemoryRepository<C> {
    rows: RwLock<Vec<C>>,
    links: RwLock<HashMap<String, LinkTable>>,
}

impl<C> Default for MemoryRepository<C> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            links: RwLock::new(HashMap::new()),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}

impl<C: Versioned + Clone> MemoryRepository<C> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a relation so that its join rows can be stored and read.
    pub fn declare_relation(&self, relation: &str) -> RepositoryResult<()> {
        let mut links = self.links.write().map_err(poisoned)?;
        links.entry(relation.to_string()).or_default();
        Ok(())
    }

    /// Stores a row. Rejects a second row with the same composite key.
    pub fn insert(&self, row: C) -> RepositoryResult<()> {
        let key = VersionStore::composite_key(&row);
        let mut rows = self.rows.write().map_err(poisoned)?;

        if rows.iter().any(|r| VersionStore::composite_key(r) == key) {
            return Err(RepositoryError::DuplicateRow(key));
        }
        rows.push(row);
        Ok(())
    }

    /// Replaces the link list of `parent` for `relation`.
    pub fn set_links(
        &self,
        relation: &str,
        parent: CompositeKey,
        children: Vec<EntityId>,
    ) -> RepositoryResult<()> {
        let mut links = self.links.write().map_err(poisoned)?;
        let table = links
            .get_mut(relation)
            .ok_or_else(|| RepositoryError::UnknownRelation(relation.to_string()))?;
        table.insert(parent, children);
        Ok(())
    }

    /// Appends one child identity to the link list of `parent`.
    pub fn link(&self, relation: &str, parent: CompositeKey, child: EntityId) -> RepositoryResult<()> {
        let mut links = self.links.write().map_err(poisoned)?;
        let table = links
            .get_mut(relation)
            .ok_or_else(|| RepositoryError::UnknownRelation(relation.to_string()))?;
        table.entry(parent).or_default().push(child);
        Ok(())
    }

    /// Number of stored rows across all families.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Returns true when no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C> ChildRepository<C> for MemoryRepository<C>
where
    C: Versioned + Clone + Send + Sync,
{
    fn linked_ids(
        &self,
        relation: &str,
        parent: &CompositeKey,
        ctx: &RequestContext,
    ) -> RepositoryResult<Vec<EntityId>> {
        ctx.check()?;
        let links = self.links.read().map_err(poisoned)?;
        let table = links
            .get(relation)
            .ok_or_else(|| RepositoryError::UnknownRelation(relation.to_string()))?;
        Ok(table.get(parent).cloned().unwrap_or_default())
    }

    fn load_families(&self, ids: &[EntityId], ctx: &RequestContext) -> RepositoryResult<Vec<C>> {
        ctx.check()?;
        let wanted: HashSet<EntityId> = ids.iter().copied().collect();
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows
            .iter()
            .filter(|r| wanted.contains(&r.entity_id()))
            .cloned()
            .collect())
    }

    fn query(
        &self,
        predicate: &dyn Fn(&C) -> bool,
        ctx: &RequestContext,
    ) -> RepositoryResult<Vec<C>> {
        ctx.check()?;
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.iter().filter(|r| predicate(r)).cloned().collect())
    }
}
