//! RelationResolver - read-time version resolution for many-to-many links

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::descriptor::{Entity, RelationDescriptor};
use crate::key::{CompositeKey, EntityId};
use crate::observability::{Event, Logger};
use crate::repository::{ChildRepository, RepositoryError};
use crate::version::{VersionName, VersionStore, Versioned};

use super::errors::{RelationResolutionError, RelationResult};
use super::mode::{ContextFallback, VersionMode};

/// Resolves linked children of type `C` through repository `R`.
///
/// Holds no per-request state; one resolver serves concurrent requests.
pub struct RelationResolver<C, R> {
    repo: Arc<R>,
    relations: Vec<RelationDescriptor>,
    fallback: ContextFallback,
    _child: PhantomData<fn() -> C>,
}

impl<C, R> RelationResolver<C, R>
where
    C: Entity,
    R: ChildRepository<C>,
{
    /// Creates a resolver with no declared relations.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            relations: Vec::new(),
            fallback: ContextFallback::default(),
            _child: PhantomData,
        }
    }

    /// Declares a relation this resolver may serve.
    pub fn with_relation(mut self, relation: RelationDescriptor) -> Self {
        if self.relation(relation.name).is_none() {
            self.relations.push(relation);
        }
        self
    }

    /// Sets the contextual fallback policy.
    pub fn with_fallback(mut self, fallback: ContextFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Policy applied when a child lacks the requested context version.
    pub fn fallback(&self) -> ContextFallback {
        self.fallback
    }

    /// Looks up a declared relation.
    pub fn relation(&self, name: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Loads the children linked to `parent` through `relation`.
    ///
    /// Families appear in association order; rows inside a family appear in
    /// stored order. Identical inputs over unchanged data produce identical
    /// output.
    pub fn resolve<P: Versioned + ?Sized>(
        &self,
        parent: &P,
        relation: &str,
        mode: &VersionMode,
        ctx: &RequestContext,
    ) -> RelationResult<Vec<C>> {
        let parent_key = VersionStore::composite_key(parent);
        let result = self.resolve_key(&parent_key, relation, mode, ctx);

        let request_id = ctx.request_id.to_string();
        let parent_id = parent_key.id().to_string();
        let mode_label = mode.to_string();
        match &result {
            Ok(rows) => {
                let count = rows.len().to_string();
                Logger::trace(
                    Event::RelationResolved,
                    &[
                        ("request_id", request_id.as_str()),
                        ("parent_id", parent_id.as_str()),
                        ("parent_version", parent_key.version().as_str()),
                        ("relation", relation),
                        ("mode", mode_label.as_str()),
                        ("rows", count.as_str()),
                    ],
                )
            }
            Err(e) => {
                let message = e.to_string();
                Logger::warn(
                    Event::RelationResolutionFailed,
                    &[
                        ("request_id", request_id.as_str()),
                        ("parent_id", parent_id.as_str()),
                        ("relation", relation),
                        ("mode", mode_label.as_str()),
                        ("code", e.code()),
                        ("error", message.as_str()),
                    ],
                )
            }
        }

        result
    }

    /// Same as `resolve`, for callers holding only the parent's composite key.
    pub fn resolve_key(
        &self,
        parent: &CompositeKey,
        relation: &str,
        mode: &VersionMode,
        ctx: &RequestContext,
    ) -> RelationResult<Vec<C>> {
        let descriptor =
            self.relation(relation)
                .ok_or_else(|| RelationResolutionError::UnknownRelation {
                    resource: C::RESOURCE,
                    relation: relation.to_string(),
                })?;
        let fail = |e: RepositoryError| RelationResolutionError::repository(relation, e);

        ctx.check().map_err(fail)?;
        let linked = dedup_preserving_order(
            self.repo
                .linked_ids(descriptor.name, parent, ctx)
                .map_err(fail)?,
        );
        if linked.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self.repo.load_families(&linked, ctx).map_err(fail)?;
        ctx.check().map_err(fail)?;

        let families = group_families(relation, &linked, rows)?;
        Ok(families
            .into_iter()
            .flat_map(|family| self.select(family, mode))
            .collect())
    }

    fn select(&self, family: Vec<C>, mode: &VersionMode) -> Vec<C> {
        match mode {
            VersionMode::Unfiltered => family,
            VersionMode::ContextualVersion(name) => {
                if let Some(pos) = family.iter().position(|r| has_version(r, name)) {
                    return family.into_iter().nth(pos).into_iter().collect();
                }
                match self.fallback {
                    ContextFallback::HighestPriority => highest_priority(family).into_iter().collect(),
                    ContextFallback::DefaultVersion => family
                        .into_iter()
                        .find(|r| VersionStore::current_version_name(r).is_default())
                        .into_iter()
                        .collect(),
                    ContextFallback::Exclude => Vec::new(),
                }
            }
        }
    }
}

fn has_version<C: Versioned>(row: &C, name: &VersionName) -> bool {
    VersionStore::current_version_name(row) == *name
}

/// First row with the strictly highest priority.
fn highest_priority<C: Versioned>(family: Vec<C>) -> Option<C> {
    let mut best: Option<C> = None;
    for row in family {
        let better = match &best {
            Some(current) => row.version_priority() > current.version_priority(),
            None => true,
        };
        if better {
            best = Some(row);
        }
    }
    best
}

fn dedup_preserving_order(ids: Vec<EntityId>) -> Vec<EntityId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Buckets rows by family in link order and checks the store's answer.
fn group_families<C: Versioned>(
    relation: &str,
    linked: &[EntityId],
    rows: Vec<C>,
) -> RelationResult<Vec<Vec<C>>> {
    let position: HashMap<EntityId, usize> =
        linked.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut families: Vec<Vec<C>> = linked.iter().map(|_| Vec::new()).collect();
    let mut seen = HashSet::new();

    for row in rows {
        let id = row.entity_id();
        let slot = *position
            .get(&id)
            .ok_or_else(|| RelationResolutionError::UnrequestedRow {
                relation: relation.to_string(),
                child: id,
            })?;

        let key = VersionStore::composite_key(&row);
        if !seen.insert(key.clone()) {
            return Err(RelationResolutionError::DuplicateRow {
                relation: relation.to_string(),
                key,
            });
        }
        families[slot].push(row);
    }

    if let Some(empty) = families.iter().position(Vec::is_empty) {
        return Err(RelationResolutionError::DanglingLink {
            relation: relation.to_string(),
            child: linked[empty],
        });
    }

    Ok(families)
}
