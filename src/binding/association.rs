//! AssociationBinding - many-to-many field bound to a selector

use std::collections::HashSet;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::descriptor::Entity;
use crate::key::EntityId;
use crate::observability::{Event, Logger};
use crate::relation::{RelationResolver, VersionMode};
use crate::repository::ChildRepository;
use crate::selector::{SelectorCandidate, SelectorResource};
use crate::version::{VersionName, VersionStore, Versioned};

use super::errors::{BindingError, BindingResult};

/// A parent's many-to-many field bound to a selector of child type `C`.
pub struct AssociationBinding<C: 'static, R> {
    relation: &'static str,
    resolver: Arc<RelationResolver<C, R>>,
    selector: Arc<SelectorResource<C, R>>,
}

impl<C, R> AssociationBinding<C, R>
where
    C: Entity,
    R: ChildRepository<C>,
{
    /// Binds `relation` of `resolver` to `selector`.
    pub fn new(
        relation: &'static str,
        resolver: Arc<RelationResolver<C, R>>,
        selector: Arc<SelectorResource<C, R>>,
    ) -> BindingResult<Self> {
        if resolver.relation(relation).is_none() {
            return Err(BindingError::UnboundRelation(relation.to_string()));
        }
        Ok(Self {
            relation,
            resolver,
            selector,
        })
    }

    /// Name of the bound relation.
    pub fn relation(&self) -> &'static str {
        self.relation
    }

    /// Selector supplying labels, tokens and candidates.
    pub fn selector(&self) -> &SelectorResource<C, R> {
        &self.selector
    }

    /// Resolver serving the bound relation.
    pub fn resolver(&self) -> &RelationResolver<C, R> {
        &self.resolver
    }

    /// Every linked version of every linked child, as (token, label) pairs.
    ///
    /// Editors see all linked versions regardless of the browsing context.
    pub fn current_selections<P: Versioned + ?Sized>(
        &self,
        parent: &P,
        ctx: &RequestContext,
    ) -> BindingResult<Vec<SelectorCandidate>> {
        let mode = VersionMode::Unfiltered;
        let rows = self.resolver.resolve(parent, self.relation, &mode, ctx)?;
        let selections: Vec<_> = rows.iter().map(|row| self.selector.candidate(row)).collect();
        self.log_resolved(parent, &mode, selections.len(), ctx);
        Ok(selections)
    }

    /// Linked rows as a reader browsing version `context` sees them: one row
    /// per child, chosen by the resolver's fallback when the child lacks
    /// that version.
    pub fn selections_in_context<P: Versioned + ?Sized>(
        &self,
        parent: &P,
        context: &VersionName,
        ctx: &RequestContext,
    ) -> BindingResult<Vec<SelectorCandidate>> {
        let mode = VersionMode::contextual(context.clone());
        let rows = self.resolver.resolve(parent, self.relation, &mode, ctx)?;
        let selections: Vec<_> = rows.iter().map(|row| self.selector.candidate(row)).collect();
        self.log_resolved(parent, &mode, selections.len(), ctx);
        Ok(selections)
    }

    /// Picker candidates; delegates to the selector.
    pub fn candidate_list(
        &self,
        term: Option<&str>,
        scope: Option<&str>,
        ctx: &RequestContext,
    ) -> BindingResult<Vec<SelectorCandidate>> {
        Ok(self.selector.search(term, scope, ctx)?)
    }

    /// Decodes submitted tokens into distinct child identities, in order.
    ///
    /// Join rows store identities only, so two versions of one child collapse
    /// into a single link. One malformed token rejects the whole submission.
    pub fn submitted_ids<S: AsRef<str>>(&self, tokens: &[S]) -> BindingResult<Vec<EntityId>> {
        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(tokens.len());

        for token in tokens {
            let key = self.selector.decode(token.as_ref()).map_err(|e| {
                let reason = e.reason().to_string();
                Logger::warn(
                    Event::TokenRejected,
                    &[
                        ("relation", self.relation),
                        ("token", e.token()),
                        ("reason", reason.as_str()),
                    ],
                );
                e
            })?;
            if seen.insert(key.id()) {
                ids.push(key.id());
            }
        }

        Ok(ids)
    }

    fn log_resolved<P: Versioned + ?Sized>(
        &self,
        parent: &P,
        mode: &VersionMode,
        count: usize,
        ctx: &RequestContext,
    ) {
        let owned = self.resolved_fields(parent, mode, count, ctx);
        let fields: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
        Logger::info(Event::SelectionsResolved, &fields);
    }

    /// Fields of a `SelectionsResolved` event, shared by both read paths.
    fn resolved_fields<P: Versioned + ?Sized>(
        &self,
        parent: &P,
        mode: &VersionMode,
        count: usize,
        ctx: &RequestContext,
    ) -> Vec<(&'static str, String)> {
        let parent_key = VersionStore::composite_key(parent);
        vec![
            ("request_id", ctx.request_id.to_string()),
            ("parent", self.selector.codec().encode(&parent_key).into_string()),
            ("relation", self.relation.to_string()),
            ("mode", mode.to_string()),
            ("count", count.to_string()),
            ("elapsed_ms", ctx.elapsed_ms().to_string()),
        ]
    }
}
