//! SelectorResource - searchable candidate catalog for one entity type

use std::sync::Arc;

use crate::context::RequestContext;
use crate::descriptor::{DescriptorError, DescriptorResult, Entity, FieldDescriptor, COMPOSITE_KEY_FIELD};
use crate::key::{CompositeKey, CompositeKeyToken, KeyCodec, MalformedTokenError};
use crate::observability::{Event, Logger};
use crate::repository::{ChildRepository, RepositoryError};
use crate::version::VersionStore;

use super::candidate::SelectorCandidate;
use super::errors::{SearchError, SearchResult};
use super::scope::{Scope, ScopeSet};
use super::search::{MatchMode, SearchTerm};

/// One column of the selector's index listing.
#[derive(Debug)]
pub enum IndexAttr<C: 'static> {
    /// A field from the entity's field table
    Field(&'static FieldDescriptor<C>),
    /// The row's composite key token
    CompositeKey,
}

impl<C> IndexAttr<C> {
    /// Column name in the index listing.
    pub fn name(&self) -> &'static str {
        match self {
            IndexAttr::Field(field) => field.name(),
            IndexAttr::CompositeKey => COMPOSITE_KEY_FIELD,
        }
    }
}

/// Searchable catalog of candidate rows of type `C`.
pub struct SelectorResource<C: 'static, R> {
    name: String,
    repo: Arc<R>,
    codec: KeyCodec,
    label_field: &'static FieldDescriptor<C>,
    index_attrs: Vec<IndexAttr<C>>,
    search_attrs: Vec<&'static FieldDescriptor<C>>,
    scopes: ScopeSet<C>,
    match_mode: MatchMode,
    max_candidates: Option<usize>,
}

impl<C, R> SelectorResource<C, R>
where
    C: Entity,
    R: ChildRepository<C>,
{
    /// Starts building a selector named `name` over `repo`.
    pub fn builder(name: impl Into<String>, repo: Arc<R>) -> SelectorBuilder<C, R> {
        SelectorBuilder::new(name, repo)
    }

    /// Registered selector name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The codec every token of this selector is produced with.
    pub fn codec(&self) -> KeyCodec {
        self.codec
    }

    /// How search terms are compared against search attributes.
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Declared scopes, including the built-in default.
    pub fn scopes(&self) -> &ScopeSet<C> {
        &self.scopes
    }

    /// Names of the index columns.
    pub fn index_attr_names(&self) -> Vec<&'static str> {
        self.index_attrs.iter().map(IndexAttr::name).collect()
    }

    /// Names of the searchable attributes.
    pub fn search_attr_names(&self) -> Vec<&'static str> {
        self.search_attrs.iter().map(|f| f.name()).collect()
    }

    /// Human-readable label of a row.
    pub fn label(&self, row: &C) -> String {
        self.label_field.value(row)
    }

    /// Token of a row, from the row's own identity and version.
    pub fn token(&self, row: &C) -> CompositeKeyToken {
        self.codec.encode(&VersionStore::composite_key(row))
    }

    /// Decodes a token with this selector's codec.
    pub fn decode(&self, token: &str) -> Result<CompositeKey, MalformedTokenError> {
        self.codec.decode(token)
    }

    /// Projects a row to its (token, label) candidate.
    pub fn candidate(&self, row: &C) -> SelectorCandidate {
        SelectorCandidate::new(self.token(row), self.label(row))
    }

    /// Index columns of a row as (name, value) pairs.
    pub fn index_row(&self, row: &C) -> Vec<(&'static str, String)> {
        self.index_attrs
            .iter()
            .map(|attr| match attr {
                IndexAttr::Field(field) => (field.name(), field.value(row)),
                IndexAttr::CompositeKey => (COMPOSITE_KEY_FIELD, self.token(row).into_string()),
            })
            .collect()
    }

    /// Rows accepted by `scope` (default when `None`) and matching `term`.
    pub fn search_rows(
        &self,
        term: Option<&str>,
        scope: Option<&str>,
        ctx: &RequestContext,
    ) -> SearchResult<Vec<C>> {
        let scope = scope_or_unknown(&self.scopes, &self.name, scope)?;
        let term = SearchTerm::parse(term);
        let fail = |source: RepositoryError| SearchError::Repository {
            resource: self.name.clone(),
            source,
        };

        ctx.check().map_err(fail)?;
        let predicate = |row: &C| scope.matches(row) && self.matches_term(row, term.as_ref());
        let mut rows = self.repo.query(&predicate, ctx).map_err(fail)?;
        ctx.check().map_err(fail)?;

        if let Some(max) = self.max_candidates {
            rows.truncate(max);
        }
        Ok(rows)
    }

    /// Candidate list for the picker.
    pub fn search(
        &self,
        term: Option<&str>,
        scope: Option<&str>,
        ctx: &RequestContext,
    ) -> SearchResult<Vec<SelectorCandidate>> {
        let request_id = ctx.request_id.to_string();
        let scope_label = scope.unwrap_or("<default>");
        let term_label = term.unwrap_or("");

        match self.search_rows(term, scope, ctx) {
            Ok(rows) => {
                let candidates: Vec<_> = rows.iter().map(|row| self.candidate(row)).collect();
                let count = candidates.len().to_string();
                Logger::trace(
                    Event::CandidatesListed,
                    &[
                        ("request_id", request_id.as_str()),
                        ("selector", self.name.as_str()),
                        ("scope", scope_label),
                        ("term", term_label),
                        ("count", count.as_str()),
                    ],
                );
                Ok(candidates)
            }
            Err(e) => {
                let message = e.to_string();
                Logger::warn(
                    Event::SearchFailed,
                    &[
                        ("request_id", request_id.as_str()),
                        ("selector", self.name.as_str()),
                        ("scope", scope_label),
                        ("code", e.code()),
                        ("error", message.as_str()),
                    ],
                );
                Err(e)
            }
        }
    }

    fn matches_term(&self, row: &C, term: Option<&SearchTerm>) -> bool {
        match term {
            None => true,
            Some(term) => self
                .search_attrs
                .iter()
                .any(|field| term.matches(&field.value(row), self.match_mode)),
        }
    }
}

fn scope_or_unknown<'a, C>(
    scopes: &'a ScopeSet<C>,
    resource: &str,
    name: Option<&str>,
) -> SearchResult<&'a Scope<C>> {
    scopes.resolve(name).ok_or_else(|| SearchError::UnknownScope {
        resource: resource.to_string(),
        scope: name.unwrap_or_default().to_string(),
    })
}

/// Builder validating field names against the entity's field table.
pub struct SelectorBuilder<C: 'static, R> {
    name: String,
    repo: Arc<R>,
    codec: KeyCodec,
    label_field: String,
    index_attrs: Vec<String>,
    search_attrs: Option<Vec<String>>,
    scopes: Vec<Scope<C>>,
    match_mode: MatchMode,
    max_candidates: Option<usize>,
}

impl<C, R> SelectorBuilder<C, R>
where
    C: Entity,
    R: ChildRepository<C>,
{
    fn new(name: impl Into<String>, repo: Arc<R>) -> Self {
        Self {
            name: name.into(),
            repo,
            codec: KeyCodec::default(),
            label_field: "Name".to_string(),
            index_attrs: vec![
                "ID".to_string(),
                "Name".to_string(),
                COMPOSITE_KEY_FIELD.to_string(),
            ],
            search_attrs: None,
            scopes: Vec::new(),
            match_mode: MatchMode::default(),
            max_candidates: None,
        }
    }

    pub fn codec(mut self, codec: KeyCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Field used as the candidate label (default `Name`).
    pub fn label_field(mut self, field: &str) -> Self {
        self.label_field = field.to_string();
        self
    }

    /// Index columns (default `ID`, `Name`, `CompositePrimaryKey`).
    pub fn index_attrs(mut self, fields: &[&str]) -> Self {
        self.index_attrs = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Searchable fields (default: the label field).
    pub fn search_attrs(mut self, fields: &[&str]) -> Self {
        self.search_attrs = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn scope(mut self, scope: Scope<C>) -> Self {
        self.scopes.push(scope);
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn max_candidates(mut self, max: Option<usize>) -> Self {
        self.max_candidates = max;
        self
    }

    pub fn build(self) -> DescriptorResult<SelectorResource<C, R>> {
        let fields = C::fields();
        let label_field = fields.require(&self.label_field)?;

        let index_attrs = self
            .index_attrs
            .iter()
            .map(|name| {
                if name == COMPOSITE_KEY_FIELD {
                    Ok(IndexAttr::CompositeKey)
                } else {
                    fields.require(name).map(IndexAttr::Field)
                }
            })
            .collect::<DescriptorResult<Vec<_>>>()?;

        let search_attrs = match &self.search_attrs {
            Some(names) => names
                .iter()
                .map(|name| fields.require(name))
                .collect::<DescriptorResult<Vec<_>>>()?,
            None => vec![label_field],
        };
        if search_attrs.is_empty() {
            return Err(DescriptorError::NoSearchAttributes {
                resource: C::RESOURCE,
            });
        }

        let mut scopes = ScopeSet::new();
        for scope in self.scopes {
            scopes.add(C::RESOURCE, scope)?;
        }

        Ok(SelectorResource {
            name: self.name,
            repo: self.repo,
            codec: self.codec,
            label_field,
            index_attrs,
            search_attrs,
            scopes,
            match_mode: self.match_mode,
            max_candidates: self.max_candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldTable;
    use crate::key::{EntityId, KeyEncoding};
    use crate::repository::MemoryRepository;
    use crate::version::{VersionName, Versioned};

    #[derive(Debug, Clone)]
    struct Gizmo {
        id: u64,
        name: String,
        sku: String,
        version: Option<VersionName>,
    }

    impl Versioned for Gizmo {
        fn entity_id(&self) -> EntityId {
            EntityId::new(self.id)
        }

        fn version_name(&self) -> Option<&VersionName> {
            self.version.as_ref()
        }
    }

    fn gizmo_id(g: &Gizmo) -> String {
        g.id.to_string()
    }

    fn gizmo_name(g: &Gizmo) -> String {
        g.name.clone()
    }

    fn gizmo_sku(g: &Gizmo) -> String {
        g.sku.clone()
    }

    static GIZMO_FIELD_LIST: [FieldDescriptor<Gizmo>; 3] = [
        FieldDescriptor::new("ID", gizmo_id),
        FieldDescriptor::new("Name", gizmo_name),
        FieldDescriptor::new("SKU", gizmo_sku),
    ];
    static GIZMO_FIELDS: FieldTable<Gizmo> = FieldTable::new("gizmo", &GIZMO_FIELD_LIST);

    impl Entity for Gizmo {
        const RESOURCE: &'static str = "gizmo";

        fn fields() -> &'static FieldTable<Self> {
            &GIZMO_FIELDS
        }
    }

    fn gizmo(id: u64, name: &str, sku: &str, version: Option<&str>) -> Gizmo {
        Gizmo {
            id,
            name: name.to_string(),
            sku: sku.to_string(),
            version: version.map(|v| VersionName::new(v).unwrap()),
        }
    }

    fn repo() -> Arc<MemoryRepository<Gizmo>> {
        let repo = MemoryRepository::new();
        repo.insert(gizmo(1, "Widget A", "W-1", Some("draft"))).unwrap();
        repo.insert(gizmo(1, "Widget A", "W-1", Some("published"))).unwrap();
        repo.insert(gizmo(2, "Gadget B", "G-2", None)).unwrap();
        repo.insert(gizmo(3, "widget c", "W-3", None)).unwrap();
        Arc::new(repo)
    }

    fn builder() -> SelectorBuilder<Gizmo, MemoryRepository<Gizmo>> {
        SelectorResource::builder("GizmoSelector", repo())
    }

    fn labels(candidates: &[SelectorCandidate]) -> Vec<(String, String)> {
        candidates
            .iter()
            .map(|c| (c.token.to_string(), c.label.clone()))
            .collect()
    }

    #[test]
    fn test_search_term_filters_by_label() {
        let selector = builder().build().unwrap();
        let found = selector
            .search(Some("widg"), None, &RequestContext::new())
            .unwrap();

        assert_eq!(
            labels(&found),
            vec![
                ("1::draft".to_string(), "Widget A".to_string()),
                ("1::published".to_string(), "Widget A".to_string()),
                ("3::".to_string(), "widget c".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_term_lists_everything() {
        let selector = builder().build().unwrap();
        let found = selector.search(None, None, &RequestContext::new()).unwrap();
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_search_attrs_other_than_label() {
        let selector = builder()
            .search_attrs(&["SKU"])
            .match_mode(MatchMode::Prefix)
            .build()
            .unwrap();
        let found = selector
            .search(Some("g-"), None, &RequestContext::new())
            .unwrap();
        assert_eq!(labels(&found), vec![("2::".to_string(), "Gadget B".to_string())]);
    }

    #[test]
    fn test_named_scope() {
        let selector = builder()
            .scope(Scope::new("unversioned", |g: &Gizmo| g.version.is_none()))
            .build()
            .unwrap();
        let found = selector
            .search(None, Some("unversioned"), &RequestContext::new())
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_unknown_scope() {
        let selector = builder().build().unwrap();
        let err = selector
            .search(None, Some("archived"), &RequestContext::new())
            .unwrap_err();
        assert_eq!(err.code(), "VSEL_UNKNOWN_SCOPE");
    }

    #[test]
    fn test_max_candidates_truncates_in_order() {
        let selector = builder()
            .max_candidates(Some(2))
            .build()
            .unwrap();
        let found = selector.search(None, None, &RequestContext::new()).unwrap();
        assert_eq!(
            found.iter().map(|c| c.token.to_string()).collect::<Vec<_>>(),
            vec!["1::draft", "1::published"]
        );
    }

    #[test]
    fn test_unknown_field_fails_build() {
        let err = builder()
            .label_field("Title")
            .build()
            .err()
            .unwrap();
        assert_eq!(err.code(), "VSEL_UNKNOWN_FIELD");

        assert!(builder()
            .index_attrs(&["ID", "Colour"])
            .build()
            .is_err());
    }

    #[test]
    fn test_empty_search_attrs_rejected() {
        let err = builder()
            .search_attrs(&[])
            .build()
            .err()
            .unwrap();
        assert_eq!(
            err,
            DescriptorError::NoSearchAttributes { resource: "gizmo" }
        );
    }

    #[test]
    fn test_index_row_includes_token() {
        let selector = builder().build().unwrap();
        let row = gizmo(42, "Widget A", "W-42", Some("v1"));

        assert_eq!(
            selector.index_row(&row),
            vec![
                ("ID", "42".to_string()),
                ("Name", "Widget A".to_string()),
                (COMPOSITE_KEY_FIELD, "42::v1".to_string()),
            ]
        );
        assert_eq!(selector.index_attr_names(), vec!["ID", "Name", COMPOSITE_KEY_FIELD]);
        assert_eq!(selector.search_attr_names(), vec!["Name"]);
    }

    #[test]
    fn test_token_uses_configured_codec() {
        let selector = builder()
            .codec(KeyCodec::new(KeyEncoding::LengthPrefixed))
            .build()
            .unwrap();
        let row = gizmo(42, "Widget A", "W-42", Some("v1"));
        assert_eq!(selector.token(&row), "2:42:2:v1");
        assert_eq!(
            selector.decode("2:42:2:v1").unwrap(),
            VersionStore::composite_key(&row)
        );
    }

    #[test]
    fn test_cancelled_search_fails() {
        let selector = builder().build().unwrap();
        let ctx = RequestContext::new();
        ctx.cancel_handle().cancel();

        let err = selector.search(None, None, &ctx).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Repository {
                source: RepositoryError::Cancelled,
                ..
            }
        ));
    }
}
