//! Selector search and association binding
//!
//! Identity agreement between the picker and the current selections, the
//! search scenarios and typed failures.

use std::sync::Arc;

use verselect::binding::{AssociationBinding, BindingError};
use verselect::catalog::{Catalog, Factory, Item, ITEMS_RELATION, ITEM_SELECTOR};
use verselect::config::SelectorConfig;
use verselect::context::RequestContext;
use verselect::descriptor::{Entity, RelationDescriptor};
use verselect::key::{CompositeKey, EntityId, KeyCodec, KeyEncoding};
use verselect::relation::RelationResolver;
use verselect::repository::{ChildRepository, RepositoryError, RepositoryResult};
use verselect::selector::{MatchMode, Scope, SearchError, SelectorResource};
use verselect::version::{VersionName, VersionPriority};

const CATALOG: &str = r#"{
    "factories": [
        { "id": 1, "name": "North Plant" },
        { "id": 2, "name": "South Plant" }
    ],
    "items": [
        { "id": 7, "name": "Widget A" },
        { "id": 9, "name": "Gadget B" },
        { "id": 11, "name": "Sprocket", "version": "draft" },
        { "id": 11, "name": "Sprocket", "version": "published" }
    ],
    "links": [
        { "factory": 1, "items": [7, 9] },
        { "factory": 2, "items": [11, 7] }
    ]
}"#;

fn catalog() -> Catalog {
    Catalog::from_json(CATALOG).unwrap()
}

fn factory<'a>(catalog: &'a Catalog, id: u64) -> &'a Factory {
    catalog
        .factory(EntityId::new(id), &VersionName::default_version())
        .unwrap()
}

fn pairs(candidates: &[verselect::selector::SelectorCandidate]) -> Vec<(String, String)> {
    candidates
        .iter()
        .map(|c| (c.token.to_string(), c.label.clone()))
        .collect()
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_default_version_children_in_association_order() {
    let catalog = catalog();
    let binding = catalog.items_binding(&SelectorConfig::default()).unwrap();

    let selections = binding
        .current_selections(factory(&catalog, 1), &RequestContext::new())
        .unwrap();
    assert_eq!(
        pairs(&selections),
        vec![
            ("7::".to_string(), "Widget A".to_string()),
            ("9::".to_string(), "Gadget B".to_string()),
        ]
    );
}

#[test]
fn test_search_widg_returns_only_widget() {
    let catalog = catalog();
    let binding = catalog.items_binding(&SelectorConfig::default()).unwrap();

    let candidates = binding
        .candidate_list(Some("widg"), None, &RequestContext::new())
        .unwrap();
    assert_eq!(pairs(&candidates), vec![("7::".to_string(), "Widget A".to_string())]);
}

#[test]
fn test_search_is_case_insensitive_and_trimmed() {
    let catalog = catalog();
    let selector = catalog.item_selector(&SelectorConfig::default()).unwrap();
    let ctx = RequestContext::new();

    let upper = selector.search(Some("  WIDG "), None, &ctx).unwrap();
    let lower = selector.search(Some("widg"), None, &ctx).unwrap();
    assert_eq!(upper, lower);

    let blank = selector.search(Some("   "), None, &ctx).unwrap();
    assert_eq!(blank.len(), 4);
}

#[test]
fn test_prefix_match_mode() {
    let catalog = catalog();
    let config = SelectorConfig {
        match_mode: MatchMode::Prefix,
        ..SelectorConfig::default()
    };
    let selector = catalog.item_selector(&config).unwrap();
    let ctx = RequestContext::new();

    assert!(selector.search(Some("get"), None, &ctx).unwrap().is_empty());
    assert_eq!(selector.search(Some("gad"), None, &ctx).unwrap().len(), 1);
}

#[test]
fn test_max_candidates_truncates_in_order() {
    let catalog = catalog();
    let config = SelectorConfig {
        max_candidates: Some(2),
        ..SelectorConfig::default()
    };
    let selector = catalog.item_selector(&config).unwrap();

    let candidates = selector.search(None, None, &RequestContext::new()).unwrap();
    assert_eq!(
        pairs(&candidates),
        vec![
            ("7::".to_string(), "Widget A".to_string()),
            ("9::".to_string(), "Gadget B".to_string()),
        ]
    );
}

// =============================================================================
// IDENTITY AGREEMENT
// =============================================================================

#[test]
fn test_selected_tokens_appear_among_candidates() {
    for encoding in [KeyEncoding::Separated, KeyEncoding::LengthPrefixed] {
        let catalog = catalog();
        let config = SelectorConfig {
            key_encoding: encoding,
            ..SelectorConfig::default()
        };
        let binding = catalog.items_binding(&config).unwrap();
        let ctx = RequestContext::new();
        let candidates = binding.candidate_list(None, None, &ctx).unwrap();

        for id in [1, 2] {
            let selections = binding.current_selections(factory(&catalog, id), &ctx).unwrap();
            for selected in &selections {
                assert!(
                    candidates.contains(selected),
                    "{} not offered by the picker under {:?}",
                    selected.token,
                    encoding
                );
            }
        }
    }
}

#[test]
fn test_child_keeps_its_own_version_in_any_parent_context() {
    let catalog = catalog();
    let binding = catalog.items_binding(&SelectorConfig::default()).unwrap();
    let ctx = RequestContext::new();
    let parent = factory(&catalog, 2);

    let context = VersionName::new("published").unwrap();
    let in_context = binding.selections_in_context(parent, &context, &ctx).unwrap();
    assert_eq!(
        pairs(&in_context),
        vec![
            ("11::published".to_string(), "Sprocket".to_string()),
            ("7::".to_string(), "Widget A".to_string()),
        ]
    );

    let editor_view = binding.current_selections(parent, &ctx).unwrap();
    assert_eq!(
        pairs(&editor_view),
        vec![
            ("11::draft".to_string(), "Sprocket".to_string()),
            ("11::published".to_string(), "Sprocket".to_string()),
            ("7::".to_string(), "Widget A".to_string()),
        ]
    );
}

#[test]
fn test_submitted_tokens_round_trip_to_link_ids() {
    let catalog = catalog();
    let binding = catalog.items_binding(&SelectorConfig::default()).unwrap();
    let ctx = RequestContext::new();

    let selections = binding.current_selections(factory(&catalog, 2), &ctx).unwrap();
    let tokens: Vec<_> = selections.iter().map(|c| c.token.as_str()).collect();
    let ids = binding.submitted_ids(&tokens).unwrap();
    assert_eq!(ids, vec![EntityId::new(11), EntityId::new(7)]);
}

#[test]
fn test_index_row_lists_composite_key() {
    let catalog = catalog();
    let selector = catalog.item_selector(&SelectorConfig::default()).unwrap();
    let rows = selector
        .search_rows(Some("sprocket"), None, &RequestContext::new())
        .unwrap();

    assert_eq!(selector.index_attr_names(), vec!["ID", "Name", "CompositePrimaryKey"]);
    assert_eq!(
        selector.index_row(&rows[0]),
        vec![
            ("ID", "11".to_string()),
            ("Name", "Sprocket".to_string()),
            ("CompositePrimaryKey", "11::draft".to_string()),
        ]
    );
}

// =============================================================================
// SCOPES
// =============================================================================

#[test]
fn test_named_scope_and_unknown_scope() {
    let catalog = catalog();
    let selector = catalog.item_selector(&SelectorConfig::default()).unwrap();
    let ctx = RequestContext::new();

    let versioned = selector.search(None, Some("versioned"), &ctx).unwrap();
    assert_eq!(versioned.len(), 2);

    let default = selector.search(None, Some(""), &ctx).unwrap();
    assert_eq!(default.len(), 4);

    let err = selector.search(None, Some("archived"), &ctx).unwrap_err();
    assert!(matches!(err, SearchError::UnknownScope { .. }));
}

#[test]
fn test_custom_default_scope() {
    let catalog = catalog();
    let selector = SelectorResource::builder(ITEM_SELECTOR, catalog.items())
        .scope(Scope::new("", |item: &Item| item.id != EntityId::new(9)))
        .build()
        .unwrap();

    let labels: Vec<_> = selector
        .search(None, None, &RequestContext::new())
        .unwrap()
        .into_iter()
        .map(|c| c.label)
        .collect();
    assert!(!labels.contains(&"Gadget B".to_string()));
}

// =============================================================================
// FAILURES
// =============================================================================

struct UnavailableRepository;

impl ChildRepository<Item> for UnavailableRepository {
    fn linked_ids(
        &self,
        _relation: &str,
        _parent: &CompositeKey,
        _ctx: &RequestContext,
    ) -> RepositoryResult<Vec<EntityId>> {
        Err(RepositoryError::Unavailable("connection refused".into()))
    }

    fn load_families(&self, _ids: &[EntityId], _ctx: &RequestContext) -> RepositoryResult<Vec<Item>> {
        Err(RepositoryError::Unavailable("connection refused".into()))
    }

    fn query(
        &self,
        _predicate: &dyn Fn(&Item) -> bool,
        _ctx: &RequestContext,
    ) -> RepositoryResult<Vec<Item>> {
        Err(RepositoryError::Unavailable("connection refused".into()))
    }
}

fn unavailable_binding() -> AssociationBinding<Item, UnavailableRepository> {
    let repo = Arc::new(UnavailableRepository);
    let resolver = RelationResolver::new(Arc::clone(&repo))
        .with_relation(RelationDescriptor::many_to_many(ITEMS_RELATION, Item::RESOURCE));
    let selector = SelectorResource::builder(ITEM_SELECTOR, repo)
        .codec(KeyCodec::default())
        .build()
        .unwrap();
    AssociationBinding::new(ITEMS_RELATION, Arc::new(resolver), Arc::new(selector)).unwrap()
}

#[test]
fn test_selection_failure_is_typed() {
    let binding = unavailable_binding();
    let parent = Factory {
        id: EntityId::new(1),
        name: "North Plant".into(),
        version: None,
        priority: VersionPriority::default(),
    };

    let err = binding
        .current_selections(&parent, &RequestContext::new())
        .unwrap_err();
    assert!(matches!(err, BindingError::Selections(_)));
    assert_eq!(err.code(), "VSEL_RELATION_RESOLUTION");
}

#[test]
fn test_search_failure_is_typed() {
    let binding = unavailable_binding();
    let err = binding
        .candidate_list(Some("widg"), None, &RequestContext::new())
        .unwrap_err();
    assert!(matches!(
        err,
        BindingError::Candidates(SearchError::Repository {
            source: RepositoryError::Unavailable(_),
            ..
        })
    ));
}

#[test]
fn test_cancelled_request_fails() {
    let catalog = catalog();
    let binding = catalog.items_binding(&SelectorConfig::default()).unwrap();
    let ctx = RequestContext::new();
    ctx.cancel_handle().cancel();

    let err = binding.candidate_list(None, None, &ctx).unwrap_err();
    assert_eq!(err.code(), "VSEL_SEARCH");
}
