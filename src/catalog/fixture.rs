//! Catalog - fixture-backed factories and items

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::binding::AssociationBinding;
use crate::config::SelectorConfig;
use crate::descriptor::{Entity, RelationDescriptor, COMPOSITE_KEY_FIELD};
use crate::key::{CompositeKey, EntityId};
use crate::observability::{Event, Logger};
use crate::relation::RelationResolver;
use crate::repository::MemoryRepository;
use crate::selector::SelectorResource;
use crate::version::{VersionName, VersionStore};

use super::entities::{Factory, Item, ITEMS_RELATION, ITEM_SELECTOR};
use super::errors::{CatalogError, CatalogResult};

pub type ItemSelector = SelectorResource<Item, MemoryRepository<Item>>;
pub type ItemResolver = RelationResolver<Item, MemoryRepository<Item>>;
pub type ItemBinding = AssociationBinding<Item, MemoryRepository<Item>>;

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    factories: Vec<Factory>,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    links: Vec<LinkFixture>,
}

/// Join rows owned by one factory version
#[derive(Debug, Deserialize)]
struct LinkFixture {
    factory: EntityId,
    #[serde(default)]
    factory_version: VersionName,
    items: Vec<EntityId>,
}

/// Factories plus an item repository holding every item version and the
/// `items` join rows.
#[derive(Debug)]
pub struct Catalog {
    factories: Vec<Factory>,
    items: Arc<MemoryRepository<Item>>,
}

impl Catalog {
    /// Load a catalog fixture from a JSON file
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;

        let path_str = path.display().to_string();
        let factories = catalog.factories.len().to_string();
        let items = catalog.items.len().to_string();
        Logger::info(
            Event::CatalogLoaded,
            &[
                ("path", path_str.as_str()),
                ("factories", factories.as_str()),
                ("items", items.as_str()),
            ],
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> CatalogResult<Self> {
        let fixture: CatalogFixture = serde_json::from_str(content)?;
        Self::from_fixture(fixture)
    }

    fn from_fixture(fixture: CatalogFixture) -> CatalogResult<Self> {
        let mut keys = HashSet::new();
        for factory in &fixture.factories {
            let key = VersionStore::composite_key(factory);
            if !keys.insert(key.clone()) {
                return Err(CatalogError::DuplicateFactory(key));
            }
        }

        let items = MemoryRepository::new();
        items.declare_relation(ITEMS_RELATION)?;
        for item in fixture.items {
            items.insert(item)?;
        }
        for link in fixture.links {
            let parent = CompositeKey::new(link.factory, link.factory_version);
            if !keys.contains(&parent) {
                return Err(CatalogError::UnknownLinkParent(parent));
            }
            items.set_links(ITEMS_RELATION, parent, link.items)?;
        }

        Ok(Self {
            factories: fixture.factories,
            items: Arc::new(items),
        })
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    /// The factory row with this identity and version
    pub fn factory(&self, id: EntityId, version: &VersionName) -> CatalogResult<&Factory> {
        self.factories
            .iter()
            .find(|f| f.id == id && VersionStore::current_version_name(*f) == *version)
            .ok_or_else(|| CatalogError::UnknownFactory {
                id,
                version: version.to_string(),
            })
    }

    pub fn items(&self) -> Arc<MemoryRepository<Item>> {
        Arc::clone(&self.items)
    }

    /// The `ItemSelector` picker: label `Name`, index `ID`, `Name` and
    /// `CompositePrimaryKey`, searchable by `Name`.
    pub fn item_selector(&self, config: &SelectorConfig) -> CatalogResult<ItemSelector> {
        Ok(SelectorResource::builder(ITEM_SELECTOR, self.items())
            .codec(config.codec())
            .label_field("Name")
            .index_attrs(&["ID", "Name", COMPOSITE_KEY_FIELD])
            .search_attrs(&["Name"])
            .scope(Item::versioned_scope())
            .match_mode(config.match_mode)
            .max_candidates(config.max_candidates)
            .build()?)
    }

    /// Resolver declaring `Factory.items` with the configured fallback.
    pub fn item_resolver(&self, config: &SelectorConfig) -> ItemResolver {
        RelationResolver::new(self.items())
            .with_relation(RelationDescriptor::many_to_many(ITEMS_RELATION, Item::RESOURCE))
            .with_fallback(config.context_fallback)
    }

    /// The `Factory.items` field bound to the `ItemSelector`
    pub fn items_binding(&self, config: &SelectorConfig) -> CatalogResult<ItemBinding> {
        let resolver = Arc::new(self.item_resolver(config));
        let selector = Arc::new(self.item_selector(config)?);
        Ok(AssociationBinding::new(ITEMS_RELATION, resolver, selector)?)
    }
}
