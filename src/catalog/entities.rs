//! Factory and Item

use serde::{Deserialize, Serialize};

use crate::descriptor::{Entity, FieldDescriptor, FieldTable};
use crate::key::EntityId;
use crate::selector::Scope;
use crate::version::{VersionName, VersionPriority, VersionStore, Versioned};

/// Relation name of `Factory -> Item`
pub const ITEMS_RELATION: &str = "items";

/// Resource name of the item picker
pub const ITEM_SELECTOR: &str = "ItemSelector";

/// Scope keeping only items carrying a named version
pub const VERSIONED_SCOPE: &str = "versioned";

/// A versioned parent row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub version: Option<VersionName>,
    #[serde(default)]
    pub priority: VersionPriority,
}

impl Versioned for Factory {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn version_name(&self) -> Option<&VersionName> {
        self.version.as_ref()
    }

    fn version_priority(&self) -> VersionPriority {
        self.priority
    }
}

/// A versioned child row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub version: Option<VersionName>,
    #[serde(default)]
    pub priority: VersionPriority,
}

impl Item {
    /// Items whose version is not the default one
    pub fn versioned_scope() -> Scope<Item> {
        Scope::new(VERSIONED_SCOPE, |item: &Item| {
            !VersionStore::current_version_name(item).is_default()
        })
    }
}

impl Versioned for Item {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn version_name(&self) -> Option<&VersionName> {
        self.version.as_ref()
    }

    fn version_priority(&self) -> VersionPriority {
        self.priority
    }
}

fn item_id(item: &Item) -> String {
    item.id.to_string()
}

fn item_name(item: &Item) -> String {
    item.name.clone()
}

fn item_version(item: &Item) -> String {
    VersionStore::current_version_name(item).to_string()
}

static ITEM_FIELD_LIST: [FieldDescriptor<Item>; 3] = [
    FieldDescriptor::new("ID", item_id),
    FieldDescriptor::new("Name", item_name),
    FieldDescriptor::new("VersionName", item_version),
];

static ITEM_FIELDS: FieldTable<Item> = FieldTable::new("item", &ITEM_FIELD_LIST);

impl Entity for Item {
    const RESOURCE: &'static str = "item";

    fn fields() -> &'static FieldTable<Self> {
        &ITEM_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(version: Option<&str>) -> Item {
        Item {
            id: EntityId::new(4),
            name: "Sprocket".into(),
            version: version.map(|v| VersionName::new(v).unwrap()),
            priority: VersionPriority::default(),
        }
    }

    #[test]
    fn test_item_field_table() {
        let fields = Item::fields();
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["ID", "Name", "VersionName"]);

        let row = item(Some("v3"));
        assert_eq!(fields.get("ID").unwrap().value(&row), "4");
        assert_eq!(fields.get("VersionName").unwrap().value(&row), "v3");
    }

    #[test]
    fn test_unassigned_version_is_default() {
        let row = item(None);
        assert_eq!(VersionStore::current_version_name(&row), VersionName::default_version());
        assert!(!Item::versioned_scope().matches(&row));
        assert!(Item::versioned_scope().matches(&item(Some("v1"))));
    }

    #[test]
    fn test_item_deserializes_without_version() {
        let row: Item = serde_json::from_str(r#"{"id": 4, "name": "Sprocket"}"#).unwrap();
        assert_eq!(row, item(None));
    }

    #[test]
    fn test_item_rejects_reserved_version() {
        let result: Result<Item, _> =
            serde_json::from_str(r#"{"id": 4, "name": "Sprocket", "version": "a::b"}"#);
        assert!(result.is_err());
    }
}
