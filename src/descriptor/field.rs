//! Field descriptors

use super::errors::{DescriptorError, DescriptorResult};

/// Pseudo-field resolved by selectors to the row's composite key token.
pub const COMPOSITE_KEY_FIELD: &str = "CompositePrimaryKey";

/// Typed accessor producing a field's display value.
pub type FieldAccessor<E> = fn(&E) -> String;

/// One named field of an entity.
pub struct FieldDescriptor<E: 'static> {
    name: &'static str,
    accessor: FieldAccessor<E>,
}

impl<E> FieldDescriptor<E> {
    pub const fn new(name: &'static str, accessor: FieldAccessor<E>) -> Self {
        Self { name, accessor }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from `entity`.
    #[inline]
    pub fn value(&self, entity: &E) -> String {
        (self.accessor)(entity)
    }
}

impl<E> std::fmt::Debug for FieldDescriptor<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// Static field table of an entity type.
pub struct FieldTable<E: 'static> {
    resource: &'static str,
    fields: &'static [FieldDescriptor<E>],
}

impl<E> FieldTable<E> {
    pub const fn new(resource: &'static str, fields: &'static [FieldDescriptor<E>]) -> Self {
        Self { resource, fields }
    }

    /// Resource the table describes; named in lookup errors.
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&'static FieldDescriptor<E>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field, failing on unknown names.
    pub fn require(&self, name: &str) -> DescriptorResult<&'static FieldDescriptor<E>> {
        self.get(name).ok_or_else(|| DescriptorError::UnknownField {
            resource: self.resource,
            field: name.to_string(),
        })
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget {
        id: u64,
        name: String,
    }

    fn widget_id(w: &Widget) -> String {
        w.id.to_string()
    }

    fn widget_name(w: &Widget) -> String {
        w.name.clone()
    }

    static WIDGET_FIELD_LIST: [FieldDescriptor<Widget>; 2] = [
        FieldDescriptor::new("ID", widget_id),
        FieldDescriptor::new("Name", widget_name),
    ];

    static WIDGET_FIELDS: FieldTable<Widget> = FieldTable::new("widget", &WIDGET_FIELD_LIST);

    #[test]
    fn test_lookup_reads_typed_accessor() {
        let w = Widget {
            id: 3,
            name: "Widget A".into(),
        };
        assert_eq!(WIDGET_FIELDS.require("Name").unwrap().value(&w), "Widget A");
        assert_eq!(WIDGET_FIELDS.require("ID").unwrap().value(&w), "3");
    }

    #[test]
    fn test_table_names_its_resource() {
        assert_eq!(WIDGET_FIELDS.resource(), "widget");
        assert_eq!(WIDGET_FIELDS.names().collect::<Vec<_>>(), vec!["ID", "Name"]);
    }

    #[test]
    fn test_unknown_field() {
        let err = WIDGET_FIELDS.require("Colour").unwrap_err();
        assert_eq!(
            err,
            DescriptorError::UnknownField {
                resource: "widget",
                field: "Colour".into()
            }
        );
    }

    #[test]
    fn test_names_in_order() {
        assert_eq!(WIDGET_FIELDS.names().collect::<Vec<_>>(), vec!["ID", "Name"]);
    }
}
