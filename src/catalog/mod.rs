//! Demo Catalog
//!
//! The factory/item domain the selector was first built for:
//!
//! - `Factory`: versioned parent owning an `items` many-to-many relation
//! - `Item`: versioned child listed by the `ItemSelector`
//! - `Catalog`: JSON fixture loader wiring both into a `MemoryRepository`
//!
//! Fixture format:
//!
//! ```json
//! {
//!   "factories": [{ "id": 1, "name": "North Plant" }],
//!   "items": [
//!     { "id": 9, "name": "Widget A", "version": "v1" },
//!     { "id": 9, "name": "Widget A (rev 2)", "version": "v2" }
//!   ],
//!   "links": [{ "factory": 1, "items": [9] }]
//! }
//! ```

mod entities;
mod errors;
mod fixture;

pub use entities::{Factory, Item, ITEMS_RELATION, ITEM_SELECTOR, VERSIONED_SCOPE};
pub use errors::{CatalogError, CatalogResult};
pub use fixture::{Catalog, ItemBinding, ItemResolver, ItemSelector};
