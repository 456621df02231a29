//! verselect - composite version keys and versioned many-to-many selectors
//!
//! Core:
//! - `key`: (identity, version) composite keys and their token codec
//! - `version`: version names, priorities and the `Versioned` contract
//! - `relation`: version-aware resolution of many-to-many links
//! - `selector`: searchable, scoped candidate catalogs
//! - `binding`: a parent's relation field bound to a selector
//!
//! Around it: `repository` (persistence boundary), `descriptor` (static
//! field tables), `context` (deadlines, cancellation), `observability`,
//! `config`, plus the `catalog` demo domain with its `cli` and
//! `http_server` front ends.

pub mod binding;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod http_server;
pub mod key;
pub mod observability;
pub mod relation;
pub mod repository;
pub mod selector;
pub mod version;
