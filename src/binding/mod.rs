//! Association Editor Binding
//!
//! Glues a parent's many-to-many field to a `SelectorResource`:
//!
//! - read path: `current_selections` resolves every linked version
//!   (`VersionMode::Unfiltered`) and stamps each with the selector's token
//! - picker path: `candidate_list` delegates to the selector's search
//! - submit path: `submitted_ids` decodes tokens back to child identities
//!
//! Both read paths use the selector's own codec and label accessor, so a
//! row already linked to the parent carries the exact token the picker
//! offers for it.

mod association;
mod errors;

pub use association::AssociationBinding;
pub use errors::{BindingError, BindingResult};
