//! Versioned Relation Resolver
//!
//! Loads the children linked to a parent through a named many-to-many
//! relation, honoring an explicit version-visibility mode.
//!
//! Join rows store child identities only. Which version of each child is
//! returned is decided here, at read time:
//!
//! - `VersionMode::Unfiltered` - every stored version of every linked child
//! - `VersionMode::ContextualVersion(name)` - the matching version per child,
//!   or whatever `ContextFallback` selects when a child has no such version
//!
//! Resolution failures are errors. An empty result always means "no
//! associations", never "could not tell".

mod errors;
mod mode;
mod resolver;

pub use errors::{RelationResolutionError, RelationResult};
pub use mode::{ContextFallback, VersionMode};
pub use resolver::RelationResolver;
