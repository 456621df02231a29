//! Catalog errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::binding::BindingError;
use crate::descriptor::DescriptorError;
use crate::key::{CompositeKey, EntityId};
use crate::repository::RepositoryError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two factories share a composite key
    #[error("Duplicate factory {0:?}")]
    DuplicateFactory(CompositeKey),

    /// A link names a factory the fixture does not define
    #[error("Link references unknown factory {0:?}")]
    UnknownLinkParent(CompositeKey),

    #[error("Factory {id} has no version '{version}'")]
    UnknownFactory { id: EntityId, version: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Read { .. } => "VSEL_CATALOG_READ",
            CatalogError::Parse(_) => "VSEL_CATALOG_PARSE",
            CatalogError::DuplicateFactory(_) | CatalogError::UnknownLinkParent(_) => {
                "VSEL_CATALOG_INVALID"
            }
            CatalogError::UnknownFactory { .. } => "VSEL_UNKNOWN_FACTORY",
            CatalogError::Repository(e) => e.code(),
            CatalogError::Descriptor(e) => e.code(),
            CatalogError::Binding(e) => e.code(),
        }
    }
}
