//! Composite Key Codec
//!
//! Rows of one version family share a numeric identity, so the identity alone
//! cannot address a row once a second version exists. This module gives every
//! row a single opaque, externally addressable token:
//!
//! - `EntityId` - Stable numeric identity of a version family
//! - `CompositeKey` - (identity, version name) pair
//! - `CompositeKeyToken` - Canonical string form of a `CompositeKey`
//! - `KeyCodec` - Deterministic encode/decode between the two
//!
//! # Round-trip law
//!
//! `decode(encode(k)) == k` for every constructible `CompositeKey`.

mod codec;
mod composite;
mod errors;
mod id;

pub use codec::{KeyCodec, KeyEncoding};
pub use composite::{CompositeKey, CompositeKeyToken};
pub use errors::{MalformedReason, MalformedTokenError};
pub use id::EntityId;
