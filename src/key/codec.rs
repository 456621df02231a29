//! KeyCodec - CompositeKey <-> CompositeKeyToken
//!
//! Two encodings are supported:
//!
//! - `Separated` (default): `<id>::<version>`, e.g. `42::v1`, `7::`
//! - `LengthPrefixed`: `<len>:<id>:<len>:<version>`, e.g. `2:42:2:v1`
//!
//! Both are injective. `Separated` relies on two facts: the identity segment
//! is canonical decimal and therefore separator-free, and `VersionName`
//! refuses the separator. Decoding still rejects a second separator so that a
//! token from a foreign producer cannot smuggle one in.
//!
//! Identity segments must be canonical: ASCII digits only, no sign, no
//! leading zero other than `0` itself. `007::` is rejected instead of being
//! read as `7::`, otherwise two tokens would decode to the same key.

use serde::{Deserialize, Serialize};

use crate::version::{VersionName, RESERVED_SEPARATOR};

use super::errors::{MalformedReason, MalformedTokenError};
use super::{CompositeKey, CompositeKeyToken, EntityId};

/// Token layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyEncoding {
    /// `<id>::<version>`
    #[default]
    Separated,
    /// `<len>:<id>:<len>:<version>`
    LengthPrefixed,
}

impl KeyEncoding {
    /// Configuration name of the encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyEncoding::Separated => "separated",
            KeyEncoding::LengthPrefixed => "length_prefixed",
        }
    }
}

/// Stateless composite key codec.
///
/// A selector and a relation binding must share one codec, or their tokens
/// for the same row will differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyCodec {
    encoding: KeyEncoding,
}

impl KeyCodec {
    /// Creates a codec using `encoding`.
    pub fn new(encoding: KeyEncoding) -> Self {
        Self { encoding }
    }

    /// Returns the encoding in use.
    pub fn encoding(&self) -> KeyEncoding {
        self.encoding
    }

    /// Encodes a composite key. Total over constructible keys.
    pub fn encode(&self, key: &CompositeKey) -> CompositeKeyToken {
        self.encode_parts(key.id(), key.version())
    }

    /// Encodes an (identity, version) pair.
    pub fn encode_parts(&self, id: EntityId, version: &VersionName) -> CompositeKeyToken {
        let encoded = match self.encoding {
            KeyEncoding::Separated => format!("{}{}{}", id, RESERVED_SEPARATOR, version),
            KeyEncoding::LengthPrefixed => {
                let id = id.to_string();
                format!("{}:{}:{}:{}", id.len(), id, version.as_str().len(), version)
            }
        };
        CompositeKeyToken::from_encoded(encoded)
    }

    /// Decodes a token back into its composite key.
    pub fn decode(&self, token: &str) -> Result<CompositeKey, MalformedTokenError> {
        let parsed = match self.encoding {
            KeyEncoding::Separated => decode_separated(token),
            KeyEncoding::LengthPrefixed => decode_length_prefixed(token),
        };
        parsed.map_err(|reason| MalformedTokenError::new(token, reason))
    }
}

fn decode_separated(token: &str) -> Result<CompositeKey, MalformedReason> {
    let (id, version) = token
        .split_once(RESERVED_SEPARATOR)
        .ok_or(MalformedReason::MissingSeparator)?;

    let id = parse_identity(id)?;
    if version.contains(RESERVED_SEPARATOR) {
        return Err(MalformedReason::AmbiguousSeparator);
    }
    let version = VersionName::new(version)?;

    Ok(CompositeKey::new(id, version))
}

fn decode_length_prefixed(token: &str) -> Result<CompositeKey, MalformedReason> {
    let (id, rest) = take_prefixed_segment(token)?;
    let rest = rest
        .strip_prefix(':')
        .ok_or(MalformedReason::LengthMismatch)?;
    let (version, rest) = take_prefixed_segment(rest)?;
    if !rest.is_empty() {
        return Err(MalformedReason::TrailingData);
    }

    let id = parse_identity(id)?;
    let version = VersionName::new(version)?;

    Ok(CompositeKey::new(id, version))
}

/// Reads `<len>:<segment>` and returns the segment plus the remaining input.
fn take_prefixed_segment(input: &str) -> Result<(&str, &str), MalformedReason> {
    let (len, rest) = input
        .split_once(':')
        .ok_or(MalformedReason::LengthMismatch)?;
    let len = parse_canonical(len).ok_or(MalformedReason::LengthMismatch)?;
    let len = usize::try_from(len).map_err(|_| MalformedReason::LengthMismatch)?;

    let segment = rest.get(..len).ok_or(MalformedReason::LengthMismatch)?;
    Ok((segment, &rest[len..]))
}

fn parse_identity(segment: &str) -> Result<EntityId, MalformedReason> {
    parse_canonical(segment)
        .map(EntityId::new)
        .ok_or_else(|| MalformedReason::InvalidIdentity(segment.to_string()))
}

/// Parses canonical unsigned decimal. Rejects signs, whitespace and leading zeros.
fn parse_canonical(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: u64, version: &str) -> CompositeKey {
        CompositeKey::new(EntityId::new(id), VersionName::new(version).unwrap())
    }

    // === Separated ===

    #[test]
    fn test_separated_encode() {
        let codec = KeyCodec::default();
        assert_eq!(codec.encode(&key(42, "v1")), "42::v1");
        assert_eq!(codec.encode(&key(7, "")), "7::");
    }

    #[test]
    fn test_separated_decode() {
        let codec = KeyCodec::default();
        assert_eq!(codec.decode("42::v1").unwrap(), key(42, "v1"));
        assert_eq!(codec.decode("7::").unwrap(), key(7, ""));
    }

    #[test]
    fn test_separated_version_with_single_colons() {
        let codec = KeyCodec::default();
        let k = key(3, ":edge:");
        let token = codec.encode(&k);
        assert_eq!(token, "3:::edge:");
        assert_eq!(codec.decode(token.as_str()).unwrap(), k);
    }

    #[test]
    fn test_separated_missing_separator() {
        let err = KeyCodec::default().decode("42").unwrap_err();
        assert_eq!(err.reason(), &MalformedReason::MissingSeparator);
        assert_eq!(err.token(), "42");
    }

    #[test]
    fn test_separated_multiple_separators() {
        let err = KeyCodec::default().decode("42::a::b").unwrap_err();
        assert_eq!(err.reason(), &MalformedReason::AmbiguousSeparator);
    }

    #[test]
    fn test_separated_non_numeric_identity() {
        for token in ["abc::v1", "::v1", "-1::v1", "+1::v1", " 1::v1", "1.0::v1"] {
            let err = KeyCodec::default().decode(token).unwrap_err();
            assert!(
                matches!(err.reason(), MalformedReason::InvalidIdentity(_)),
                "{} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_separated_leading_zero_rejected() {
        assert!(KeyCodec::default().decode("007::v1").is_err());
        assert_eq!(KeyCodec::default().decode("0::v1").unwrap(), key(0, "v1"));
    }

    #[test]
    fn test_identity_overflow_rejected() {
        assert!(KeyCodec::default().decode("18446744073709551616::v").is_err());
        assert_eq!(
            KeyCodec::default().decode("18446744073709551615::v").unwrap(),
            key(u64::MAX, "v")
        );
    }

    #[test]
    fn test_legacy_dash_separator_rejected() {
        // Older pickers emitted `<id>---<version>`; those never decode here.
        assert!(KeyCodec::default().decode("42---v1").is_err());
    }

    // === LengthPrefixed ===

    #[test]
    fn test_length_prefixed_encode() {
        let codec = KeyCodec::new(KeyEncoding::LengthPrefixed);
        assert_eq!(codec.encode(&key(42, "v1")), "2:42:2:v1");
        assert_eq!(codec.encode(&key(7, "")), "1:7:0:");
    }

    #[test]
    fn test_length_prefixed_round_trip() {
        let codec = KeyCodec::new(KeyEncoding::LengthPrefixed);
        for k in [key(42, "v1"), key(7, ""), key(1, "a:b"), key(10, "héllo")] {
            assert_eq!(codec.decode(codec.encode(&k).as_str()).unwrap(), k);
        }
    }

    #[test]
    fn test_length_prefixed_rejects_bad_lengths() {
        let codec = KeyCodec::new(KeyEncoding::LengthPrefixed);
        for token in ["3:42:2:v1", "2:42:3:v1", "2:42:1:v1", "x:42:2:v1", "2:42", "02:42:2:v1"] {
            assert!(codec.decode(token).is_err(), "{} should be rejected", token);
        }
    }

    #[test]
    fn test_length_prefixed_trailing_data() {
        let codec = KeyCodec::new(KeyEncoding::LengthPrefixed);
        let err = codec.decode("2:42:2:v1x").unwrap_err();
        assert_eq!(err.reason(), &MalformedReason::TrailingData);
    }

    #[test]
    fn test_length_prefixed_rejects_non_boundary_length() {
        // "é" is two bytes; a length of 1 splits the character
        let codec = KeyCodec::new(KeyEncoding::LengthPrefixed);
        assert!(codec.decode("1:1:1:é").is_err());
    }

    #[test]
    fn test_encodings_disagree() {
        let k = key(42, "v1");
        let separated = KeyCodec::new(KeyEncoding::Separated).encode(&k);
        let prefixed = KeyCodec::new(KeyEncoding::LengthPrefixed).encode(&k);
        assert_ne!(separated, prefixed);
    }

    #[test]
    fn test_encoding_serde_names() {
        assert_eq!(
            serde_json::to_string(&KeyEncoding::LengthPrefixed).unwrap(),
            "\"length_prefixed\""
        );
        let e: KeyEncoding = serde_json::from_str("\"separated\"").unwrap();
        assert_eq!(e, KeyEncoding::Separated);
    }
}
