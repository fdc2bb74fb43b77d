//! Vault blob encoding and the shape-tagged decode.
//!
//! The current wire shape is a JSON object:
//!
//! ```text
//! { "credentials": [Credential, ...], "categories": [Category, ...] }
//! ```
//!
//! Early releases wrote a bare JSON array of credentials instead. Decoding
//! parses the blob once and branches on its JSON root:
//!
//! - an **object** is the current shape. Missing fields default to empty,
//!   unknown fields are ignored, so blobs from newer minor versions still
//!   load.
//! - an **array** is the legacy shape, `[Credential, ...]`. Matches report
//!   which shape parsed so the caller can rewrite the blob in the current
//!   form.
//!
//! Any other root is unreadable and the caller decides what to do with it;
//! this module never guesses at partial data.

use serde_json::Value;

use super::model::{Credential, VaultPayload};
use crate::errors::{PassVaultError, Result};

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Which wire shape a blob parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireShape {
    Current,
    Legacy,
}

/// A successfully decoded blob, tagged with the shape that matched.
#[derive(Debug)]
pub struct Decoded {
    pub payload: VaultPayload,
    pub shape: WireShape,
}

/// Decode a vault blob, branching on the JSON root: an object is the
/// current shape, an array is the legacy one.
///
/// The branch keeps the shapes disjoint: serde fills a defaulted struct
/// from an empty JSON sequence, so `[]` — an empty legacy vault — must
/// never reach the current-shape parser.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    let root: Value = serde_json::from_slice(bytes)
        .map_err(|e| PassVaultError::Decode(format!("vault blob is not JSON: {e}")))?;

    match root {
        Value::Object(_) => {
            let payload: VaultPayload = serde_json::from_value(root)
                .map_err(|e| PassVaultError::Decode(format!("current layout: {e}")))?;
            Ok(Decoded {
                payload,
                shape: WireShape::Current,
            })
        }
        Value::Array(_) => {
            let credentials: Vec<Credential> = serde_json::from_value(root)
                .map_err(|e| PassVaultError::Decode(format!("legacy layout: {e}")))?;
            Ok(Decoded {
                payload: VaultPayload {
                    credentials,
                    categories: Vec::new(),
                },
                shape: WireShape::Legacy,
            })
        }
        _ => Err(PassVaultError::Decode(
            "blob matches neither the current nor the legacy layout".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Encode a payload in the current wire shape.
pub fn encode(payload: &VaultPayload) -> Result<Vec<u8>> {
    serde_json::to_vec(payload)
        .map_err(|e| PassVaultError::SerializationError(format!("vault payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::model::seed_categories;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_credential(title: &str) -> Credential {
        Credential {
            id: Uuid::new_v4(),
            title: title.to_string(),
            username: "user@example.com".to_string(),
            password: "pw".to_string(),
            notes: None,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn current_shape_round_trips() {
        let payload = VaultPayload {
            credentials: vec![sample_credential("Gmail"), sample_credential("Bank")],
            categories: seed_categories(),
        };

        let bytes = encode(&payload).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.shape, WireShape::Current);
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn legacy_bare_array_decodes_with_empty_categories() {
        let credentials = vec![sample_credential("Gmail")];
        let bytes = serde_json::to_vec(&credentials).unwrap();

        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.shape, WireShape::Legacy);
        assert_eq!(decoded.payload.credentials, credentials);
        assert!(decoded.payload.categories.is_empty());
    }

    #[test]
    fn legacy_empty_array_still_reads_as_legacy() {
        let decoded = decode(b"[]").unwrap();

        assert_eq!(decoded.shape, WireShape::Legacy);
        assert!(decoded.payload.credentials.is_empty());
    }

    #[test]
    fn empty_object_reads_as_current() {
        // `{}` and `[]` are both valid empty vaults; the root alone
        // decides which shape wrote them.
        let decoded = decode(b"{}").unwrap();

        assert_eq!(decoded.shape, WireShape::Current);
        assert!(decoded.payload.credentials.is_empty());
        assert!(decoded.payload.categories.is_empty());
    }

    #[test]
    fn current_shape_tolerates_missing_and_unknown_fields() {
        // A truncated writer or a newer minor version must still load.
        let decoded = decode(br#"{"credentials": [], "schemaHint": 7}"#).unwrap();

        assert_eq!(decoded.shape, WireShape::Current);
        assert!(decoded.payload.credentials.is_empty());
        assert!(decoded.payload.categories.is_empty());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode(b"\x00\x01not json at all").unwrap_err();
        assert!(matches!(err, PassVaultError::Decode(_)));
    }

    #[test]
    fn a_non_container_root_is_a_decode_error() {
        // Valid JSON, but neither shape starts with a scalar.
        let err = decode(b"\"not a vault\"").unwrap_err();
        assert!(matches!(err, PassVaultError::Decode(_)));
    }

    #[test]
    fn malformed_credential_in_array_is_a_decode_error() {
        // An array of the wrong element type must not silently drop entries.
        let err = decode(br#"[{"title": 42}]"#).unwrap_err();
        assert!(matches!(err, PassVaultError::Decode(_)));
    }
}
