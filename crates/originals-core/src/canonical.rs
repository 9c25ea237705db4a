//! # Canonical Serialization — JCS-Compatible Canonicalization
//!
//! Defines [`CanonicalBytes`], the sole construction path for bytes used in
//! digest and signature-preimage computation across the SDK.
//!
//! ## Security Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct `CanonicalBytes`
//! is through [`CanonicalBytes::new()`], which applies the coercion pipeline
//! below before serialization. This makes "wrong serialization path" defects
//! structurally impossible — every credential digest, update-log digest, and
//! signature preimage in the system flows through this type.
//!
//! ## Coercion rules
//!
//! 1. **Reject floats** — a `serde_json::Number` that is only representable
//!    as `f64` (not `i64`/`u64`) is rejected with
//!    [`CanonicalizationError::FloatRejected`]. Amounts and other numeric
//!    fields in credentials must be strings or integers.
//! 2. **Normalize datetimes** — strings that parse as RFC 3339 timestamps are
//!    normalized to UTC ISO 8601 with `Z` suffix, truncated to seconds.
//! 3. **Sort object keys** — `serde_json::Map` iterates in `BTreeMap` order
//!    (lexicographic), which `serde_json::to_vec` preserves.
//! 4. **Compact separators, UTF-8, no BOM** — `serde_json::to_vec` already
//!    produces compact output with no escaping of non-ASCII characters.
//!
//! Implements spec §4.1.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS-compatible canonicalization.
///
/// The inner `Vec<u8>` is private — downstream code cannot construct
/// `CanonicalBytes` except through [`CanonicalBytes::new()`] or
/// [`CanonicalBytes::from_value()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if any numeric value
    /// is a non-integer float, or [`CanonicalizationError::SerializationFailed`]
    /// if the value cannot be represented as JSON (cyclic structures cannot
    /// arise from `Serialize` but malformed maps with non-finite numbers do).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Self::from_value(value)
    }

    /// Construct canonical bytes from a pre-existing `serde_json::Value`.
    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        let coerced = coerce_json_value(value)?;
        let bytes = serde_json::to_vec(&coerced)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length of the canonical byte representation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte representation is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenate two canonical byte strings, as required when computing a
    /// digest over `proof_options || document` (spec §4.4) or
    /// `previous_entry || current_state` (spec §4.6).
    pub fn concat(a: &CanonicalBytes, b: &CanonicalBytes) -> Vec<u8> {
        let mut out = Vec::with_capacity(a.len() + b.len());
        out.extend_from_slice(a.as_bytes());
        out.extend_from_slice(b.as_bytes());
        out
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively coerce JSON values per the canonicalization rules above.
fn coerce_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Number(ref n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                return Err(CanonicalizationError::FloatRejected(
                    n.as_f64().unwrap_or(f64::NAN),
                ));
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
        Value::String(ref s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                let utc = dt.with_timezone(&chrono::Utc);
                Ok(Value::String(utc.format("%Y-%m-%dT%H:%M:%SZ").to_string()))
            } else {
                Ok(value)
            }
        }
        other => Ok(other),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    fn arb_json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-1_000_000_000i64..1_000_000_000i64)
                .prop_map(|n| Value::Number(serde_json::Number::from(n))),
            "[a-zA-Z0-9 _-]{0,30}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 64, 10, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                prop::collection::btree_map("[a-z_]{1,8}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_is_deterministic(value in arb_json_value()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        #[test]
        fn canonical_keys_are_sorted(
            keys in prop::collection::btree_set("[a-z]{1,8}", 1..10),
            val in -100i64..100i64,
        ) {
            let obj: serde_json::Map<String, Value> = keys
                .iter()
                .map(|k| (k.clone(), Value::Number(serde_json::Number::from(val))))
                .collect();
            let cb = CanonicalBytes::new(&Value::Object(obj)).unwrap();
            let reparsed: serde_json::Map<String, Value> =
                serde_json::from_slice(cb.as_bytes()).unwrap();
            let result_keys: Vec<&String> = reparsed.keys().collect();
            let mut sorted = result_keys.clone();
            sorted.sort();
            prop_assert_eq!(result_keys, sorted);
        }

        #[test]
        fn canonical_roundtrip_is_stable(value in arb_json_value()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let reparsed: Value = serde_json::from_slice(cb.as_bytes()).unwrap();
            let cb2 = CanonicalBytes::new(&reparsed).unwrap();
            prop_assert_eq!(cb.as_bytes(), cb2.as_bytes());
        }
    }
}
