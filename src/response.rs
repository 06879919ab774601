//! Response normalization
//!
//! Gateway responses are heterogeneous: the same field may be missing, null, or
//! nested differently depending on the endpoint and on whether the call failed.
//! Lookups here never fail; they fall back to a caller-chosen default.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Null-safe nested lookup through JSON objects
pub fn lookup<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(body, |value, key| value.get(*key))
        .filter(|value| !value.is_null())
}

/// Nested lookup converted into `T`, or `default` when missing or mistyped
pub fn extract<T: DeserializeOwned>(body: &Value, path: &[&str], default: T) -> T {
    lookup(body, path)
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or(default)
}
