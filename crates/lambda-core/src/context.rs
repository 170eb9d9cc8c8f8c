//! Caller-supplied key/value context
//!
//! Generation folds the context into the entropy salt. Validation reads a
//! handful of well-known keys from it. The context never becomes part of
//! the ID itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Context key set when a generation attempt is retried after a collision
pub const KEY_COLLISION_RETRY: &str = "collision_retry";
/// Context key carrying the retry time
pub const KEY_RETRY_TIMESTAMP: &str = "retry_timestamp";

/// Sorted key/value map. Keys are kept ordered so serialization is
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationContext(BTreeMap<String, Value>);

impl GenerationContext {
    pub fn new() -> Self {
        GenerationContext(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value for `key`, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Boolean value for `key`, if present and a bool
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Deterministic serialization: compact JSON with sorted keys at every
    /// nesting level.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.0).unwrap_or_default()
    }
}

impl From<BTreeMap<String, Value>> for GenerationContext {
    fn from(map: BTreeMap<String, Value>) -> Self {
        GenerationContext(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for GenerationContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        GenerationContext(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
