//! # Item Options
//!
//! Flat key/value attributes attached to a cart item ("size" → "M",
//! "color" → "red"). Options take part in the item hash, so the same
//! product in two sizes occupies two cart lines.
//!
//! Keys are unique and kept sorted, which is also the order the hash
//! consumes them in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Key/value options for a cart item.
///
/// ## Example
/// ```rust
/// use titan_cart::ItemOptions;
///
/// let options = ItemOptions::from([("size", "M"), ("color", "red")]);
/// assert_eq!(options.get("color"), Some("red"));
/// assert!(options.get("fabric").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ItemOptions(BTreeMap<String, String>);

impl ItemOptions {
    /// Creates an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Checks whether `key` is present.
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merges `other` into this set. Keys from `other` win.
    pub fn merge(&mut self, other: ItemOptions) {
        self.0.extend(other.0);
    }

    /// Returns the entries present in both sets with equal values.
    pub fn intersect(&self, other: &ItemOptions) -> ItemOptions {
        self.0
            .iter()
            .filter(|(key, value)| other.get(key) == Some(value.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Checks that every entry of `other` is present here with the same value.
    pub fn contains_all(&self, other: &ItemOptions) -> bool {
        other
            .iter()
            .all(|(key, value)| self.get(key) == Some(value))
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ItemOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ItemOptions(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ItemOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
