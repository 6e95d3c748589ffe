//! Ordered, string-keyed value bag that remembers whether it was modified.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value stored in a [`JobDataMap`].
///
/// Equality is structural; floats compare by bit pattern, so `NaN` equals
/// itself and `0.0` differs from `-0.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DataValue {
    /// UTF-8 text.
    String(String),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Nested map, ordered by key.
    Map(BTreeMap<String, DataValue>),
}

impl PartialEq for DataValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for DataValue {}

impl DataValue {
    /// Returns the text if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for DataValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<BTreeMap<String, Self>> for DataValue {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Map(value)
    }
}

/// Map whose dirty flag tracks mutations since construction or the last
/// [`clear_dirty_flag`](Self::clear_dirty_flag).
///
/// Enumeration is always in ascending key order. `Clone` is deep and keeps
/// the dirty flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirtyFlagMap<V> {
    entries: BTreeMap<String, V>,
    dirty: bool,
}

/// Data payload attached to jobs and triggers.
pub type JobDataMap = DirtyFlagMap<DataValue>;

impl<V> Default for DirtyFlagMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            dirty: false,
        }
    }
}

impl<V: Clone + PartialEq> DirtyFlagMap<V> {
    /// Creates an empty, clean map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the map changed since construction or the last clear.
    #[must_use]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// Resets the dirty flag.
    pub fn clear_dirty_flag(&mut self) {
        self.dirty = false;
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Sets a value. The map only turns dirty when the stored value changes.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<V>) {
        let key = key.into();
        let value = value.into();
        if self.entries.get(&key) != Some(&value) {
            self.entries.insert(key, value);
            self.dirty = true;
        }
    }

    /// Merges every entry of `other` through [`put`](Self::put); later values win.
    pub fn put_all(&mut self, other: &Self) {
        for (key, value) in &other.entries {
            self.put(key.clone(), value.clone());
        }
    }

    /// Removes `key`, marking the map dirty if it existed.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Clone + PartialEq> FromIterator<(K, V)> for DirtyFlagMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.put(key, value);
        }
        map
    }
}
