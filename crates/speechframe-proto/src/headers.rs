//! Insertion-ordered header map.
//!
//! Headers are kept in a plain vector of key/value pairs. Frames carry a
//! handful of headers at most, so linear lookup beats hashing, and the vector
//! gives us wire order for free.

use crate::errors::{ProtocolError, Result};

/// Header key for the message route (`speech.config`, `audio`, `turn.end`, ...)
pub const PATH: &str = "Path";

/// Header key for the per-request identifier
pub const REQUEST_ID: &str = "X-RequestId";

/// Header key for the body media type
pub const CONTENT_TYPE: &str = "Content-Type";

/// Ordered header map with unique, case-sensitive keys.
///
/// There is no overwrite-on-insert: [`Headers::insert`] rejects a key that is
/// already present, and [`Headers::replace`] is the only way to change an
/// existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header map
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append a header.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateHeaderKey` if `key` is already present. The map is
    /// left unchanged.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(ProtocolError::DuplicateHeaderKey(key));
        }

        self.entries.push((key, value.into()));
        Ok(())
    }

    /// Set a header, overwriting the value in place if the key exists.
    ///
    /// An existing key keeps its position. Returns the previous value.
    pub fn replace(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            },
        }
    }

    /// Value for `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove `key`, preserving the order of the remaining headers
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate headers in insertion order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no headers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
