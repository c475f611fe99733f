//! Dict-like access to a flat string mapping

use crate::error::Result;

/// Borrowing iterator over `(key, value)` pairs
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

/// Flat string-to-string mapping with get/set/delete/contains/iterate
///
/// Implementors normalize keys on every call, so `get("NAME")` and
/// `get("name")` address the same entry.
pub trait KeyValueStore {
    /// Value stored under `key`, or `KeyNotFound`
    fn get(&self, key: &str) -> Result<&str>;

    /// Insert or overwrite, returning the previous value.
    ///
    /// Keys containing `=` and keys or values containing line breaks are
    /// accepted but do not survive a write and re-read.
    fn set(&mut self, key: &str, value: &str) -> Option<String>;

    /// Remove `key`, returning its value, or `KeyNotFound`
    fn delete(&mut self, key: &str) -> Result<String>;

    fn contains_key(&self, key: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pairs in insertion order; each call starts over from current state
    fn entries(&self) -> Entries<'_>;

    /// Pairs sorted by key, the order they are written to disk
    fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self.entries().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}
