//! Read-through cache of validation results keyed by document content.

use crate::issue::ValidationResult;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Concurrent cache of validation results
///
/// Each key owns a cell that is filled at most once, so concurrent lookups of
/// the same document trigger a single validation and share its result.
///
/// A cache built with [`ValidationCache::new`] grows with every distinct
/// document. Long-lived validators should use
/// [`ValidationCache::with_capacity`], which evicts an arbitrary entry once
/// the limit is reached.
#[derive(Debug, Default)]
pub struct ValidationCache {
    entries: DashMap<String, Arc<OnceCell<ValidationResult>>>,
    capacity: Option<usize>,
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` results (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: Some(capacity.max(1)),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Return the cached result for `key`, computing it on first use
    ///
    /// The flag is `true` when the result came from the cache.
    pub fn get_or_validate<F>(&self, key: &str, validate: F) -> (ValidationResult, bool)
    where
        F: FnOnce() -> ValidationResult,
    {
        if !self.entries.contains_key(key) {
            self.make_room();
        }
        let cell = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let mut computed = false;
        let result = cell.get_or_init(|| {
            computed = true;
            validate()
        });
        (result.clone(), !computed)
    }

    fn make_room(&self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() >= capacity {
            let victim = self.entries.iter().next().map(|entry| entry.key().clone());
            match victim {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|cell| cell.get().is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

/// SHA-256 of the content, hex encoded
pub fn content_key(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
