//! Per-run memo of rendered pages.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Rendered HTML keyed by [`crate::model::Document::cache_key`].
///
/// Values are computed outside the lock. When two tasks race on one key the
/// first insert wins and both callers get that stored value.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: Mutex<HashMap<String, String>>,
}

impl RenderCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value for `key`, computing and inserting it if absent.
    pub fn get_or_insert_with(&self, key: &str, compute: impl FnOnce() -> String) -> String {
        if let Some(hit) = self.get(key) {
            tracing::trace!(key, "render cache hit");
            return hit;
        }
        let value = compute();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.entry(key.to_string()).or_insert(value).clone()
    }

    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn second_lookup_skips_computation() {
        let cache = RenderCache::new();
        let first = cache.get_or_insert_with("k", || "html".to_string());
        let second = cache.get_or_insert_with("k", || unreachable!("cached"));
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn starts_empty() {
        assert_eq!(RenderCache::new().len(), 0);
    }

    #[test]
    fn distinct_keys_are_independent() {
        let cache = RenderCache::new();
        cache.get_or_insert_with("/a::A", || "a".to_string());
        cache.get_or_insert_with("/b::B", || "b".to_string());
        assert_eq!(cache.get("/a::A").as_deref(), Some("a"));
        assert_eq!(cache.get("/b::B").as_deref(), Some("b"));
        assert!(cache.get("/c::C").is_none());
    }

    #[test]
    fn first_insert_wins_under_contention() {
        let cache = Arc::new(RenderCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_insert_with("k", || format!("v{i}")))
            })
            .collect();
        let values: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let stored = cache.get("k").unwrap();
        assert!(values.iter().all(|v| *v == stored));
    }
}
