use std::collections::HashMap;

use serde_json::Value;

/// Per-run cache of parsed JSON responses keyed by request id.
///
/// An entry for id X exists only after X was executed with a status below
/// 400 and a body that parsed as JSON; resolving a reference to an absent id
/// is always an error, never a default. The store is a plain owned value;
/// the runner owns it and serializes access, so independent runs never see
/// each other's entries unless a store instance is shared on purpose.
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    entries: HashMap<String, Value>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    pub fn put(&mut self, id: impl Into<String>, value: Value) {
        self.entries.insert(id.into(), value);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Empties the store. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn put_then_get_roundtrips() {
        let mut store = ResponseStore::new();
        store.put("a", json!({"x": 1}));
        assert!(store.contains("a"));
        assert_eq!(store.get("a"), Some(&json!({"x": 1})));
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn clear_empties_all_entries() {
        let mut store = ResponseStore::new();
        store.put("a", json!(1));
        store.put("b", json!(2));
        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains("a"));
        store.clear();
        assert!(store.is_empty());
    }
}
