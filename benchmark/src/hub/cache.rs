//! @ai:module:intent Process-lifetime memoization of successful registry resolutions
//! @ai:module:layer infrastructure
//! @ai:module:public_api MemoCache
//! @ai:module:stateless false

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

/// @ai:intent Keyed store of resolved values, only emptied when the process exits
/// @ai:post concurrent misses on the same key may both query; the last insert wins
pub struct MemoCache<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash, V: Clone> MemoCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Cached value for a key
    /// @ai:effects state:read
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// @ai:intent Remember a successful resolution
    /// @ai:effects state:write
    pub fn insert(&self, key: K, value: V) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
