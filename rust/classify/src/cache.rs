// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification result cache.
//!
//! Keyed by layer signature (name plus entity mix), so a document with the
//! same layer appearing across sheets pays for one model call. The store is
//! an explicit, swappable value rather than a process-wide singleton.

use rustc_hash::FxHashMap;

use crate::types::Classification;

/// Key-value store for classification results.
pub trait LayerCache: Send + Sync {
    fn get(&self, signature: &str) -> Option<Classification>;
    fn put(&mut self, signature: String, classification: Classification);
}

/// Bounded in-memory cache for a single pipeline run. No eviction: once
/// full, further inserts are ignored: a run touches each distinct layer
/// signature once anyway, the bound only guards pathological documents.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: FxHashMap<String, Classification>,
    capacity: usize,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LayerCache for MemoryCache {
    fn get(&self, signature: &str) -> Option<Classification> {
        self.entries.get(signature).cloned()
    }

    fn put(&mut self, signature: String, classification: Classification) {
        if self.entries.len() < self.capacity || self.entries.contains_key(&signature) {
            self.entries.insert(signature, classification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementType;

    fn classification(t: ElementType) -> Classification {
        Classification {
            element_type: t,
            confidence: 85,
            reasoning: "test".into(),
        }
    }

    #[test]
    fn test_round_trip() {
        let mut cache = MemoryCache::new(8);
        cache.put("sig".into(), classification(ElementType::Wall));
        assert_eq!(
            cache.get("sig").unwrap().element_type,
            ElementType::Wall
        );
        assert!(cache.get("other").is_none());
    }

    #[test]
    fn test_capacity_bound() {
        let mut cache = MemoryCache::new(2);
        cache.put("a".into(), classification(ElementType::Wall));
        cache.put("b".into(), classification(ElementType::Door));
        cache.put("c".into(), classification(ElementType::Window));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("c").is_none());
        // Existing keys can still be refreshed at capacity
        cache.put("a".into(), classification(ElementType::Floor));
        assert_eq!(cache.get("a").unwrap().element_type, ElementType::Floor);
    }
}
