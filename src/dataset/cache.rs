use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::{ClassifiedDataset, SourceKey};

/// Number of classified datasets kept by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Memoized classification results keyed by source identity.
///
/// Owned by a single dashboard session. Entries beyond the capacity are
/// evicted oldest-first.
#[derive(Debug)]
pub struct DatasetCache {
    capacity: usize,
    entries: HashMap<SourceKey, Arc<ClassifiedDataset>>,
    order: VecDeque<SourceKey>,
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl DatasetCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: &SourceKey) -> Option<Arc<ClassifiedDataset>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, dataset: ClassifiedDataset) -> Arc<ClassifiedDataset> {
        let key = dataset.key().clone();
        let shared = Arc::new(dataset);
        if self.entries.insert(key.clone(), Arc::clone(&shared)).is_none() {
            self.order.push_back(key);
        }
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
                tracing::debug!("Evicted cached dataset {evicted}");
            }
        }
        shared
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
