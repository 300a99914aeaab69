use once_cell::sync::Lazy;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::a025_affiliate_order::Dataset;
use crate::shared::config;

/// Uploads of the running process, keyed by upload id
pub static UPLOADS: Lazy<UploadStore> =
    Lazy::new(|| UploadStore::new(config::current().upload.max_sessions));

#[derive(Default)]
struct Slots {
    datasets: HashMap<Uuid, Arc<Dataset>>,
    /// Insertion order, oldest first
    order: VecDeque<Uuid>,
}

/// In-memory holder of normalized uploads. Nothing is written to disk.
pub struct UploadStore {
    capacity: usize,
    slots: RwLock<Slots>,
}

impl UploadStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            slots: RwLock::new(Slots::default()),
        }
    }

    /// Stores a dataset under a fresh id, discarding the oldest beyond capacity
    pub fn insert(&self, dataset: Dataset) -> Uuid {
        let id = Uuid::new_v4();
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());

        slots.datasets.insert(id, Arc::new(dataset));
        slots.order.push_back(id);

        while slots.order.len() > self.capacity {
            if let Some(evicted) = slots.order.pop_front() {
                slots.datasets.remove(&evicted);
                tracing::info!("Upload {} evicted, store holds {} uploads", evicted, self.capacity);
            }
        }
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<Dataset>> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.datasets.get(id).cloned()
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.order.retain(|existing| existing != id);
        slots.datasets.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let store = UploadStore::new(4);
        assert!(store.is_empty());

        let id = store.insert(Dataset::default());
        assert!(store.get(&id).is_some());
        assert_eq!(store.len(), 1);

        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_oldest_upload_is_evicted() {
        let store = UploadStore::new(2);
        let first = store.insert(Dataset::default());
        let second = store.insert(Dataset::default());
        let third = store.insert(Dataset::default());

        assert!(store.get(&first).is_none());
        assert!(store.get(&second).is_some());
        assert!(store.get(&third).is_some());
        assert_eq!(store.len(), 2);
    }
}
