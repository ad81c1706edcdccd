//! Snapshot cache keyed by interface id, plus one entry for the full list.
//!
//! The cache is an optimization only, but a stale entry is a bug: every successful save or
//! delete of an id must drop that id's entry and the list entry.

use crate::model::InterfaceDefinition;
use crate::store::record_key;
use ahash::AHashMap;
use parking_lot::Mutex;
use tracing::debug;

#[derive(Default)]
pub struct DefinitionCache {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    details: AHashMap<String, InterfaceDefinition>,
    list: Option<Vec<InterfaceDefinition>>,
}

impl DefinitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot for `id`, normalized on the way out.
    pub fn get(&self, id: &str) -> Option<InterfaceDefinition> {
        let key = record_key(id);
        let hit = self.inner.lock().details.get(&key).map(|d| d.normalized());
        debug!(id = %key, hit = hit.is_some(), "Detail cache lookup");
        hit
    }

    pub fn put(&self, def: &InterfaceDefinition) {
        self.inner
            .lock()
            .details
            .insert(record_key(&def.id), def.clone());
    }

    pub fn get_list(&self) -> Option<Vec<InterfaceDefinition>> {
        let hit = self
            .inner
            .lock()
            .list
            .as_ref()
            .map(|defs| defs.iter().map(|d| d.normalized()).collect::<Vec<_>>());
        debug!(hit = hit.is_some(), "List cache lookup");
        hit
    }

    pub fn put_list(&self, defs: &[InterfaceDefinition]) {
        self.inner.lock().list = Some(defs.to_vec());
    }

    /// Drops the entry for `id` and the list entry.
    pub fn invalidate(&self, id: &str) {
        let key = record_key(id);
        let mut inner = self.inner.lock();
        inner.details.remove(&key);
        inner.list = None;
        debug!(id = %key, "Cache invalidated");
    }

    /// Whether anything is cached for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.inner.lock().details.contains_key(&record_key(id))
    }

    pub fn has_list(&self) -> bool {
        self.inner.lock().list.is_some()
    }
}
