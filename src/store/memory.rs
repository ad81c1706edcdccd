//! In-memory store.

use super::{InterfaceStore, SaveMode, record_key};
use crate::error::StoreError;
use crate::model::InterfaceDefinition;
use crate::normalize::normalize;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Keeps every record as the JSON document a remote store would hold.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `defs`, keyed by their upper-cased ids.
    pub fn with_definitions(defs: impl IntoIterator<Item = InterfaceDefinition>) -> Self {
        let records = defs
            .into_iter()
            .map(|def| (record_key(&def.id), def.to_value()))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Stores a raw document as-is, bypassing normalization. Useful for legacy shapes.
    pub fn insert_raw(&self, id: &str, raw: Value) {
        self.records.write().insert(record_key(id), raw);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl InterfaceStore for MemoryStore {
    async fn fetch_one(&self, id: &str) -> Result<InterfaceDefinition, StoreError> {
        let key = record_key(id);
        self.records
            .read()
            .get(&key)
            .map(normalize)
            .ok_or(StoreError::NotFound(key))
    }

    async fn fetch_all(&self) -> Result<Vec<InterfaceDefinition>, StoreError> {
        Ok(self.records.read().values().map(normalize).collect())
    }

    async fn save(&self, def: &InterfaceDefinition, mode: SaveMode) -> Result<(), StoreError> {
        let key = record_key(&def.id);
        let mut records = self.records.write();
        if mode == SaveMode::Create && records.contains_key(&key) {
            return Err(StoreError::Duplicate(key));
        }
        records.insert(key, def.to_value());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let key = record_key(id);
        if self.records.write().remove(&key).is_none() {
            warn!(id = %key, "Record not found for deletion");
        }
        Ok(())
    }
}
