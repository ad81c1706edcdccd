use crate::cache::DefinitionCache;
use crate::config::MapperConfig;
use crate::error::ServiceError;
use crate::model::InterfaceDefinition;
use crate::store::{InterfaceStore, SaveMode};
use crate::validation::validate_for_save;
use tracing::info;

/// Loads, saves and deletes definitions through a store, keeping the snapshot cache
/// coherent with every successful write.
///
/// The service does not serialize concurrent operations on the same definition; callers
/// are expected to wait for a save to finish before issuing the next one.
pub struct InterfaceService<S> {
    store: S,
    cache: DefinitionCache,
    config: MapperConfig,
}

impl<S: InterfaceStore> InterfaceService<S> {
    pub fn new(store: S, config: MapperConfig) -> Self {
        Self {
            store,
            cache: DefinitionCache::new(),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &DefinitionCache {
        &self.cache
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// A fresh definition for authoring a new id.
    pub fn new_definition(&self, id: impl Into<String>) -> InterfaceDefinition {
        self.config.new_definition(id)
    }

    /// All definitions, normalized.
    pub async fn list(&self) -> Result<Vec<InterfaceDefinition>, ServiceError> {
        if let Some(defs) = self.cache.get_list() {
            return Ok(defs);
        }
        let defs: Vec<_> = self
            .store
            .fetch_all()
            .await?
            .iter()
            .map(InterfaceDefinition::normalized)
            .collect();
        self.cache.put_list(&defs);
        Ok(defs)
    }

    /// One definition, normalized.
    pub async fn load(&self, id: &str) -> Result<InterfaceDefinition, ServiceError> {
        if let Some(def) = self.cache.get(id) {
            return Ok(def);
        }
        let def = self.store.fetch_one(id).await?.normalized();
        self.cache.put(&def);
        Ok(def)
    }

    /// Validates and persists `def` as a full-document overwrite.
    ///
    /// `id` and `rfcFunction` are upper-cased before anything else happens. Returns the
    /// snapshot that was written, which replaces the caller's working copy.
    pub async fn save(
        &self,
        def: &InterfaceDefinition,
        is_create: bool,
    ) -> Result<InterfaceDefinition, ServiceError> {
        let mut prepared = def.normalized();
        prepared.id = prepared.id.trim().to_uppercase();
        prepared.rfc_function = prepared.rfc_function.trim().to_uppercase();

        validate_for_save(
            &prepared,
            is_create,
            &self.store,
            self.config.empty_table_policy,
        )
        .await?;

        let mode = if is_create {
            SaveMode::Create
        } else {
            SaveMode::Overwrite
        };
        self.store.save(&prepared, mode).await?;
        self.cache.invalidate(&prepared.id);
        info!(id = %prepared.id, create = is_create, "Interface saved");
        Ok(prepared)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        self.cache.invalidate(id);
        info!(id = %id, "Interface deleted");
        Ok(())
    }
}
