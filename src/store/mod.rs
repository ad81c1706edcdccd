//! The persistence collaborator: where definitions are fetched from and saved to.
//!
//! Every implementation hands back normalized definitions and keys records by the
//! upper-cased interface id. Saves are full-document overwrites.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::model::InterfaceDefinition;
use async_trait::async_trait;

/// How a save treats an existing record with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Fails with [`StoreError::Duplicate`] if the id is taken.
    Create,
    /// Replaces any existing record.
    Overwrite,
}

#[async_trait]
pub trait InterfaceStore: Send + Sync {
    /// Fails with [`StoreError::NotFound`] when no record exists for `id`.
    async fn fetch_one(&self, id: &str) -> Result<InterfaceDefinition, StoreError>;

    /// All records, ordered by id.
    async fn fetch_all(&self) -> Result<Vec<InterfaceDefinition>, StoreError>;

    async fn save(&self, def: &InterfaceDefinition, mode: SaveMode) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// The storage key of an interface id.
pub fn record_key(id: &str) -> String {
    id.trim().to_uppercase()
}
