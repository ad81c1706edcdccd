//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the rfcmap crate.
//!
//! # Example
//!
//! ```rust
//! use rfcmap::prelude::*;
//!
//! let config = MapperConfig::builder().with_default_user_id("qa").build();
//! let def = config.new_definition("ORDER_CREATE");
//! assert_eq!(def.export_mapping.len(), 2);
//!
//! let payload = project(&def, None);
//! assert_eq!(payload.user_id, "test");
//! ```

// Model
pub use crate::model::{
    ExportField, Field, ImportField, InputTable, InterfaceDefinition, ReservedExports,
    ReturnTable, ScalarKind, TableBlock, TableField, TableKind,
};

// Normalization and type catalog
pub use crate::catalog::SapType;
pub use crate::normalize::{Normalize, normalize};

// Editing
pub use crate::editor::{Editor, ElementId, Location};
pub use crate::mutation::{
    Confirmation, FieldEdit, HeaderEdit, MappingKind, Mutation, TableEdit,
};

// Projection and runtime mapping
pub use crate::engine::{MappingEngine, RemoteRequest, RemoteResponse};
pub use crate::projection::{InvocationPayload, project};

// Persistence
pub use crate::service::InterfaceService;
pub use crate::store::{FileStore, InterfaceStore, MemoryStore, SaveMode};

// Configuration
pub use crate::config::{EmptyTablePolicy, MapperConfig};

// Error types
pub use crate::error::{
    EditError, MappingError, MutationError, ServiceError, StoreError, ValidationError,
};
