use crate::model::TableKind;
use thiserror::Error;

/// Reasons a definition may not be saved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{0}' is empty")]
    MissingRequiredField(&'static str),

    #[error("An interface with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Table block {index} in {kind} has no fields")]
    EmptyTableBlock { kind: TableKind, index: usize },
}

/// Failures reported by the persistence collaborator.
///
/// Messages coming from the collaborator are carried verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Interface definition not found: {0}")]
    NotFound(String),

    #[error("Interface definition already exists: {0}")]
    Duplicate(String),

    #[error("Invalid interface id '{0}': {1}")]
    InvalidId(String, &'static str),

    #[error("{0}")]
    Transport(String),

    #[error("Failed to encode or decode definition '{id}': {message}")]
    Serialization { id: String, message: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Failures of structural edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error(
        "Export row {index} maps reserved parameter '{sap_param}'; removing it requires confirmation"
    )]
    ConfirmationRequired { sap_param: String, index: usize },
}

/// Failures of the editing session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("Element {0} does not exist in the current snapshot")]
    UnknownElement(u64),

    #[error("Interface '{0}' is not marked executable")]
    NotExecutable(String),

    #[error("Nothing to {0}")]
    NoHistory(&'static str),
}

/// Failures while mapping request or response data through a definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("[{interface_id}] Required field missing: {path}")]
    RequiredFieldMissing { interface_id: String, path: String },

    #[error("[{interface_id}] Required table missing: WEB = {web_list}, SAP = {sap_table}")]
    RequiredTableMissing {
        interface_id: String,
        web_list: String,
        sap_table: String,
    },

    #[error(
        "[{interface_id}] No fields configured for table mapping: WEB = {web_list}, SAP = {sap_table}"
    )]
    NoFieldsConfigured {
        interface_id: String,
        web_list: String,
        sap_table: String,
    },

    #[error("[{interface_id}] Field must be array: {web_list}")]
    NotAnArray {
        interface_id: String,
        web_list: String,
    },
}

/// Errors surfaced by [`crate::service::InterfaceService`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
