//! Pre-save checks.

use crate::config::EmptyTablePolicy;
use crate::error::{StoreError, ValidationError};
use crate::model::InterfaceDefinition;
use crate::store::{InterfaceStore, record_key};
use tracing::{debug, warn};

/// Structural checks that need no collaborator: `id` and `rfcFunction` must not be blank,
/// and, under [`EmptyTablePolicy::Reject`], every table block must have fields.
pub fn check_structure(
    def: &InterfaceDefinition,
    policy: EmptyTablePolicy,
) -> Result<(), ValidationError> {
    if def.id.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField("id"));
    }
    if def.rfc_function.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField("rfcFunction"));
    }
    if policy == EmptyTablePolicy::Reject {
        if let Some(&(kind, index)) = def.incomplete_tables().first() {
            return Err(ValidationError::EmptyTableBlock { kind, index });
        }
    }
    Ok(())
}

/// Decides whether `def` may be saved.
///
/// When `is_create` is set, the store is asked for an existing record under the
/// upper-cased id and a hit fails with [`ValidationError::DuplicateId`]. A lookup error
/// other than not-found is logged and does not block the save.
pub async fn validate_for_save(
    def: &InterfaceDefinition,
    is_create: bool,
    store: &dyn InterfaceStore,
    policy: EmptyTablePolicy,
) -> Result<(), ValidationError> {
    check_structure(def, policy)?;
    if !is_create {
        return Ok(());
    }

    let key = record_key(&def.id);
    match store.fetch_one(&key).await {
        Ok(_) => Err(ValidationError::DuplicateId(key)),
        Err(StoreError::NotFound(_)) => {
            debug!(id = %key, "No existing record, id is free");
            Ok(())
        }
        Err(e) => {
            warn!(id = %key, error = %e, "Duplicate check failed, proceeding with save");
            Ok(())
        }
    }
}
