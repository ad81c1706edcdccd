//! Directory-backed store: one `<ID>.json` document per definition.

use super::{InterfaceStore, SaveMode, record_key};
use crate::error::StoreError;
use crate::model::InterfaceDefinition;
use crate::normalize::normalize;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const EXTENSION: &str = "json";

/// Stores each definition as `{"interface": {...}}` in `<root>/<ID>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The record file for `id`. Ids that would name anything other than a plain file
    /// directly under the root are rejected.
    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let key = record_key(id);
        validate_key(&key)?;
        Ok(self.root.join(format!("{}.{}", key, EXTENSION)))
    }

    fn read_definition(path: &Path) -> Result<InterfaceDefinition, StoreError> {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = fs::read_to_string(path).map_err(|e| {
            StoreError::Transport(format!("Could not read file '{}': {}", path.display(), e))
        })?;
        let raw: Value = serde_json::from_str(&text).map_err(|e| StoreError::Serialization {
            id,
            message: e.to_string(),
        })?;
        Ok(normalize(&raw))
    }
}

#[async_trait]
impl InterfaceStore for FileStore {
    async fn fetch_one(&self, id: &str) -> Result<InterfaceDefinition, StoreError> {
        let path = self.path_for(id)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(record_key(id)));
        }
        debug!(path = %path.display(), "Loading interface definition");
        Self::read_definition(&path)
    }

    async fn fetch_all(&self) -> Result<Vec<InterfaceDefinition>, StoreError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.root).map_err(|e| {
            StoreError::Transport(format!(
                "Could not list directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        let mut defs = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read_definition(&path) {
                Ok(def) => defs.push(def),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable definition"),
            }
        }
        defs.sort_by(|a, b| record_key(&a.id).cmp(&record_key(&b.id)));
        debug!(count = defs.len(), "Loaded interface definitions");
        Ok(defs)
    }

    async fn save(&self, def: &InterfaceDefinition, mode: SaveMode) -> Result<(), StoreError> {
        let path = self.path_for(&def.id)?;
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::Transport(format!(
                "Could not create directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;
        let document = json!({ "interface": def });
        let text =
            serde_json::to_string_pretty(&document).map_err(|e| StoreError::Serialization {
                id: def.id.clone(),
                message: e.to_string(),
            })?;
        let written = match mode {
            SaveMode::Create => write_new(&path, text.as_bytes()),
            SaveMode::Overwrite => write_replace(&path, text.as_bytes()),
        };
        written.map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => StoreError::Duplicate(record_key(&def.id)),
            _ => StoreError::Transport(format!(
                "Could not write file '{}': {}",
                path.display(),
                e
            )),
        })?;
        info!(path = %path.display(), "Interface definition saved");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            warn!(path = %path.display(), "File not found for deletion");
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| {
            StoreError::Transport(format!("Failed to delete file '{}': {}", path.display(), e))
        })?;
        info!(path = %path.display(), "Interface definition deleted");
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let reason = if key.is_empty() {
        Some("id is empty")
    } else if key.contains(['/', '\\']) {
        Some("id contains a path separator")
    } else if key.contains("..") || key.starts_with('.') {
        Some("id contains a relative path component")
    } else if key.chars().any(char::is_control) {
        Some("id contains control characters")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(StoreError::InvalidId(key.to_string(), reason)),
        None => Ok(()),
    }
}

/// Writes a record that must not exist yet. Fails with `AlreadyExists` otherwise.
fn write_new(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut f = OpenOptions::new().write(true).create_new(true).open(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

/// Replaces a record through a synced sibling file so readers never see a partial document.
fn write_replace(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    let written = fs::File::create(&tmp).and_then(|mut f| {
        f.write_all(bytes)?;
        f.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
