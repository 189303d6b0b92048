//! In-memory backend construction and seeding.

use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::info;

use crate::error::{BackendError, ResourceError, StorageError, StorageResult, ValidationError};
use crate::types::{ID_FIELD, RecordId, StoredDocument, UserCredential};

/// In-process store for material records and user credentials.
///
/// Cloning is cheap and clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    pub(super) materials: Arc<RwLock<Vec<StoredDocument>>>,
    pub(super) users: Arc<RwLock<Vec<UserCredential>>>,
}

impl Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("materials", &self.materials.read().len())
            .field("users", &self.users.read().len())
            .finish()
    }
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a material record and returns its identifier.
    ///
    /// A valid `_id` in the record is kept; otherwise a fresh one is
    /// assigned. Inserting a second record with an existing `_id` fails.
    pub fn insert_material(&self, content: Value) -> StorageResult<RecordId> {
        if !content.is_object() {
            return Err(ValidationError::InvalidDocument {
                message: "material record must be a JSON object".to_string(),
            }
            .into());
        }

        let doc = match content.get(ID_FIELD) {
            Some(_) => StoredDocument::from_value(content)?,
            None => StoredDocument::new(RecordId::generate(), content),
        };
        let id = doc.id();

        let mut materials = self.materials.write();
        if materials.iter().any(|existing| existing.id() == id) {
            return Err(ResourceError::AlreadyExists {
                collection: "materials".to_string(),
                key: id.to_hex(),
            }
            .into());
        }
        materials.push(doc);

        Ok(id)
    }

    /// Seeds the backend from a JSON file holding an array of records.
    ///
    /// Returns the number of records loaded.
    pub async fn load_json_file<P: AsRef<Path>>(&self, path: P) -> StorageResult<usize> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::Backend(BackendError::Internal {
                backend_name: "memory".to_string(),
                message: format!("failed to read seed file {}: {}", path.display(), e),
                source: Some(Box::new(e)),
            })
        })?;

        let records: Vec<Value> = serde_json::from_str(&raw).map_err(|e| {
            StorageError::Backend(BackendError::SerializationError {
                message: format!("seed file {} is not a JSON array: {}", path.display(), e),
            })
        })?;

        let count = records.len();
        for record in records {
            self.insert_material(record)?;
        }

        info!(path = %path.display(), count, "Seeded memory backend");
        Ok(count)
    }

    /// Number of material records held.
    pub fn len(&self) -> usize {
        self.materials.read().len()
    }

    /// Returns true when no material records are held.
    pub fn is_empty(&self) -> bool {
        self.materials.read().is_empty()
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_assigns_id() {
        let backend = MemoryBackend::new();
        let id = backend.insert_material(json!({"formula": "C4"})).unwrap();
        let materials = backend.materials.read();
        assert_eq!(materials[0].id(), id);
        assert_eq!(materials[0].content()["_id"], id.to_hex());
    }

    #[test]
    fn test_insert_keeps_provided_id() {
        let backend = MemoryBackend::new();
        let id = backend
            .insert_material(json!({"_id": {"$oid": "671e1961ab159a6f6ac9fddb"}}))
            .unwrap();
        assert_eq!(id.to_hex(), "671e1961ab159a6f6ac9fddb");
    }

    #[test]
    fn test_insert_duplicate_id_fails() {
        let backend = MemoryBackend::new();
        let record = json!({"_id": "671e1961ab159a6f6ac9fddb"});
        backend.insert_material(record.clone()).unwrap();
        let err = backend.insert_material(record).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Resource(ResourceError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_insert_rejects_non_object() {
        let backend = MemoryBackend::new();
        assert!(backend.insert_material(json!([1, 2, 3])).is_err());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"[{"formula": "C8"}, {"_id": {"$oid": "671e1961ab159a6f6ac9fddb"}, "formula": "C4"}]"#,
        )
        .unwrap();

        let backend = MemoryBackend::new();
        assert_eq!(backend.load_json_file(&path).await.unwrap(), 2);
        assert_eq!(backend.len(), 2);
    }

    #[tokio::test]
    async fn test_load_json_file_missing() {
        let backend = MemoryBackend::new();
        assert!(backend.load_json_file("/nonexistent/seed.json").await.is_err());
    }
}
