//! Storage trait implementations for the in-memory backend.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::{CredentialStorage, MaterialStorage};
use crate::error::{ResourceError, StorageResult};
use crate::types::{RecordId, StoredDocument, UserCredential};

use super::MemoryBackend;

#[async_trait]
impl MaterialStorage for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn read(&self, id: &RecordId) -> StorageResult<Option<StoredDocument>> {
        Ok(self
            .materials
            .read()
            .iter()
            .find(|doc| doc.id() == *id)
            .cloned())
    }

    async fn list_all(&self) -> StorageResult<Vec<StoredDocument>> {
        Ok(self.materials.read().clone())
    }

    async fn list_page(
        &self,
        skip: u64,
        limit: u64,
        fields: Option<&[&str]>,
    ) -> StorageResult<Vec<StoredDocument>> {
        let materials = self.materials.read();
        let page = materials
            .iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(match fields {
            Some(fields) => page.map(|doc| doc.project(fields)).collect(),
            None => page.cloned().collect(),
        })
    }

    async fn count(&self) -> StorageResult<u64> {
        Ok(self.materials.read().len() as u64)
    }

    async fn scan_fields(&self, fields: &[&str]) -> StorageResult<Vec<Value>> {
        Ok(self
            .materials
            .read()
            .iter()
            .map(|doc| {
                let mut row = Map::new();
                for field in fields {
                    if let Some(value) = doc.content().get(*field) {
                        row.insert((*field).to_string(), value.clone());
                    }
                }
                Value::Object(row)
            })
            .collect())
    }
}

#[async_trait]
impl CredentialStorage for MemoryBackend {
    async fn find_user(&self, email: &str) -> StorageResult<Option<UserCredential>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: UserCredential) -> StorageResult<()> {
        let mut users = self.users.write();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(ResourceError::AlreadyExists {
                collection: "users".to_string(),
                key: user.email,
            }
            .into());
        }
        users.push(user);
        Ok(())
    }
}
