//! Storage trait implementations for the MongoDB backend.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use serde_json::Value;

use crate::core::{CredentialStorage, MaterialStorage};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::types::{RecordId, StoredDocument, UserCredential};

use super::MongoBackend;
use super::backend::is_duplicate_key;

#[async_trait]
impl MaterialStorage for MongoBackend {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn read(&self, id: &RecordId) -> StorageResult<Option<StoredDocument>> {
        let oid = ObjectId::from_bytes(id.bytes());
        let found = self
            .timed("find_one", async {
                self.materials.find_one(doc! { "_id": oid }).await
            })
            .await?;

        found.map(document_to_stored).transpose()
    }

    async fn list_all(&self) -> StorageResult<Vec<StoredDocument>> {
        let documents: Vec<Document> = self
            .timed("find", async {
                self.materials.find(doc! {}).await?.try_collect().await
            })
            .await?;

        documents.into_iter().map(document_to_stored).collect()
    }

    async fn list_page(
        &self,
        skip: u64,
        limit: u64,
        fields: Option<&[&str]>,
    ) -> StorageResult<Vec<StoredDocument>> {
        let (skip, limit) = page_window(skip, limit);
        let projection = fields.map(projection_document);

        let documents: Vec<Document> = self
            .timed("find_page", async {
                let mut find = self.materials.find(doc! {}).skip(skip).limit(limit);
                if let Some(projection) = projection {
                    find = find.projection(projection);
                }
                find.await?.try_collect().await
            })
            .await?;

        documents.into_iter().map(document_to_stored).collect()
    }

    async fn count(&self) -> StorageResult<u64> {
        self.timed("count_documents", async {
            self.materials.count_documents(doc! {}).await
        })
        .await
    }

    async fn scan_fields(&self, fields: &[&str]) -> StorageResult<Vec<Value>> {
        let mut projection = projection_document(fields);
        projection.insert("_id", 0);

        let documents: Vec<Document> = self
            .timed("scan_fields", async {
                self.materials
                    .find(doc! {})
                    .projection(projection)
                    .await?
                    .try_collect()
                    .await
            })
            .await?;

        Ok(documents
            .into_iter()
            .map(|d| Bson::Document(d).into_relaxed_extjson())
            .collect())
    }
}

#[async_trait]
impl CredentialStorage for MongoBackend {
    async fn find_user(&self, email: &str) -> StorageResult<Option<UserCredential>> {
        let found = self
            .timed("find_user", async {
                self.users.find_one(doc! { "email": email }).await
            })
            .await?;

        found.map(document_to_user).transpose()
    }

    async fn insert_user(&self, user: UserCredential) -> StorageResult<()> {
        let document = bson::to_document(&user).map_err(|e| {
            StorageError::Backend(BackendError::SerializationError {
                message: e.to_string(),
            })
        })?;

        let inserted = self
            .timed("insert_user", async {
                match self.users.insert_one(document).await {
                    Ok(_) => Ok(true),
                    Err(e) if is_duplicate_key(&e) => Ok(false),
                    Err(e) => Err(e),
                }
            })
            .await?;

        if inserted {
            Ok(())
        } else {
            Err(ResourceError::AlreadyExists {
                collection: "users".to_string(),
                key: user.email,
            }
            .into())
        }
    }
}

fn projection_document(fields: &[&str]) -> Document {
    let mut projection = Document::new();
    for field in fields {
        projection.insert(*field, 1);
    }
    projection
}

fn document_to_stored(document: Document) -> StorageResult<StoredDocument> {
    let value = Bson::Document(document).into_relaxed_extjson();
    StoredDocument::from_value(value).map_err(StorageError::from)
}

/// Skip and limit as the server accepts them; both are bounded by `i64::MAX`.
fn page_window(skip: u64, limit: u64) -> (u64, i64) {
    (
        skip.min(i64::MAX as u64),
        i64::try_from(limit).unwrap_or(i64::MAX),
    )
}

/// Decodes a user row. `password_hash` may be stored as binary (bcrypt bytes).
fn document_to_user(mut document: Document) -> StorageResult<UserCredential> {
    let malformed = |message: String| {
        StorageError::Backend(BackendError::SerializationError {
            message: format!("malformed user record: {}", message),
        })
    };

    let binary_hash = match document.get("password_hash") {
        Some(Bson::Binary(binary)) => Some(binary.bytes.clone()),
        _ => None,
    };
    if let Some(bytes) = binary_hash {
        let text = String::from_utf8(bytes).map_err(|e| malformed(e.to_string()))?;
        document.insert("password_hash", text);
    }

    bson::from_document(document).map_err(|e| malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_to_stored_normalizes_object_id() {
        let oid = ObjectId::parse_str("671e1961ab159a6f6ac9fddb").unwrap();
        let stored = document_to_stored(doc! {
            "_id": oid,
            "formula": "C8",
            "Sites": 8,
        })
        .unwrap();

        assert_eq!(stored.id().to_hex(), "671e1961ab159a6f6ac9fddb");
        assert_eq!(stored.content()["_id"], "671e1961ab159a6f6ac9fddb");
        assert_eq!(stored.content()["Sites"], 8);
    }

    #[test]
    fn test_page_window_stays_in_i64() {
        assert_eq!(page_window(20, 10), (20, 10));
        assert_eq!(page_window(u64::MAX, u64::MAX), (i64::MAX as u64, i64::MAX));
    }

    #[test]
    fn test_user_with_binary_hash() {
        let hash = "$2b$12$EixZaYVK1fsbw1ZfbX3OXePaWxn96p36WQoeG6Lruj3vjPGga31lW";
        let user = document_to_user(doc! {
            "_id": ObjectId::new(),
            "firstname": "Grace",
            "email": "old@example.org",
            "password_hash": Bson::Binary(bson::Binary {
                subtype: bson::spec::BinarySubtype::Generic,
                bytes: hash.as_bytes().to_vec(),
            }),
        })
        .unwrap();

        assert_eq!(user.first_name, "Grace");
        assert_eq!(user.password_hash, hash);
    }

    #[test]
    fn test_user_with_text_hash() {
        let user = document_to_user(doc! {
            "email": "ada@example.org",
            "password_hash": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
        })
        .unwrap();
        assert_eq!(user.first_name, "");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_projection_document() {
        let projection = projection_document(&["formula", "Sites"]);
        assert_eq!(projection.get_i32("formula").unwrap(), 1);
        assert_eq!(projection.len(), 2);
    }
}
