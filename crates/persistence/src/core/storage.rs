//! Material collection access.
//!
//! This module defines the [`MaterialStorage`] trait. Records are read-only
//! through this interface; they are populated by an ingestion pipeline that
//! lives outside this workspace.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageResult;
use crate::types::{RecordId, StoredDocument};

/// Read access to the material collection.
///
/// All lookups are point reads by identifier or offset/limit scans in the
/// store's natural order; no secondary indexes are assumed.
///
/// # Example
///
/// ```ignore
/// use matdb_persistence::core::MaterialStorage;
/// use matdb_persistence::types::RecordId;
///
/// async fn example<S: MaterialStorage>(storage: &S) -> StorageResult<()> {
///     let id = RecordId::parse("671e1961ab159a6f6ac9fddb")?;
///     if let Some(doc) = storage.read(&id).await? {
///         println!("{}", doc.content()["formula"]);
///     }
///     println!("{} records", storage.count().await?);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait MaterialStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Reads a record by identifier.
    ///
    /// Returns `None` when no record has this identifier.
    async fn read(&self, id: &RecordId) -> StorageResult<Option<StoredDocument>>;

    /// Returns every record in store order.
    ///
    /// Unbounded: only suitable for small collections.
    async fn list_all(&self) -> StorageResult<Vec<StoredDocument>>;

    /// Returns up to `limit` records after skipping `skip`, in store order.
    ///
    /// When `fields` is given, each record only carries `_id` plus the listed
    /// top-level fields.
    async fn list_page(
        &self,
        skip: u64,
        limit: u64,
        fields: Option<&[&str]>,
    ) -> StorageResult<Vec<StoredDocument>>;

    /// Counts the records in the collection.
    async fn count(&self) -> StorageResult<u64>;

    /// Returns the listed top-level fields of every record.
    ///
    /// Each entry is an object holding the fields that are present; missing
    /// fields are simply absent.
    async fn scan_fields(&self, fields: &[&str]) -> StorageResult<Vec<Value>>;

    /// Checks whether a record exists.
    async fn exists(&self, id: &RecordId) -> StorageResult<bool> {
        Ok(self.read(id).await?.is_some())
    }
}
