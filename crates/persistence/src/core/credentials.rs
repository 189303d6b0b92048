//! User credential access.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::UserCredential;

/// Lookup and insertion over the user collection.
///
/// Credentials are append-only: there is no update or delete path.
#[async_trait]
pub trait CredentialStorage: Send + Sync {
    /// Finds the credential registered under `email`.
    async fn find_user(&self, email: &str) -> StorageResult<Option<UserCredential>>;

    /// Inserts a new credential.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(AlreadyExists)` - if the email is already registered
    async fn insert_user(&self, user: UserCredential) -> StorageResult<()>;
}
