//! Application state for the materials database API.
//!
//! The store handle is injected here and handed to the services per request,
//! so handlers never reach for a process-wide database singleton.

use std::sync::Arc;

use matdb_persistence::core::{CredentialStorage, MaterialStorage};

use crate::config::ServerConfig;
use crate::services::{ChartService, CredentialService, ExportService, QueryService};

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type
///
/// # Example
///
/// ```rust
/// use matdb_persistence::backends::memory::MemoryBackend;
/// use matdb_rest::{AppState, ServerConfig};
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(MemoryBackend::new()), ServerConfig::default());
/// assert_eq!(state.config().summary_page_size, 10);
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> AppState<S>
where
    S: MaterialStorage + CredentialStorage,
{
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Query service over the material collection.
    pub fn query(&self) -> QueryService<'_, S> {
        QueryService::new(self.storage(), self.config.summary_page_size)
    }

    /// Credential service over the user collection.
    pub fn credentials(&self) -> CredentialService<'_, S> {
        CredentialService::new(self.storage())
    }

    /// Structure and catalogue export service.
    pub fn exports(&self) -> ExportService<'_, S> {
        ExportService::new(self.storage(), &self.config.csv_path)
    }

    /// Chart aggregation service.
    pub fn charts(&self) -> ChartService<'_, S> {
        ChartService::new(
            self.storage(),
            self.config.chart_top_space_groups,
            self.config.chart_histogram_bins,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use matdb_persistence::error::StorageResult;
    use matdb_persistence::types::{RecordId, StoredDocument, UserCredential};
    use serde_json::Value;

    // Mock storage for testing
    struct MockStorage;

    #[async_trait]
    impl MaterialStorage for MockStorage {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn read(&self, _id: &RecordId) -> StorageResult<Option<StoredDocument>> {
            unimplemented!()
        }

        async fn list_all(&self) -> StorageResult<Vec<StoredDocument>> {
            unimplemented!()
        }

        async fn list_page(
            &self,
            _skip: u64,
            _limit: u64,
            _fields: Option<&[&str]>,
        ) -> StorageResult<Vec<StoredDocument>> {
            unimplemented!()
        }

        async fn count(&self) -> StorageResult<u64> {
            unimplemented!()
        }

        async fn scan_fields(&self, _fields: &[&str]) -> StorageResult<Vec<Value>> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl CredentialStorage for MockStorage {
        async fn find_user(&self, _email: &str) -> StorageResult<Option<UserCredential>> {
            unimplemented!()
        }

        async fn insert_user(&self, _user: UserCredential) -> StorageResult<()> {
            unimplemented!()
        }
    }

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(Arc::new(MockStorage), ServerConfig::default());

        assert_eq!(state.storage().backend_name(), "mock");
        assert_eq!(state.config().port, 8000);
    }

    #[test]
    fn test_app_state_config_access() {
        let config = ServerConfig {
            summary_page_size: 25,
            chart_histogram_bins: 4,
            ..Default::default()
        };
        let state = AppState::new(Arc::new(MockStorage), config);

        assert_eq!(state.config().summary_page_size, 25);
        assert_eq!(state.config().chart_histogram_bins, 4);
    }

    #[test]
    fn test_app_state_clone_shares_storage() {
        let state = AppState::new(Arc::new(MockStorage), ServerConfig::default());
        let cloned = state.clone();

        assert!(std::ptr::eq(state.storage(), cloned.storage()));
    }
}
