//! MongoDB backend construction.

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use mongodb::bson::{Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BackendError, StorageError, StorageResult};

const BACKEND_NAME: &str = "mongodb";

/// MongoDB duplicate key error code.
const DUPLICATE_KEY: i32 = 11000;

/// Configuration for the MongoDB backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoBackendConfig {
    /// Connection string.
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database name.
    #[serde(default = "default_database")]
    pub database: String,

    /// Material record collection.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// User credential collection.
    #[serde(default = "default_user_collection")]
    pub user_collection: String,

    /// Per-operation timeout in milliseconds.
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "carbon_et".to_string()
}

fn default_collection() -> String {
    "stable_structures".to_string()
}

fn default_user_collection() -> String {
    "users".to_string()
}

fn default_operation_timeout_ms() -> u64 {
    5000
}

impl Default for MongoBackendConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
            user_collection: default_user_collection(),
            operation_timeout_ms: default_operation_timeout_ms(),
        }
    }
}

/// MongoDB store for material records and user credentials.
#[derive(Clone)]
pub struct MongoBackend {
    database: Database,
    pub(super) materials: Collection<Document>,
    pub(super) users: Collection<Document>,
    config: MongoBackendConfig,
}

impl Debug for MongoBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoBackend")
            .field("database", &self.config.database)
            .field("collection", &self.config.collection)
            .field("user_collection", &self.config.user_collection)
            .finish_non_exhaustive()
    }
}

impl MongoBackend {
    /// Connects to MongoDB.
    ///
    /// The driver connects lazily; use [`MongoBackend::init`] to verify the
    /// server is reachable.
    pub async fn connect(config: MongoBackendConfig) -> StorageResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })
        })?;
        let timeout = Duration::from_millis(config.operation_timeout_ms);
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = Client::with_options(options).map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })
        })?;

        let database = client.database(&config.database);
        info!(
            database = %config.database,
            collection = %config.collection,
            "Initialized MongoDB backend"
        );

        Ok(Self {
            materials: database.collection(&config.collection),
            users: database.collection(&config.user_collection),
            database,
            config,
        })
    }

    /// Pings the server and ensures the unique index on user emails.
    pub async fn init(&self) -> StorageResult<()> {
        self.timed("ping", async {
            self.database.run_command(doc! { "ping": 1 }).await
        })
        .await?;

        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.timed("create_index", async { self.users.create_index(index).await })
            .await?;

        debug!("MongoDB user email index ensured");
        Ok(())
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &MongoBackendConfig {
        &self.config
    }

    /// Runs a driver call under the configured timeout.
    pub(super) async fn timed<T, F>(&self, operation: &str, fut: F) -> StorageResult<T>
    where
        F: Future<Output = Result<T, MongoError>>,
    {
        let timeout_ms = self.config.operation_timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), fut).await {
            Ok(result) => result.map_err(|e| map_driver_error(operation, e)),
            Err(_) => Err(StorageError::Backend(BackendError::Timeout {
                backend_name: BACKEND_NAME.to_string(),
                operation: operation.to_string(),
                timeout_ms,
            })),
        }
    }
}

/// Returns true for a unique index violation.
pub(super) fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn map_driver_error(operation: &str, err: MongoError) -> StorageError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. } => {
            StorageError::Backend(BackendError::Unavailable {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("{}: {}", operation, err),
            })
        }
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            StorageError::Backend(BackendError::SerializationError {
                message: format!("{}: {}", operation, err),
            })
        }
        _ => StorageError::Backend(BackendError::QueryError {
            message: format!("{}: {}", operation, err),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MongoBackendConfig::default();
        assert_eq!(config.database, "carbon_et");
        assert_eq!(config.collection, "stable_structures");
        assert_eq!(config.operation_timeout_ms, 5000);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: MongoBackendConfig =
            serde_json::from_str(r#"{"database": "materials"}"#).unwrap();
        assert_eq!(config.database, "materials");
        assert_eq!(config.user_collection, "users");
    }
}
