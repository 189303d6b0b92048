//! REST API test harness.

use axum_test::TestServer;
use matdb_persistence::backends::memory::MemoryBackend;
use matdb_persistence::types::RecordId;
use serde_json::Value;

use matdb_rest::{ServerConfig, create_app_with_config};

/// A test server over an in-memory store.
///
/// The harness keeps a handle on the same backend the server uses, so
/// records seeded after startup are visible to requests.
///
/// # Example
///
/// ```rust,ignore
/// let harness = TestHarness::new();
/// let id = harness.seed(fixtures::diamond());
/// harness.server.get(&format!("/api/material/{}", id)).await.assert_status_ok();
/// ```
pub struct TestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend shared with the server.
    pub backend: MemoryBackend,

    /// Server configuration.
    pub config: ServerConfig,
}

impl TestHarness {
    /// Creates a harness with the test configuration.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates a harness with a custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        let backend = MemoryBackend::new();
        let app = create_app_with_config(backend.clone(), config.clone());
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            backend,
            config,
        }
    }

    /// Seeds one record and returns its identifier.
    pub fn seed(&self, record: Value) -> RecordId {
        self.backend
            .insert_material(record)
            .expect("Failed to seed material")
    }

    /// Seeds `count` generated summary-only records.
    pub fn seed_many(&self, count: usize) -> Vec<RecordId> {
        (0..count)
            .map(|n| self.seed(super::fixtures::numbered(n)))
            .collect()
    }

    /// Returns the path of a record route, e.g. `/api/opt/{id}`.
    pub fn path(route: &str, id: &RecordId) -> String {
        format!("{}/{}", route, id.to_hex())
    }
}
