//! Server configuration for the materials database API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REST_SERVER_PORT` | 8000 | Server port |
//! | `REST_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REST_LOG_LEVEL` | info | Log level |
//! | `REST_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REST_ENABLE_CORS` | true | Enable CORS |
//! | `REST_CORS_ORIGINS` | * | Allowed origins |
//! | `REST_CORS_METHODS` | * | Allowed methods |
//! | `REST_CORS_HEADERS` | * | Allowed headers |
//! | `REST_STORAGE_BACKEND` | memory | Store backend (`memory` or `mongodb`) |
//! | `MONGO_URI` | - | MongoDB connection string |
//! | `DB` | carbon_et | MongoDB database name |
//! | `COLLECTION` | stable_structures | Material record collection |
//! | `USER_COLLECTION` | users | User credential collection |
//! | `REST_STORE_TIMEOUT_MS` | 5000 | Per-operation store timeout |
//! | `REST_SEED_FILE` | - | JSON array of records loaded into the memory backend |
//! | `REST_CSV_PATH` | static/et_carbon.csv | Catalogue served by `/api/download` |
//! | `REST_SUMMARY_PAGE_SIZE` | 10 | Page size of `/api/materials_summary` |
//! | `REST_CHART_TOP_SPACE_GROUPS` | 20 | Space groups kept in the space group pie |
//! | `REST_CHART_HISTOGRAM_BINS` | 10 | Bins of the sites histogram |
//!
//! # Example
//!
//! ```rust
//! use matdb_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use std::path::PathBuf;

use clap::Parser;
use matdb_persistence::core::BackendKind;

/// Server configuration for the materials database API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "matdb")]
#[command(about = "Carbon materials database REST API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "REST_SERVER_PORT", default_value = "8000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "REST_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "REST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "REST_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "REST_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_METHODS", default_value = "*")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_HEADERS", default_value = "*")]
    pub cors_headers: String,

    /// Store backend.
    #[arg(long, env = "REST_STORAGE_BACKEND", default_value = "memory")]
    pub storage_backend: BackendKind,

    /// MongoDB connection string.
    #[arg(long, env = "MONGO_URI")]
    pub mongo_uri: Option<String>,

    /// MongoDB database name.
    #[arg(long = "database", env = "DB", default_value = "carbon_et")]
    pub database: String,

    /// Material record collection.
    #[arg(long, env = "COLLECTION", default_value = "stable_structures")]
    pub collection: String,

    /// User credential collection.
    #[arg(long, env = "USER_COLLECTION", default_value = "users")]
    pub user_collection: String,

    /// Per-operation store timeout in milliseconds.
    #[arg(long, env = "REST_STORE_TIMEOUT_MS", default_value = "5000")]
    pub store_timeout_ms: u64,

    /// JSON array of material records loaded into the memory backend at startup.
    #[arg(long, env = "REST_SEED_FILE")]
    pub seed_file: Option<PathBuf>,

    /// CSV catalogue served by `GET /api/download`.
    #[arg(long, env = "REST_CSV_PATH", default_value = "static/et_carbon.csv")]
    pub csv_path: PathBuf,

    /// Page size of the summary listing.
    #[arg(long, env = "REST_SUMMARY_PAGE_SIZE", default_value = "10")]
    pub summary_page_size: u64,

    /// Number of space groups kept in the space group chart.
    #[arg(long, env = "REST_CHART_TOP_SPACE_GROUPS", default_value = "20")]
    pub chart_top_space_groups: usize,

    /// Number of bins in the sites histogram.
    #[arg(long, env = "REST_CHART_HISTOGRAM_BINS", default_value = "10")]
    pub chart_histogram_bins: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            storage_backend: BackendKind::Memory,
            mongo_uri: None,
            database: "carbon_et".to_string(),
            collection: "stable_structures".to_string(),
            user_collection: "users".to_string(),
            store_timeout_ms: 5000,
            seed_file: None,
            csv_path: PathBuf::from("static/et_carbon.csv"),
            summary_page_size: 10,
            chart_top_space_groups: 20,
            chart_histogram_bins: 10,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse_from(["matdb"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.store_timeout_ms == 0 {
            errors.push("Store timeout cannot be 0".to_string());
        }

        if self.summary_page_size == 0 {
            errors.push("Summary page size cannot be 0".to_string());
        }

        if self.chart_top_space_groups == 0 {
            errors.push("Chart space group count cannot be 0".to_string());
        }

        if self.chart_histogram_bins == 0 {
            errors.push("Chart histogram bins cannot be 0".to_string());
        }

        if self.storage_backend == BackendKind::MongoDB && self.mongo_uri.is_none() {
            errors.push("MONGO_URI is required for the mongodb backend".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            store_timeout_ms: 1000,
            ..Default::default()
        }
    }
}
