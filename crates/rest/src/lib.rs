//! # matdb-rest - Materials Database REST API
//!
//! This crate serves a document store of computed carbon materials (crystal
//! structures, elastic tensors, band gaps) over HTTP, together with a
//! minimal signup/login surface backed by a user collection.
//!
//! ## Features
//!
//! - **Record lookup**: full records and allow-listed summaries by object id
//! - **Sub-section extracts**: VASP input text, elastic properties, band gaps
//! - **Pagination**: fixed-size summary pages with a total page count
//! - **CIF export**: structures converted to P1 CIF in memory on request
//! - **Charts**: plotly figures aggregated over the whole collection
//! - **Accounts**: Argon2id-hashed credentials; login verifies only
//!
//! ## Backend Support
//!
//! - memory - in-process store seeded from a JSON file (default)
//! - `mongodb` - MongoDB backend (feature flag)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use matdb_rest::{create_app, ServerConfig};
//! use matdb_persistence::backends::memory::MemoryBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = MemoryBackend::new();
//!     backend.load_json_file("records.json").await?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Method | URL Pattern | Response |
//! |--------|-------------|----------|
//! | GET | `/` | welcome message |
//! | GET | `/health` | health status |
//! | POST | `/auth/login` | `{message}` |
//! | POST | `/signup/signup` | `{message}` |
//! | GET | `/api/material/{id}` | full record |
//! | GET | `/api/material_basicprop/{id}` | summary view |
//! | GET | `/api/opt/{id}` | optimisation inputs (text) |
//! | GET | `/api/scf/{id}` | SCF inputs (text) |
//! | GET | `/api/elastic/{id}` | elastic inputs and tensors (text) |
//! | GET | `/api/ElasticProp/{id}` | elastic properties |
//! | GET | `/api/band/{id}` | band gap |
//! | GET | `/api/materials` | every record |
//! | GET | `/api/materials_summary?page=N` | `{materials, total_pages}` |
//! | GET | `/api/charts` | `{crystal_pie, space_group_pie, sites_hist}` |
//! | GET | `/api/download` | CSV catalogue |
//! | GET | `/api/download/{id}` | `{id}.cif` |
//!
//! ## Error Handling
//!
//! Errors are returned as `{"detail": ..., "code": ...}` with the HTTP
//! status; see [`error`] for the full table.
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types and their HTTP mapping
//! - [`state`] - Application state (storage, configuration)
//! - [`projection`] - Typed views over raw stored documents
//! - [`services`] - Query, credential, export and chart services
//! - [`extractors`] - Axum extractors for identifiers and pages
//! - [`handlers`] - HTTP request handlers
//! - [`responses`] - Attachment responses
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod projection;
pub mod responses;
pub mod routing;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use matdb_persistence::core::{CredentialStorage, MaterialStorage};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: MaterialStorage + CredentialStorage + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `storage` - The storage backend to use
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust
/// use matdb_persistence::backends::memory::MemoryBackend;
/// use matdb_rest::{ServerConfig, create_app_with_config};
///
/// let config = ServerConfig {
///     summary_page_size: 25,
///     ..ServerConfig::for_testing()
/// };
/// let app = create_app_with_config(MemoryBackend::new(), config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: MaterialStorage + CredentialStorage + Send + Sync + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        storage.backend_name()
    );

    let state = AppState::new(Arc::new(storage), config.clone());
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
///
/// `*` allows everything; otherwise each setting is a comma-separated list.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// the default filter of `matdb_rest=<level>,tower_http=debug`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "matdb_rest={level},matdb_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
