//! Carbon materials database API server.

use clap::Parser;
use matdb_persistence::backends::memory::MemoryBackend;
use matdb_persistence::core::BackendKind;
use matdb_rest::{ServerConfig, create_app_with_config, init_logging};
use tokio::signal;
use tracing::{info, warn};

/// Creates the in-memory backend, seeding it when a seed file is configured.
async fn create_memory_backend(config: &ServerConfig) -> anyhow::Result<MemoryBackend> {
    let backend = MemoryBackend::new();
    match &config.seed_file {
        Some(path) => {
            let count = backend.load_json_file(path).await?;
            info!(path = %path.display(), count, "Initialized memory backend");
        }
        None => warn!("No seed file configured; serving an empty collection"),
    }
    Ok(backend)
}

/// Starts the Axum HTTP server and waits for a shutdown signal.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %config.storage_backend,
        "Starting materials database API"
    );

    match config.storage_backend {
        BackendKind::Memory => start_memory(config).await,
        BackendKind::MongoDB => start_mongodb(config).await,
    }
}

/// Starts the server with the in-memory backend.
async fn start_memory(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_memory_backend(&config).await?;
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Starts the server with the MongoDB backend.
#[cfg(feature = "mongodb")]
async fn start_mongodb(config: ServerConfig) -> anyhow::Result<()> {
    use matdb_persistence::backends::mongodb::{MongoBackend, MongoBackendConfig};

    let uri = config
        .mongo_uri
        .clone()
        .ok_or_else(|| anyhow::anyhow!("MONGO_URI is required for the mongodb backend"))?;

    let backend = MongoBackend::connect(MongoBackendConfig {
        uri,
        database: config.database.clone(),
        collection: config.collection.clone(),
        user_collection: config.user_collection.clone(),
        operation_timeout_ms: config.store_timeout_ms,
    })
    .await?;
    backend.init().await?;

    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when the mongodb feature is not enabled.
#[cfg(not(feature = "mongodb"))]
async fn start_mongodb(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The mongodb backend requires the 'mongodb' feature. \
         Build with: cargo build -p matdb-server --features mongodb"
    )
}
