//! Materials database route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use matdb_persistence::core::{CredentialStorage, MaterialStorage};

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## Service
/// - `GET /` - Welcome message
/// - `GET /health` - Health check
///
/// ## Accounts
/// - `POST /auth/login` - Verify credentials
/// - `POST /signup/signup` - Register a user
///
/// ## Records
/// - `GET /api/material/{id}` - Full record
/// - `GET /api/material_basicprop/{id}` - Summary view
/// - `GET /api/opt/{id}`, `/api/scf/{id}`, `/api/elastic/{id}` - Text extracts
/// - `GET /api/ElasticProp/{id}` - Elastic properties
/// - `GET /api/band/{id}` - Band gap
/// - `GET /api/materials` - Every record
/// - `GET /api/materials_summary?page=N` - Paginated summaries
///
/// ## Exports
/// - `GET /api/charts` - Dashboard figures
/// - `GET /api/download` - CSV catalogue
/// - `GET /api/download/{id}` - Generated CIF
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: MaterialStorage + CredentialStorage + Send + Sync + 'static,
{
    Router::new()
        // Service routes
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler::<S>))
        // Account routes
        .route("/auth/login", post(handlers::login_handler::<S>))
        .route("/signup/signup", post(handlers::signup_handler::<S>))
        // Record routes
        .nest("/api", api_routes::<S>())
        .with_state(state)
}

fn api_routes<S>() -> Router<AppState<S>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync + 'static,
{
    Router::new()
        .route("/material/{id}", get(handlers::material_handler::<S>))
        .route(
            "/material_basicprop/{id}",
            get(handlers::basic_properties_handler::<S>),
        )
        .route("/opt/{id}", get(handlers::opt_handler::<S>))
        .route("/scf/{id}", get(handlers::scf_handler::<S>))
        .route("/elastic/{id}", get(handlers::elastic_handler::<S>))
        .route(
            "/ElasticProp/{id}",
            get(handlers::elastic_properties_handler::<S>),
        )
        .route("/band/{id}", get(handlers::band_handler::<S>))
        .route("/materials", get(handlers::list_materials_handler::<S>))
        .route(
            "/materials_summary",
            get(handlers::materials_summary_handler::<S>),
        )
        .route("/charts", get(handlers::charts_handler::<S>))
        .route("/download", get(handlers::download_csv_handler::<S>))
        .route("/download/{id}", get(handlers::download_cif_handler::<S>))
}
