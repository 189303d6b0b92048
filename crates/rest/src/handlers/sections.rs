//! Sub-section extract handlers.
//!
//! The text extracts are served as `text/plain`; the property extracts as JSON.

use axum::{Json, extract::State};
use matdb_persistence::core::{CredentialStorage, MaterialStorage};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::MaterialId;
use crate::projection::{BandGap, ElasticProperties};
use crate::state::AppState;

/// `GET /api/opt/{id}`
pub async fn opt_handler<S>(
    State(state): State<AppState<S>>,
    MaterialId(id): MaterialId,
) -> RestResult<String>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(id = %id.to_hex(), section = "opt", "Processing section read");
    state.query().opt_text(&id).await
}

/// `GET /api/scf/{id}`
pub async fn scf_handler<S>(
    State(state): State<AppState<S>>,
    MaterialId(id): MaterialId,
) -> RestResult<String>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(id = %id.to_hex(), section = "scf", "Processing section read");
    state.query().scf_text(&id).await
}

/// `GET /api/elastic/{id}`
pub async fn elastic_handler<S>(
    State(state): State<AppState<S>>,
    MaterialId(id): MaterialId,
) -> RestResult<String>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(id = %id.to_hex(), section = "elastic", "Processing section read");
    state.query().elastic_text(&id).await
}

/// Handler for the derived elastic properties.
///
/// Stiffness and compliance tensors are left out of the response.
///
/// `GET /api/ElasticProp/{id}`
pub async fn elastic_properties_handler<S>(
    State(state): State<AppState<S>>,
    MaterialId(id): MaterialId,
) -> RestResult<Json<ElasticProperties>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(id = %id.to_hex(), section = "elastic_prop", "Processing section read");
    Ok(Json(state.query().elastic_properties(&id).await?))
}

/// `GET /api/band/{id}`
pub async fn band_handler<S>(
    State(state): State<AppState<S>>,
    MaterialId(id): MaterialId,
) -> RestResult<Json<BandGap>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(id = %id.to_hex(), section = "band", "Processing section read");
    Ok(Json(state.query().band_gap(&id).await?))
}
