//! Record lookup and listing handlers.

use axum::{Json, extract::State};
use matdb_persistence::core::{CredentialStorage, MaterialStorage};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{MaterialId, PageNumber};
use crate::projection::{MaterialRecord, MaterialSummary};
use crate::services::SummaryPage;
use crate::state::AppState;

/// Handler for reading one full record.
///
/// # HTTP Request
///
/// `GET /api/material/{id}`
///
/// # Response
///
/// - `200 OK` - the full record, absent fields as `null`
/// - `400 Bad Request` - malformed identifier
/// - `404 Not Found` - no such record
/// - `500 Internal Server Error` - the stored record has a mistyped field
pub async fn material_handler<S>(
    State(state): State<AppState<S>>,
    MaterialId(id): MaterialId,
) -> RestResult<Json<MaterialRecord>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(id = %id.to_hex(), "Processing material read");
    Ok(Json(state.query().material(&id).await?))
}

/// Handler for the summary view of one record.
///
/// `GET /api/material_basicprop/{id}`
pub async fn basic_properties_handler<S>(
    State(state): State<AppState<S>>,
    MaterialId(id): MaterialId,
) -> RestResult<Json<MaterialSummary>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(id = %id.to_hex(), "Processing basic properties read");
    Ok(Json(state.query().summary(&id).await?))
}

/// Handler for listing every record, unpaginated.
///
/// `GET /api/materials`
pub async fn list_materials_handler<S>(
    State(state): State<AppState<S>>,
) -> RestResult<Json<Vec<MaterialRecord>>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!("Processing material listing");
    Ok(Json(state.query().list_all().await?))
}

/// Handler for one page of summaries.
///
/// # HTTP Request
///
/// `GET /api/materials_summary?page=N`
///
/// # Response
///
/// - `200 OK` - `{materials, total_pages}`
/// - `400 Bad Request` - `page` is not an integer
pub async fn materials_summary_handler<S>(
    State(state): State<AppState<S>>,
    PageNumber(page): PageNumber,
) -> RestResult<Json<SummaryPage>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(page, "Processing summary listing");
    Ok(Json(state.query().list_summaries(page).await?))
}
