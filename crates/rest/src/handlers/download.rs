//! File download handlers.

use axum::extract::State;
use matdb_persistence::core::{CredentialStorage, MaterialStorage};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::MaterialId;
use crate::responses::Attachment;
use crate::state::AppState;

/// Handler for the static CSV catalogue.
///
/// # HTTP Request
///
/// `GET /api/download`
///
/// # Response
///
/// - `200 OK` - `text/csv` attachment
/// - `404 Not Found` - the configured file does not exist
pub async fn download_csv_handler<S>(State(state): State<AppState<S>>) -> RestResult<Attachment>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(path = %state.config().csv_path.display(), "Processing CSV download");
    Ok(Attachment::csv(state.exports().static_csv().await?))
}

/// Handler for the generated CIF of one record.
///
/// # HTTP Request
///
/// `GET /api/download/{id}`
///
/// # Response
///
/// - `200 OK` - `chemical/x-cif` attachment named `{id}.cif`
/// - `400 Bad Request` - malformed identifier
/// - `404 Not Found` - no such record, or it has no structure
/// - `500 Internal Server Error` - the structure cannot be converted
pub async fn download_cif_handler<S>(
    State(state): State<AppState<S>>,
    MaterialId(id): MaterialId,
) -> RestResult<Attachment>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!(id = %id.to_hex(), "Processing CIF download");
    Ok(Attachment::cif(state.exports().export_cif(&id).await?))
}
