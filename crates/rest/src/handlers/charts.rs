//! Dashboard chart handler.

use axum::{Json, extract::State};
use matdb_persistence::core::{CredentialStorage, MaterialStorage};
use tracing::debug;

use crate::error::RestResult;
use crate::services::ChartSet;
use crate::state::AppState;

/// Handler for the dashboard figures.
///
/// `GET /api/charts` returns `{crystal_pie, space_group_pie, sites_hist}`,
/// each a plotly figure.
pub async fn charts_handler<S>(State(state): State<AppState<S>>) -> RestResult<Json<ChartSet>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!("Processing charts request");
    Ok(Json(state.charts().compute().await?))
}
