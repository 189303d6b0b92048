//! Material identifier path extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use matdb_persistence::types::RecordId;

use crate::error::RestError;

/// Extracts the `{id}` path segment as a [`RecordId`].
///
/// A segment that is not 24 hexadecimal characters is rejected with
/// `400 invalid_identifier` before any store lookup happens.
///
/// # Example
///
/// ```rust,ignore
/// use matdb_rest::extractors::MaterialId;
///
/// async fn handler(MaterialId(id): MaterialId) -> String {
///     id.to_hex()
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialId(pub RecordId);

impl<S> FromRequestParts<S> for MaterialId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        RecordId::parse(&raw)
            .map(MaterialId)
            .map_err(|_| RestError::InvalidIdentifier { value: raw })
    }
}
