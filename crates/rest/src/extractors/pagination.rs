//! Page number extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::error::RestError;

/// The `?page=N` query parameter of the summary listing.
///
/// Defaults to 1 when absent. Values below 1 are passed through and clamped
/// by the query service; anything that is not an integer is a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber(pub i64);

impl Default for PageNumber {
    fn default() -> Self {
        PageNumber(1)
    }
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

impl<S> FromRequestParts<S> for PageNumber
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| RestError::BadRequest {
                message: "Query parameter 'page' must be an integer".to_string(),
            })?;

        Ok(query.page.map(PageNumber).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<PageNumber, RestError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        PageNumber::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_default_page() {
        assert_eq!(extract("/api/materials_summary").await.unwrap(), PageNumber(1));
    }

    #[tokio::test]
    async fn test_explicit_and_negative_page() {
        assert_eq!(extract("/x?page=3").await.unwrap(), PageNumber(3));
        assert_eq!(extract("/x?page=-2").await.unwrap(), PageNumber(-2));
    }

    #[tokio::test]
    async fn test_non_integer_page_is_bad_request() {
        let err = extract("/x?page=two").await.unwrap_err();
        assert_eq!(err.code(), "bad_request");
    }
}
