//! Downloadable file responses.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use mime::Mime;

use crate::services::FileExport;

/// Media type of CIF downloads.
pub const CIF_MEDIA_TYPE: &str = "chemical/x-cif";

/// A file body sent with `Content-Disposition: attachment`.
#[derive(Debug, Clone)]
pub struct Attachment {
    file_name: String,
    content_type: Mime,
    body: String,
}

impl Attachment {
    /// Creates an attachment with an explicit media type.
    pub fn new(file_name: impl Into<String>, content_type: Mime, body: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            body: body.into(),
        }
    }

    /// A CSV download.
    pub fn csv(export: FileExport) -> Self {
        Self::new(export.file_name, mime::TEXT_CSV, export.body)
    }

    /// A CIF download.
    pub fn cif(export: FileExport) -> Self {
        let content_type = CIF_MEDIA_TYPE
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        Self::new(export.file_name, content_type, export.body)
    }

    /// Returns the download file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the media type.
    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    /// Builds the Content-Type and Content-Disposition headers.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(self.content_type.as_ref()) {
            headers.insert(header::CONTENT_TYPE, value);
        }

        // Quotes and control characters cannot appear inside the quoted name.
        let safe_name: String = self
            .file_name
            .chars()
            .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
            .collect();
        if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", safe_name)) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }

        headers
    }
}

impl IntoResponse for Attachment {
    fn into_response(self) -> Response {
        let headers = self.to_header_map();
        (StatusCode::OK, headers, Body::from(self.body)).into_response()
    }
}
