//! Axum extractors for request data.
//!
//! - [`MaterialId`] - validated record identifier from the path
//! - [`PageNumber`] - summary page from the query string

mod material_id;
mod pagination;

pub use material_id::MaterialId;
pub use pagination::PageNumber;
