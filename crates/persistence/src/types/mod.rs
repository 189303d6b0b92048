//! Core types for stored records and paging.
//!
//! - [`RecordId`] - the store's native 12-byte object identifier
//! - [`StoredDocument`] - a raw record as returned by a backend
//! - [`UserCredential`] - a persisted login record
//! - [`PageRequest`] / [`Page`] - offset pagination

mod credential;
mod pagination;
mod record_id;
mod stored_document;

pub use credential::UserCredential;
pub use pagination::{Page, PageRequest, total_pages};
pub use record_id::RecordId;
pub use stored_document::{ID_FIELD, StoredDocument};
