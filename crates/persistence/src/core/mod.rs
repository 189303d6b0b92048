//! Core storage traits and abstractions.
//!
//! - [`MaterialStorage`] - read access to the material collection
//! - [`CredentialStorage`] - lookup and insertion of user credentials
//! - [`BackendKind`] - identifies the concrete backend
//!
//! Both traits are object-safe and `Send + Sync`, so services can hold a
//! backend behind an `Arc` and tests can substitute the in-memory backend
//! for a live database.

mod backend;
mod credentials;
mod storage;

pub use backend::BackendKind;
pub use credentials::CredentialStorage;
pub use storage::MaterialStorage;
