//! Materials Database Persistence Layer
//!
//! This crate provides the document store abstraction used by the materials
//! database API: read access to the material record collection and
//! append-only access to the user credential collection.
//!
//! # Backend Features
//!
//! - Memory (always available) - in-process store, used by tests and for
//!   serving a seeded corpus without a database
//! - `mongodb` - MongoDB document store via the official driver
//!
//! # Architecture
//!
//! - [`types`] - record identifiers, stored documents, credentials, pagination
//! - [`error`] - error types for all operations
//! - [`core`] - storage traits
//! - [`backends`] - backend implementations
//!
//! # Quick Start
//!
//! ```
//! use matdb_persistence::backends::memory::MemoryBackend;
//! use matdb_persistence::core::MaterialStorage;
//! use matdb_persistence::types::PageRequest;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let backend = MemoryBackend::new();
//! for n in 0..23 {
//!     backend.insert_material(json!({"formula": format!("C{}", n)})).unwrap();
//! }
//!
//! let request = PageRequest::new(3, 10);
//! let page = backend
//!     .list_page(request.skip(), request.limit(), Some(&["formula"]))
//!     .await
//!     .unwrap();
//! assert_eq!(page.len(), 3);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;
