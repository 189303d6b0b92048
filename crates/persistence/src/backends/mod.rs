//! Store backend implementations.
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | (always) | In-process store for tests, development and seeded demos |
//! | MongoDB | `mongodb` | The production document store |
//!
//! # Example
//!
//! ```
//! use matdb_persistence::backends::memory::MemoryBackend;
//! use serde_json::json;
//!
//! let backend = MemoryBackend::new();
//! let id = backend.insert_material(json!({"formula": "C8"})).unwrap();
//! assert_eq!(backend.len(), 1);
//! # let _ = id;
//! ```

pub mod memory;

#[cfg(feature = "mongodb")]
pub mod mongodb;
