//! In-memory backend implementation.
//!
//! Keeps records in insertion order, which is the order every listing
//! returns them in. Suitable for tests and for serving a small seeded corpus
//! without a database.

mod backend;
mod storage;

pub use backend::MemoryBackend;
