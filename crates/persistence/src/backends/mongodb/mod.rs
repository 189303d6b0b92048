//! MongoDB backend implementation.
//!
//! Material records live in one collection and user credentials in another,
//! both in the same database. Every driver call runs under a bounded timeout;
//! an expired call surfaces as [`BackendError::Timeout`](crate::error::BackendError::Timeout)
//! instead of hanging the request.
//!
//! # Example
//!
//! ```no_run
//! use matdb_persistence::backends::mongodb::{MongoBackend, MongoBackendConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoBackendConfig {
//!     uri: "mongodb://localhost:27017".to_string(),
//!     database: "carbon_et".to_string(),
//!     ..Default::default()
//! };
//! let backend = MongoBackend::connect(config).await?;
//! backend.init().await?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod storage;

pub use backend::{MongoBackend, MongoBackendConfig};
