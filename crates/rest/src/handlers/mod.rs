//! HTTP request handlers.
//!
//! - [`health`] - welcome message and health check
//! - [`auth`] - signup and login
//! - [`materials`] - full record reads, listings and summaries
//! - [`sections`] - sub-section extracts of a record
//! - [`download`] - CSV catalogue and CIF export
//! - [`charts`] - dashboard figures

pub mod auth;
pub mod charts;
pub mod download;
pub mod health;
pub mod materials;
pub mod sections;

// Re-export handlers for convenience
pub use auth::{login_handler, signup_handler};
pub use charts::charts_handler;
pub use download::{download_cif_handler, download_csv_handler};
pub use health::{health_handler, root_handler};
pub use materials::{
    basic_properties_handler, list_materials_handler, material_handler, materials_summary_handler,
};
pub use sections::{
    band_handler, elastic_handler, elastic_properties_handler, opt_handler, scf_handler,
};
