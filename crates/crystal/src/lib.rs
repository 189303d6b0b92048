//! Crystal structure model and CIF serialization for the materials database.
//!
//! Stored records carry their structure as a nested mapping. This crate turns
//! that mapping into a typed [`Structure`] and renders it as CIF text.
//!
//! ```
//! use matdb_crystal::{Structure, cif};
//! use serde_json::json;
//!
//! let stored = json!({
//!     "lattice": {"matrix": [[3.567, 0.0, 0.0], [0.0, 3.567, 0.0], [0.0, 0.0, 3.567]]},
//!     "sites": [
//!         {"species": [{"element": "C", "occu": 1}], "abc": [0.0, 0.0, 0.0]},
//!         {"species": [{"element": "C", "occu": 1}], "abc": [0.25, 0.25, 0.25]}
//!     ]
//! });
//!
//! let structure = Structure::from_value(&stored).unwrap();
//! let text = cif::write(&structure, None, &cif::CifOptions::default());
//! assert!(text.contains("data_C\n"));
//! assert_eq!(cif::parse(&text).unwrap().num_sites(), 2);
//! ```

pub mod cif;
pub mod error;
pub mod model;

pub use error::{CifError, CrystalError};
pub use model::{Composition, Lattice, Site, Species, Structure};
