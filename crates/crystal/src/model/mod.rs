//! Crystal structure model.

mod composition;
mod lattice;
mod structure;

pub use composition::Composition;
pub(crate) use composition::format_amount;
pub use lattice::Lattice;
pub use structure::{Site, Species, Structure};
