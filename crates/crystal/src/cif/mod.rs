//! Crystallographic Information File (CIF) support.
//!
//! [`write`] renders a [`Structure`](crate::Structure) as a P1 CIF document;
//! [`parse`] reads one back.

mod parser;
mod writer;

pub use parser::parse;
pub use writer::{CifOptions, write, write_to};
