//! Record projection layer.
//!
//! Maps raw stored documents onto the typed response shapes:
//!
//! - [`MaterialRecord`] - full record view
//! - [`MaterialSummary`] - allow-listed descriptive attributes
//! - [`sections`] - sub-section extracts of the `metadata` tree
//!
//! Absence never fails a projection. A value that is present but of the wrong
//! type is reported as [`ProjectionError::Parse`].

mod record;
pub mod sections;
mod summary;

pub use record::{
    BandData, BandGap, ElasticData, ElasticPropData, ElasticProperties, MaterialRecord, Metadata,
    Tensor, VaspInput,
};
pub use summary::{MaterialSummary, SUMMARY_FIELDS};

use thiserror::Error;

use crate::error::RestError;

/// Errors raised while projecting a stored document.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A present value does not have the expected type.
    #[error("{section}: {message}")]
    Parse {
        /// The projected section.
        section: &'static str,
        /// Decoder message.
        message: String,
    },
}

impl ProjectionError {
    pub(crate) fn parse(section: &'static str, err: impl std::fmt::Display) -> Self {
        ProjectionError::Parse {
            section,
            message: err.to_string(),
        }
    }
}

impl From<ProjectionError> for RestError {
    fn from(err: ProjectionError) -> Self {
        RestError::ParseError {
            message: err.to_string(),
        }
    }
}
