use thiserror::Error;

/// Errors raised while building a [`Structure`](crate::Structure) from stored data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CrystalError {
    #[error("missing field '{0}' in structure data")]
    MissingField(String),

    #[error("invalid field '{field}': {details}")]
    InvalidField { field: String, details: String },

    #[error("lattice matrix is singular (volume {volume:.3e})")]
    SingularLattice { volume: f64 },

    #[error("structure has no sites")]
    EmptyStructure,
}

impl CrystalError {
    pub fn invalid(field: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            details: details.into(),
        }
    }
}

/// Errors raised while reading CIF text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CifError {
    #[error("unterminated quoted string at byte offset {0}")]
    UnterminatedQuote(usize),

    #[error("unterminated semicolon text field at byte offset {0}")]
    UnterminatedTextField(usize),

    #[error("no data block found")]
    NoDataBlock,

    #[error("missing required tag: {0}")]
    MissingTag(String),

    #[error("invalid value '{value}' for {tag}")]
    InvalidValue { tag: String, value: String },

    #[error("invalid structure: {0}")]
    Structure(#[from] CrystalError),
}
