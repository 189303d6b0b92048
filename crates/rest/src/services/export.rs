//! Structure export service: CIF generation and the static CSV catalogue.
//!
//! Exports are built entirely in memory, so concurrent downloads of the same
//! or different records never share a file path.

use std::io;
use std::path::{Path, PathBuf};

use matdb_crystal::cif::{self, CifOptions};
use matdb_crystal::{CrystalError, Structure};
use matdb_persistence::core::MaterialStorage;
use matdb_persistence::types::RecordId;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};

const DEFAULT_CSV_NAME: &str = "et_carbon.csv";

/// Failures while producing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The stored structure could not be turned into a crystal model.
    #[error("structure conversion failed: {0}")]
    Structure(#[from] CrystalError),

    /// A file on disk could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl From<ExportError> for RestError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Io { ref source, .. } if source.kind() == io::ErrorKind::NotFound => {
                RestError::NotFound {
                    message: "File not found".to_string(),
                }
            }
            ExportError::Io { .. } => RestError::InternalError {
                message: err.to_string(),
            },
            ExportError::Structure(_) => RestError::ExportError {
                message: err.to_string(),
            },
        }
    }
}

/// A generated or loaded file ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExport {
    /// Suggested download name.
    pub file_name: String,
    /// File contents.
    pub body: String,
}

/// Produces downloadable files from stored records.
pub struct ExportService<'a, S: ?Sized> {
    storage: &'a S,
    csv_path: &'a Path,
}

impl<'a, S> ExportService<'a, S>
where
    S: MaterialStorage + ?Sized,
{
    /// Creates an export service reading the CSV catalogue from `csv_path`.
    pub fn new(storage: &'a S, csv_path: &'a Path) -> Self {
        Self { storage, csv_path }
    }

    /// Renders the stored structure of one record as a P1 CIF file named `{id}.cif`.
    pub async fn export_cif(&self, id: &RecordId) -> RestResult<FileExport> {
        let doc = self
            .storage
            .read(id)
            .await?
            .ok_or_else(RestError::material_not_found)?;

        let structure_value = match doc.field("structure") {
            Some(value) if !is_empty_structure(value) => value,
            _ => {
                return Err(RestError::NotFound {
                    message: "Structure data not found".to_string(),
                });
            }
        };

        let structure = Structure::from_value(structure_value).map_err(|e| {
            warn!(id = %id.to_hex(), error = %e, "Stored structure is not convertible");
            ExportError::from(e)
        })?;

        let body = cif::write(&structure, None, &CifOptions::default());
        debug!(id = %id.to_hex(), sites = structure.num_sites(), "Generated CIF");

        Ok(FileExport {
            file_name: format!("{}.cif", id.to_hex()),
            body,
        })
    }

    /// Loads the static CSV catalogue.
    pub async fn static_csv(&self) -> RestResult<FileExport> {
        let body = tokio::fs::read_to_string(self.csv_path)
            .await
            .map_err(|source| ExportError::Io {
                path: self.csv_path.to_path_buf(),
                source,
            })?;

        let file_name = self
            .csv_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_CSV_NAME)
            .to_string();

        Ok(FileExport { file_name, body })
    }
}

fn is_empty_structure(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
