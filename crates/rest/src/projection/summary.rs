//! Summary view of a material record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ProjectionError;
use super::record::lenient_count;

/// Stored keys that make up the summary view.
pub const SUMMARY_FIELDS: &[&str] = &[
    "_id",
    "sacada_id",
    "formula",
    "reduced_formula",
    "crystal_system",
    "space_group_symbol",
    "Sites",
];

/// Descriptive attributes of a record, without `structure` or `metadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct MaterialSummary {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sacada_id: Option<String>,
    #[serde(default)]
    pub formula: Option<String>,
    #[serde(default)]
    pub reduced_formula: Option<String>,
    #[serde(default)]
    pub crystal_system: Option<String>,
    #[serde(default)]
    pub space_group_symbol: Option<String>,
    #[serde(rename = "Sites", default, deserialize_with = "lenient_count")]
    pub sites: Option<i64>,
}

impl MaterialSummary {
    /// Builds the summary from a raw document.
    ///
    /// Only [`SUMMARY_FIELDS`] are copied out of the document before typing,
    /// so nothing else can reach the output whatever the document holds.
    pub fn from_document(doc: &Value) -> Result<Self, ProjectionError> {
        let mut selected = serde_json::Map::new();
        if let Some(object) = doc.as_object() {
            for field in SUMMARY_FIELDS {
                if let Some(value) = object.get(*field) {
                    selected.insert((*field).to_string(), value.clone());
                }
            }
        }
        serde_json::from_value(Value::Object(selected))
            .map_err(|e| ProjectionError::parse("summary", e))
    }
}
