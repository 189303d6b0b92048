//! Typed view of a stored material record.
//!
//! Every field is optional at every level. Missing fields and explicit nulls
//! both deserialize to `None` and serialize back as `null`; keys the model
//! does not know are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

use super::ProjectionError;

/// Full record view returned by `GET /api/material/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Hex object id.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// External catalogue identifier.
    #[serde(default)]
    pub sacada_id: Option<String>,
    /// Stored structure mapping, passed through untouched.
    #[serde(default)]
    pub structure: Option<Map<String, Value>>,
    /// Computed properties.
    #[serde(default)]
    pub metadata: Option<Metadata>,
    /// Full formula.
    #[serde(default)]
    pub formula: Option<String>,
    /// Reduced formula.
    #[serde(default)]
    pub reduced_formula: Option<String>,
    /// Crystal system name.
    #[serde(default)]
    pub crystal_system: Option<String>,
    /// Hermann-Mauguin space group symbol.
    #[serde(default)]
    pub space_group_symbol: Option<String>,
    /// Number of sites in the cell.
    #[serde(rename = "Sites", default, deserialize_with = "lenient_count")]
    pub sites: Option<i64>,
}

impl MaterialRecord {
    /// Types a raw stored document as a full record.
    pub fn from_document(doc: &Value) -> Result<Self, ProjectionError> {
        MaterialRecord::deserialize(doc).map_err(|e| ProjectionError::parse("record", e))
    }
}

/// The `metadata` tree of a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Geometry optimisation inputs.
    #[serde(default)]
    pub opt: Option<VaspInput>,
    /// Self-consistent field inputs.
    #[serde(default)]
    pub scf: Option<VaspInput>,
    /// Elastic calculation.
    #[serde(default)]
    pub elastic: Option<ElasticData>,
    /// Band structure results.
    #[serde(default)]
    pub band: Option<BandData>,
}

/// INCAR/KPOINTS/CONTCAR text blobs of one calculation step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct VaspInput {
    #[serde(rename = "INCAR", default)]
    pub incar: Option<String>,
    #[serde(rename = "KPOINTS", default)]
    pub kpoints: Option<String>,
    #[serde(rename = "CONTCAR", default)]
    pub contcar: Option<String>,
}

/// Inputs and results of the elastic calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ElasticData {
    #[serde(rename = "INCAR", default)]
    pub incar: Option<String>,
    #[serde(rename = "KPOINTS", default)]
    pub kpoints: Option<String>,
    #[serde(rename = "ELASTIC_TENSOR", default)]
    pub elastic_tensor: Option<String>,
    #[serde(default)]
    pub prop_data: Option<ElasticPropData>,
}

/// Tensor matrix, row-major.
pub type Tensor = Vec<Vec<f64>>;

/// `prop_data` of the elastic calculation: the two tensors plus the derived properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticPropData {
    /// Stiffness tensor (GPa).
    #[serde(default)]
    pub stiffness_tensor: Option<Tensor>,
    /// Compliance tensor.
    #[serde(default)]
    pub compliance_tensor: Option<Tensor>,
    /// Everything else in `prop_data`.
    #[serde(flatten)]
    pub properties: ElasticProperties,
}

/// Derived elastic properties, without the stiffness and compliance tensors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ElasticProperties {
    #[serde(rename = "Pugh_ratio", default)]
    pub pugh_ratio: Option<f64>,
    #[serde(rename = "Cauchy_Pressure", default)]
    pub cauchy_pressure: Option<f64>,
    #[serde(rename = "Kleinman_parameter", default)]
    pub kleinman_parameter: Option<f64>,
    #[serde(rename = "Universal_Elastic_Anisotropy", default)]
    pub universal_elastic_anisotropy: Option<f64>,
    #[serde(rename = "Chung_Buessem_Anisotropy", default)]
    pub chung_buessem_anisotropy: Option<f64>,
    #[serde(rename = "Isotropic_Poissons_Ratio", default)]
    pub isotropic_poissons_ratio: Option<f64>,
    #[serde(rename = "Longitudinal_wave_velocity", default)]
    pub longitudinal_wave_velocity: Option<f64>,
    #[serde(rename = "Transverse_wave_velocity", default)]
    pub transverse_wave_velocity: Option<f64>,
    #[serde(rename = "Average_wave_velocity", default)]
    pub average_wave_velocity: Option<f64>,
    #[serde(rename = "Debye_temperature", default)]
    pub debye_temperature: Option<f64>,
    #[serde(default)]
    pub stability: Option<bool>,
    #[serde(default)]
    pub anisotropic_mechanical_properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub average_mechanical_properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub average_youngs_modulus: Option<f64>,
}

/// Band structure results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandData {
    /// Gap summary.
    #[serde(default)]
    pub band_gap: Option<BandGap>,
    /// High-symmetry k-point label to path position.
    #[serde(rename = "Klabels", default)]
    pub klabels: Option<BTreeMap<String, f64>>,
}

/// Band gap summary, keyed by its stored labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct BandGap {
    #[serde(rename = "Band Character", default)]
    pub band_character: Option<String>,
    #[serde(rename = "Band Gap (eV)", default)]
    pub band_gap_ev: Option<f64>,
    #[serde(rename = "Eigenvalue of VBM (eV)", default)]
    pub vbm_eigenvalue_ev: Option<f64>,
    #[serde(rename = "Eigenvalue of CBM (eV)", default)]
    pub cbm_eigenvalue_ev: Option<f64>,
    #[serde(rename = "Fermi Energy (eV)", default)]
    pub fermi_energy_ev: Option<f64>,
    #[serde(rename = "HOMO & LUMO Bands", default)]
    pub homo_lumo_bands: Option<Vec<i64>>,
    #[serde(rename = "Location of VBM", default)]
    pub vbm_location: Option<Vec<f64>>,
    #[serde(rename = "Location of CBM", default)]
    pub cbm_location: Option<Vec<f64>>,
}

/// Accepts integers and integral floats (`8` and `8.0`).
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, found {}", n))),
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, found {}",
            other
        ))),
    }
}
