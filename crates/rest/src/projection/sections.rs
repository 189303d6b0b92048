//! Sub-section extracts of the `metadata` tree.
//!
//! Each extract walks one branch of a raw document. A missing or null branch
//! yields the default-shaped value; a branch that is present with the wrong
//! shape is a [`ProjectionError`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ProjectionError;
use super::record::{BandGap, ElasticData, ElasticProperties, Tensor, VaspInput};

/// `metadata.opt` as labelled plain text.
pub fn opt_text(doc: &Value) -> Result<String, ProjectionError> {
    let input: VaspInput = typed_branch(doc, &["metadata", "opt"], "metadata.opt")?;
    Ok(vasp_text(&input))
}

/// `metadata.scf` as labelled plain text.
pub fn scf_text(doc: &Value) -> Result<String, ProjectionError> {
    let input: VaspInput = typed_branch(doc, &["metadata", "scf"], "metadata.scf")?;
    Ok(vasp_text(&input))
}

/// `metadata.elastic` inputs and tensors as labelled plain text.
pub fn elastic_text(doc: &Value) -> Result<String, ProjectionError> {
    let elastic: ElasticData = typed_branch(doc, &["metadata", "elastic"], "metadata.elastic")?;
    let prop = elastic.prop_data.unwrap_or_default();

    let mut out = String::new();
    out.push_str("INCAR:\n");
    out.push_str(blob(&elastic.incar));
    out.push_str("KPOINTS:\n");
    out.push_str(blob(&elastic.kpoints));
    out.push_str("ELASTIC_TENSOR:\n");
    out.push_str(blob(&elastic.elastic_tensor));
    out.push_str("STIFFNESS_TENSOR:\n");
    out.push_str(&tensor_text(prop.stiffness_tensor.as_ref()));
    out.push_str("\nCOMPLIANCE_TENSOR:\n");
    out.push_str(&tensor_text(prop.compliance_tensor.as_ref()));
    Ok(out)
}

/// `metadata.elastic.prop_data` without the stiffness and compliance tensors.
pub fn elastic_properties(doc: &Value) -> Result<ElasticProperties, ProjectionError> {
    typed_branch(
        doc,
        &["metadata", "elastic", "prop_data"],
        "metadata.elastic.prop_data",
    )
}

/// `metadata.band.band_gap`; a value that is not a mapping counts as empty.
pub fn band_gap(doc: &Value) -> Result<BandGap, ProjectionError> {
    match branch(doc, &["metadata", "band", "band_gap"])? {
        Some(value @ Value::Object(_)) => BandGap::deserialize(value)
            .map_err(|e| ProjectionError::parse("metadata.band.band_gap", e)),
        _ => Ok(BandGap::default()),
    }
}

/// Follows `path` through nested mappings.
///
/// Returns `None` when any step is missing or null, and an error when an
/// intermediate step is not a mapping.
fn branch<'a>(doc: &'a Value, path: &[&str]) -> Result<Option<&'a Value>, ProjectionError> {
    let mut current = doc;
    for (depth, key) in path.iter().enumerate() {
        let object = current.as_object().ok_or_else(|| {
            ProjectionError::parse(
                "document",
                format!("'{}' is not a mapping", path[..depth].join(".")),
            )
        })?;
        match object.get(*key) {
            None | Some(Value::Null) => return Ok(None),
            Some(next) => current = next,
        }
    }
    Ok(Some(current))
}

fn typed_branch<T>(doc: &Value, path: &[&str], section: &'static str) -> Result<T, ProjectionError>
where
    T: DeserializeOwned + Default,
{
    match branch(doc, path)? {
        None => Ok(T::default()),
        Some(value) => T::deserialize(value).map_err(|e| ProjectionError::parse(section, e)),
    }
}

fn vasp_text(input: &VaspInput) -> String {
    format!(
        "INCAR:\n{}KPOINTS:\n{}CONTCAR:\n{}",
        blob(&input.incar),
        blob(&input.kpoints),
        blob(&input.contcar)
    )
}

fn blob(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Renders a tensor as nested lists, e.g. `[[1.0, 2.5], [2.5, 1.0]]`.
fn tensor_text(tensor: Option<&Tensor>) -> String {
    let Some(rows) = tensor else {
        return String::new();
    };
    let mut out = String::from("[");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('[');
        for (j, x) in row.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            out.push_str(&float_text(*x));
        }
        out.push(']');
    }
    out.push(']');
    out
}

/// Shortest round-trip form, always with a decimal point for finite integral values.
fn float_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}
