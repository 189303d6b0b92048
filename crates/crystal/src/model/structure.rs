//! Periodic structures built from the stored structure mapping.
//!
//! The stored shape follows the common `Structure.as_dict()` layout:
//!
//! ```json
//! {
//!   "lattice": {"matrix": [[2.46, 0, 0], [-1.23, 2.13, 0], [0, 0, 6.7]]},
//!   "sites": [
//!     {"species": [{"element": "C", "occu": 1}], "abc": [0, 0, 0.25], "label": "C"}
//!   ]
//! }
//! ```

use serde_json::Value;

use crate::error::CrystalError;

use super::{Composition, Lattice};

/// One element occupying a site.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub element: String,
    pub occupancy: f64,
}

impl Species {
    pub fn new(element: impl Into<String>, occupancy: f64) -> Self {
        Self {
            element: element.into(),
            occupancy,
        }
    }
}

/// A lattice site with its occupying species and fractional position.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub species: Vec<Species>,
    pub frac_coords: [f64; 3],
    pub label: Option<String>,
}

impl Site {
    pub fn new(species: Vec<Species>, frac_coords: [f64; 3]) -> Self {
        Self {
            species,
            frac_coords,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    lattice: Lattice,
    sites: Vec<Site>,
}

impl Structure {
    pub fn new(lattice: Lattice, sites: Vec<Site>) -> Result<Self, CrystalError> {
        if sites.is_empty() {
            return Err(CrystalError::EmptyStructure);
        }
        if let Some(index) = sites.iter().position(|s| s.species.is_empty()) {
            return Err(CrystalError::invalid(
                format!("sites[{}].species", index),
                "site has no species",
            ));
        }
        Ok(Self { lattice, sites })
    }

    /// Converts a stored structure mapping into a [`Structure`].
    ///
    /// The lattice comes from `lattice.matrix`, or from the `a`..`gamma`
    /// parameters when no matrix is stored. Sites carrying only cartesian
    /// `xyz` are converted through the inverse lattice.
    pub fn from_value(value: &Value) -> Result<Self, CrystalError> {
        let lattice_value = value
            .get("lattice")
            .filter(|v| !v.is_null())
            .ok_or_else(|| CrystalError::MissingField("lattice".into()))?;
        let lattice = lattice_from_value(lattice_value)?;

        let sites = value
            .get("sites")
            .filter(|v| !v.is_null())
            .ok_or_else(|| CrystalError::MissingField("sites".into()))?
            .as_array()
            .ok_or_else(|| CrystalError::invalid("sites", "expected a list"))?;

        let sites = sites
            .iter()
            .enumerate()
            .map(|(index, site)| site_from_value(index, site, &lattice))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(lattice, sites)
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn composition(&self) -> Composition {
        let mut composition = Composition::new();
        for site in &self.sites {
            for species in &site.species {
                composition.add(&species.element, species.occupancy);
            }
        }
        composition
    }
}

fn lattice_from_value(value: &Value) -> Result<Lattice, CrystalError> {
    if let Some(matrix) = value.get("matrix").filter(|v| !v.is_null()) {
        let rows = matrix
            .as_array()
            .filter(|rows| rows.len() == 3)
            .ok_or_else(|| CrystalError::invalid("lattice.matrix", "expected a 3x3 matrix"))?;
        let mut out = [[0.0; 3]; 3];
        for (i, row) in rows.iter().enumerate() {
            out[i] = vector(row, &format!("lattice.matrix[{}]", i))?;
        }
        return Lattice::new(out);
    }

    let param = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| CrystalError::MissingField(format!("lattice.{}", name)))
    };
    match param("a") {
        Ok(a) => Lattice::from_parameters(
            a,
            param("b")?,
            param("c")?,
            param("alpha")?,
            param("beta")?,
            param("gamma")?,
        ),
        Err(_) => Err(CrystalError::MissingField("lattice.matrix".into())),
    }
}

fn site_from_value(index: usize, value: &Value, lattice: &Lattice) -> Result<Site, CrystalError> {
    let field = |name: &str| format!("sites[{}].{}", index, name);

    let species_list = value
        .get("species")
        .ok_or_else(|| CrystalError::MissingField(field("species")))?
        .as_array()
        .ok_or_else(|| CrystalError::invalid(field("species"), "expected a list"))?;
    if species_list.is_empty() {
        return Err(CrystalError::invalid(field("species"), "site has no species"));
    }

    let species = species_list
        .iter()
        .map(|sp| {
            let element = sp
                .get("element")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| CrystalError::invalid(field("species"), "missing element symbol"))?;
            let occupancy = match sp.get("occu") {
                None | Some(Value::Null) => 1.0,
                Some(v) => v
                    .as_f64()
                    .ok_or_else(|| CrystalError::invalid(field("species.occu"), "expected a number"))?,
            };
            Ok(Species::new(element, occupancy))
        })
        .collect::<Result<Vec<_>, CrystalError>>()?;

    let frac_coords = match (value.get("abc"), value.get("xyz")) {
        (Some(abc), _) if !abc.is_null() => vector(abc, &field("abc"))?,
        (_, Some(xyz)) if !xyz.is_null() => {
            lattice.cartesian_to_fractional(vector(xyz, &field("xyz"))?)
        }
        _ => return Err(CrystalError::MissingField(field("abc"))),
    };

    let label = value
        .get("label")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Site {
        species,
        frac_coords,
        label,
    })
}

fn vector(value: &Value, field: &str) -> Result<[f64; 3], CrystalError> {
    let items = value
        .as_array()
        .filter(|items| items.len() == 3)
        .ok_or_else(|| CrystalError::invalid(field, "expected three numbers"))?;
    let mut out = [0.0; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item
            .as_f64()
            .ok_or_else(|| CrystalError::invalid(field, "expected three numbers"))?;
    }
    Ok(out)
}
