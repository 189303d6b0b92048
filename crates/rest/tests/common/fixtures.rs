//! Material record fixtures.
//!
//! Records follow the stored document layout: a pymatgen-style `structure`
//! mapping, a `metadata` tree per calculation step and the descriptive
//! top-level attributes.

use serde_json::{Value, json};

/// Hex id of a record that is never seeded.
pub const MISSING_ID: &str = "0123456789abcdef01234567";

/// Conventional diamond cell, 8 carbon sites, with every section populated.
pub fn diamond() -> Value {
    let a = 3.567;
    let coords = [
        [0.0, 0.0, 0.0],
        [0.0, 0.5, 0.5],
        [0.5, 0.0, 0.5],
        [0.5, 0.5, 0.0],
        [0.25, 0.25, 0.25],
        [0.25, 0.75, 0.75],
        [0.75, 0.25, 0.75],
        [0.75, 0.75, 0.25],
    ];
    let sites: Vec<Value> = coords
        .iter()
        .map(|abc| {
            json!({
                "species": [{"element": "C", "occu": 1}],
                "abc": abc,
                "xyz": [abc[0] * a, abc[1] * a, abc[2] * a],
                "label": "C",
                "properties": {}
            })
        })
        .collect();

    json!({
        "sacada_id": "SACADA-0001",
        "formula": "C8",
        "reduced_formula": "C",
        "crystal_system": "cubic",
        "space_group_symbol": "Fd-3m",
        "Sites": 8,
        "structure": {
            "@module": "pymatgen.core.structure",
            "@class": "Structure",
            "charge": 0,
            "lattice": {
                "matrix": [[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]],
                "pbc": [true, true, true],
                "a": a, "b": a, "c": a,
                "alpha": 90.0, "beta": 90.0, "gamma": 90.0,
                "volume": a * a * a
            },
            "properties": {},
            "sites": sites
        },
        "metadata": {
            "opt": {
                "INCAR": "PREC = Accurate\nENCUT = 520\nIBRION = 2\n",
                "KPOINTS": "Automatic\n0\nGamma\n8 8 8\n",
                "CONTCAR": "C8\n1.0\n3.567 0 0\n"
            },
            "scf": {
                "INCAR": "PREC = Accurate\nENCUT = 520\nNSW = 0\n",
                "KPOINTS": "Automatic\n0\nGamma\n12 12 12\n",
                "CONTCAR": "C8\n1.0\n3.567 0 0\n"
            },
            "elastic": {
                "INCAR": "IBRION = 6\nISIF = 3\n",
                "KPOINTS": "Automatic\n0\nGamma\n10 10 10\n",
                "ELASTIC_TENSOR": "1050 125 125\n",
                "prop_data": {
                    "stiffness_tensor": [[1050, 125, 125], [125, 1050, 125], [125, 125, 1050]],
                    "compliance_tensor": [[0.00098, -0.0001, -0.0001], [-0.0001, 0.00098, -0.0001], [-0.0001, -0.0001, 0.00098]],
                    "Pugh_ratio": 1.19,
                    "Cauchy_Pressure": -434.0,
                    "Kleinman_parameter": 0.23,
                    "Universal_Elastic_Anisotropy": 0.19,
                    "Chung_Buessem_Anisotropy": 0.02,
                    "Isotropic_Poissons_Ratio": 0.07,
                    "Longitudinal_wave_velocity": 18.3,
                    "Transverse_wave_velocity": 12.4,
                    "Average_wave_velocity": 13.5,
                    "Debye_temperature": 2230.0,
                    "stability": true,
                    "anisotropic_mechanical_properties": {"Bulk_modulus": 433.0},
                    "average_mechanical_properties": {"Shear_modulus": 521.0},
                    "average_youngs_modulus": 1116.0
                }
            },
            "band": {
                "band_gap": {
                    "Band Character": "Indirect",
                    "Band Gap (eV)": 4.11,
                    "Eigenvalue of VBM (eV)": 6.92,
                    "Eigenvalue of CBM (eV)": 11.03,
                    "Fermi Energy (eV)": 6.95,
                    "HOMO & LUMO Bands": [16, 17],
                    "Location of VBM": [0.0, 0.0, 0.0],
                    "Location of CBM": [0.0, 0.375, 0.375]
                },
                "Klabels": {"\\Gamma": 0.0, "X": 1.76}
            }
        }
    })
}

/// Hexagonal graphite with no calculation metadata.
pub fn graphite() -> Value {
    json!({
        "formula": "C4",
        "reduced_formula": "C",
        "crystal_system": "hexagonal",
        "space_group_symbol": "P6_3/mmc",
        "Sites": 4,
        "structure": {
            "lattice": {
                "matrix": [[2.464, 0.0, 0.0], [-1.232, 2.133886, 0.0], [0.0, 0.0, 6.711]]
            },
            "sites": [
                {"species": [{"element": "C", "occu": 1}], "abc": [0.0, 0.0, 0.25]},
                {"species": [{"element": "C", "occu": 1}], "abc": [0.0, 0.0, 0.75]},
                {"species": [{"element": "C", "occu": 1}], "abc": [0.333333, 0.666667, 0.25]},
                {"species": [{"element": "C", "occu": 1}], "abc": [0.666667, 0.333333, 0.75]}
            ]
        }
    })
}

/// A summary-only record numbered `n`.
pub fn numbered(n: usize) -> Value {
    json!({
        "sacada_id": format!("SACADA-{:04}", n),
        "formula": format!("C{}", n + 1),
        "reduced_formula": "C",
        "crystal_system": if n % 2 == 0 { "cubic" } else { "hexagonal" },
        "space_group_symbol": format!("SG-{}", n % 5),
        "Sites": n + 1
    })
}
