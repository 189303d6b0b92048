use std::fmt::{self, Write};

use crate::model::{Structure, format_amount};

/// Formatting options for [`write`].
#[derive(Debug, Clone, PartialEq)]
pub struct CifOptions {
    /// Digits after the decimal point for cell lengths, angles, volume and
    /// fractional coordinates.
    pub significant_figures: usize,
}

impl Default for CifOptions {
    fn default() -> Self {
        Self {
            significant_figures: 6,
        }
    }
}

/// Renders `structure` as a P1 CIF document.
///
/// `data_name` defaults to the reduced formula.
pub fn write(structure: &Structure, data_name: Option<&str>, options: &CifOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_to(&mut out, structure, data_name, options);
    out
}

/// Streams the CIF rendering of `structure` into `writer`.
pub fn write_to<W: Write>(
    writer: &mut W,
    structure: &Structure,
    data_name: Option<&str>,
    options: &CifOptions,
) -> fmt::Result {
    let prec = options.significant_figures;
    let lattice = structure.lattice();
    let composition = structure.composition();
    let reduced = composition.reduced_formula();
    let [a, b, c] = lattice.abc();
    let [alpha, beta, gamma] = lattice.angles();

    let block_name: String = data_name
        .unwrap_or(&reduced)
        .chars()
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .collect();

    writeln!(writer, "# generated by matdb")?;
    writeln!(writer, "data_{}", block_name)?;
    writeln!(writer, "_symmetry_space_group_name_H-M   'P 1'")?;
    writeln!(writer, "_cell_length_a   {:.*}", prec, a)?;
    writeln!(writer, "_cell_length_b   {:.*}", prec, b)?;
    writeln!(writer, "_cell_length_c   {:.*}", prec, c)?;
    writeln!(writer, "_cell_angle_alpha   {:.*}", prec, alpha)?;
    writeln!(writer, "_cell_angle_beta   {:.*}", prec, beta)?;
    writeln!(writer, "_cell_angle_gamma   {:.*}", prec, gamma)?;
    writeln!(writer, "_symmetry_Int_Tables_number   1")?;
    writeln!(writer, "_chemical_formula_structural   {}", quote(&reduced))?;
    writeln!(writer, "_chemical_formula_sum   {}", quote(&composition.formula()))?;
    writeln!(writer, "_cell_volume   {:.*}", prec, lattice.volume())?;
    writeln!(writer, "_cell_formula_units_Z   {}", composition.formula_units())?;

    writeln!(writer, "loop_")?;
    writeln!(writer, " _symmetry_equiv_pos_site_id")?;
    writeln!(writer, " _symmetry_equiv_pos_as_xyz")?;
    writeln!(writer, "  1  'x, y, z'")?;

    writeln!(writer, "loop_")?;
    for tag in [
        "_atom_site_type_symbol",
        "_atom_site_label",
        "_atom_site_symmetry_multiplicity",
        "_atom_site_fract_x",
        "_atom_site_fract_y",
        "_atom_site_fract_z",
        "_atom_site_occupancy",
    ] {
        writeln!(writer, " {}", tag)?;
    }

    let mut counter = 0usize;
    for site in structure.sites() {
        let [x, y, z] = site.frac_coords;
        for species in &site.species {
            writeln!(
                writer,
                "  {}  {}{}  1  {:.*}  {:.*}  {:.*}  {}",
                species.element,
                species.element,
                counter,
                prec,
                x,
                prec,
                y,
                prec,
                z,
                format_amount(species.occupancy),
            )?;
            counter += 1;
        }
    }

    Ok(())
}

fn quote(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("'{}'", value)
    } else {
        value.to_string()
    }
}
