use glam::{DMat3, DVec3};

use crate::error::CrystalError;

/// Volumes below this are treated as a degenerate cell.
const SINGULAR_VOLUME: f64 = 1e-10;

/// A periodic lattice spanned by the vectors `a`, `b`, `c` (Å).
///
/// The vectors are stored as the columns of `M`, so cartesian positions are
/// `M · frac`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    matrix: DMat3,
    inverse: DMat3,
}

impl Lattice {
    /// Builds a lattice from three row vectors, as stored in `lattice.matrix`.
    pub fn new(rows: [[f64; 3]; 3]) -> Result<Self, CrystalError> {
        let matrix = DMat3::from_cols_array_2d(&rows);
        let det = matrix.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_VOLUME {
            return Err(CrystalError::SingularLattice { volume: det.abs() });
        }
        Ok(Self {
            matrix,
            inverse: matrix.inverse(),
        })
    }

    /// Builds a lattice from cell lengths (Å) and angles (degrees).
    ///
    /// Standard orientation: `a` along x, `b` in the xy-plane.
    pub fn from_parameters(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self, CrystalError> {
        let (cos_a, cos_b) = (alpha.to_radians().cos(), beta.to_radians().cos());
        let (cos_g, sin_g) = (gamma.to_radians().cos(), gamma.to_radians().sin());

        if sin_g.abs() < 1e-12 {
            return Err(CrystalError::invalid("gamma", "cell angle gamma is degenerate"));
        }

        let cx = c * cos_b;
        let cy = c * (cos_a - cos_b * cos_g) / sin_g;
        let cz_sq = c * c - cx * cx - cy * cy;
        if cz_sq <= 0.0 {
            return Err(CrystalError::invalid(
                "cell angles",
                format!("angles ({}, {}, {}) do not form a cell", alpha, beta, gamma),
            ));
        }

        Self::new([
            [a, 0.0, 0.0],
            [b * cos_g, b * sin_g, 0.0],
            [cx, cy, cz_sq.sqrt()],
        ])
    }

    /// Lattice vectors as rows.
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        self.matrix.to_cols_array_2d()
    }

    /// Cell lengths `(a, b, c)`.
    pub fn abc(&self) -> [f64; 3] {
        [
            self.matrix.x_axis.length(),
            self.matrix.y_axis.length(),
            self.matrix.z_axis.length(),
        ]
    }

    /// Cell angles `(alpha, beta, gamma)` in degrees.
    pub fn angles(&self) -> [f64; 3] {
        let DMat3 {
            x_axis: a,
            y_axis: b,
            z_axis: c,
        } = self.matrix;
        [
            b.angle_between(c).to_degrees(),
            a.angle_between(c).to_degrees(),
            a.angle_between(b).to_degrees(),
        ]
    }

    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    pub fn fractional_to_cartesian(&self, frac: [f64; 3]) -> [f64; 3] {
        self.matrix.mul_vec3(DVec3::from_array(frac)).to_array()
    }

    pub fn cartesian_to_fractional(&self, cart: [f64; 3]) -> [f64; 3] {
        self.inverse.mul_vec3(DVec3::from_array(cart)).to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn cubic_parameters() {
        let lattice = Lattice::new([[3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]]).unwrap();
        assert_eq!(lattice.abc(), [3.0, 3.0, 3.0]);
        for angle in lattice.angles() {
            assert!(close(angle, 90.0));
        }
        assert!(close(lattice.volume(), 27.0));
    }

    #[test]
    fn hexagonal_from_parameters_round_trips() {
        let lattice = Lattice::from_parameters(2.46, 2.46, 6.7, 90.0, 90.0, 120.0).unwrap();
        let [a, b, c] = lattice.abc();
        let [alpha, beta, gamma] = lattice.angles();
        assert!(close(a, 2.46) && close(b, 2.46) && close(c, 6.7));
        assert!(close(alpha, 90.0) && close(beta, 90.0) && close(gamma, 120.0));
    }

    #[test]
    fn fractional_cartesian_inverse() {
        let lattice = Lattice::from_parameters(4.0, 5.0, 6.0, 80.0, 95.0, 105.0).unwrap();
        let frac = [0.25, 0.5, 0.75];
        let back = lattice.cartesian_to_fractional(lattice.fractional_to_cartesian(frac));
        for k in 0..3 {
            assert!(close(frac[k], back[k]));
        }
    }

    #[test]
    fn matrix_rows_and_cartesian_positions() {
        let rows = [[2.0, 0.0, 0.0], [1.0, 3.0, 0.0], [0.0, 0.0, 4.0]];
        let lattice = Lattice::new(rows).unwrap();
        assert_eq!(lattice.matrix(), rows);
        assert_eq!(lattice.fractional_to_cartesian([0.5, 0.5, 0.25]), [1.5, 1.5, 1.0]);
        assert!(close(lattice.volume(), 24.0));
    }

    #[test]
    fn singular_matrix_rejected() {
        let err = Lattice::new([[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).unwrap_err();
        assert!(matches!(err, CrystalError::SingularLattice { .. }));
    }

    #[test]
    fn impossible_angles_rejected() {
        assert!(Lattice::from_parameters(1.0, 1.0, 1.0, 10.0, 10.0, 120.0).is_err());
    }
}
