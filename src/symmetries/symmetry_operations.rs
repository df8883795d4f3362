use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// A single symmetry operation: rotation (integer matrix in the lattice
/// basis) + fractional translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymOp {
    /// Rotation part with determinant +-1, expressed in lattice coordinates.
    pub rotation: Matrix3<i8>,
    /// Fractional translation, each component in [0, 1).
    pub translation: Vector3<f64>,
}

const TRANSLATION_TOL: f64 = 1e-6;

fn wrap_frac(x: f64) -> f64 {
    let mut r = x.rem_euclid(1.0);
    // Values that wrapped to just below 1 are the same lattice translation as 0
    if (1.0 - r) < TRANSLATION_TOL {
        r = 0.0;
    }
    r
}

impl SymOp {
    pub fn new(rotation: Matrix3<i8>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation: translation.map(wrap_frac),
        }
    }

    /// Identity operation.
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Pure lattice translation (E | t).
    pub fn translation_op(translation: Vector3<f64>) -> Self {
        Self::new(Matrix3::identity(), translation)
    }

    /// Apply to a fractional position: x' = R x + t.
    pub fn apply(&self, point: Vector3<f64>) -> Vector3<f64> {
        let rotation_f64 = self.rotation.map(|x| x as f64);
        rotation_f64 * point + self.translation
    }

    /// Apply to a fractional position and wrap the result into [0, 1).
    pub fn apply_wrapped(&self, point: Vector3<f64>) -> Vector3<f64> {
        self.apply(point).map(wrap_frac)
    }

    /// Transform Miller indices: h' = R^T h.
    pub fn apply_hkl(&self, hkl: Vector3<i32>) -> Vector3<i32> {
        let rot = self.rotation.map(|x| x as i32);
        rot.transpose() * hkl
    }

    /// Composition: self after other, (R1|t1)(R2|t2) = (R1 R2 | R1 t2 + t1).
    pub fn compose(&self, other: &SymOp) -> SymOp {
        let rotation = self.rotation * other.rotation;
        let r1 = self.rotation.map(|x| x as f64);
        SymOp::new(rotation, r1 * other.translation + self.translation)
    }

    pub fn is_identity(&self) -> bool {
        self.rotation == Matrix3::identity() && self.translation.norm() < TRANSLATION_TOL
    }

    /// Equality up to a lattice translation (translations compared mod 1).
    pub fn approx_eq(&self, other: &SymOp) -> bool {
        if self.rotation != other.rotation {
            return false;
        }
        self.translation
            .iter()
            .zip(other.translation.iter())
            .all(|(a, b)| {
                let d = (a - b).rem_euclid(1.0);
                d < TRANSLATION_TOL || (1.0 - d) < TRANSLATION_TOL
            })
    }
}
