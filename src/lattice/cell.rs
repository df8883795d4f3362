use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::LATTICE_TOLERANCE;
use crate::error::{LatticeError, Result};

/// A triclinic unit cell defined by 6 lattice parameters.
///
/// Covers both real-space and reciprocal cells; the two are related through
/// [`UnitCell::reciprocal`]. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCell {
    /// Lattice constant a in A (or 1/A for a reciprocal cell).
    pub a: f64,
    /// Lattice constant b.
    pub b: f64,
    /// Lattice constant c.
    pub c: f64,
    /// Angle between b and c, in radians.
    pub alpha: f64,
    /// Angle between a and c, in radians.
    pub beta: f64,
    /// Angle between a and b, in radians.
    pub gamma: f64,
    /// Basis vectors (columns), a along x, b in the xy plane.
    pub basis: Matrix3<f64>,
    /// Inverse of the basis matrix.
    pub basis_inv: Matrix3<f64>,
    /// Metric tensor G = B^T * B.
    pub metric: Matrix3<f64>,
    /// Unit cell volume = det(basis).
    pub volume: f64,
}

impl UnitCell {
    /// Construct a unit cell from 6 lattice parameters (lengths in A, angles in radians).
    ///
    /// Fails if any length is non-positive, any angle lies outside (0, pi),
    /// or the parameters describe a degenerate parallelepiped.
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        for (name, len) in [("a", a), ("b", b), ("c", c)] {
            if !len.is_finite() || len <= 0.0 {
                return Err(LatticeError::invalid_lattice(format!(
                    "lattice constant {} = {} must be positive",
                    name, len
                )));
            }
        }
        for (name, angle) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !angle.is_finite() || angle <= 0.0 || angle >= PI {
                return Err(LatticeError::invalid_lattice(format!(
                    "lattice angle {} = {} rad must lie in (0, pi)",
                    name, angle
                )));
            }
        }

        // Triclinic volume factor; vanishes for degenerate angle triples.
        let (ca, cb, cg) = (alpha.cos(), beta.cos(), gamma.cos());
        let w_sq = 1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg;
        if w_sq <= LATTICE_TOLERANCE {
            return Err(LatticeError::invalid_lattice(format!(
                "angle triple ({}, {}, {}) rad yields a vanishing cell volume",
                alpha, beta, gamma
            )));
        }
        let w = w_sq.sqrt();
        let volume = a * b * c * w;

        let sg = gamma.sin();
        let basis = Matrix3::new(
            a, b * cg, c * cb,
            0.0, b * sg, c * (ca - cb * cg) / sg,
            0.0, 0.0, c * w / sg,
        );
        let basis_inv = basis.try_inverse().ok_or_else(|| {
            LatticeError::invalid_lattice("basis matrix is singular".to_string())
        })?;
        let metric = basis.transpose() * basis;

        Ok(UnitCell {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
            basis,
            basis_inv,
            metric,
            volume,
        })
    }

    /// Cubic cell a = b = c, all angles 90 degrees.
    pub fn cubic(a: f64) -> Result<Self> {
        Self::new(a, a, a, PI / 2.0, PI / 2.0, PI / 2.0)
    }

    /// Hexagonal cell a = b, gamma = 120 degrees.
    pub fn hexagonal(a: f64, c: f64) -> Result<Self> {
        Self::new(a, a, c, PI / 2.0, PI / 2.0, 2.0 * PI / 3.0)
    }

    /// Orthorhombic cell, all angles 90 degrees.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<Self> {
        Self::new(a, b, c, PI / 2.0, PI / 2.0, PI / 2.0)
    }

    /// The reciprocal cell in the 2 pi convention.
    ///
    /// Applying this twice returns the original cell parameters.
    pub fn reciprocal(&self) -> Result<UnitCell> {
        let recip_basis = 2.0 * PI * self.basis_inv.transpose();

        let va: Vector3<f64> = recip_basis.column(0).into();
        let vb: Vector3<f64> = recip_basis.column(1).into();
        let vc: Vector3<f64> = recip_basis.column(2).into();

        let (ra, rb, rc) = (va.norm(), vb.norm(), vc.norm());
        let alpha = (vb.dot(&vc) / (rb * rc)).clamp(-1.0, 1.0).acos();
        let beta = (va.dot(&vc) / (ra * rc)).clamp(-1.0, 1.0).acos();
        let gamma = (va.dot(&vb) / (ra * rb)).clamp(-1.0, 1.0).acos();

        UnitCell::new(ra, rb, rc, alpha, beta, gamma)
    }

    /// Convert fractional (u,v,w) coordinates to cartesian.
    pub fn frac_to_cart(&self, v_frac: Vector3<f64>) -> Vector3<f64> {
        self.basis * v_frac
    }

    /// Convert cartesian coordinates to fractional (u,v,w).
    pub fn cart_to_frac(&self, v_cart: Vector3<f64>) -> Vector3<f64> {
        self.basis_inv * v_cart
    }

    /// Lattice constants (a, b, c).
    pub fn lattice_parameters(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Lattice angles (alpha, beta, gamma) in radians.
    pub fn lattice_angles(&self) -> (f64, f64, f64) {
        (self.alpha, self.beta, self.gamma)
    }

    /// Unit cell volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Metric tensor G = B^T * B.
    pub fn metric_tensor(&self) -> &Matrix3<f64> {
        &self.metric
    }

    /// Basis vectors as columns.
    pub fn basis_matrix(&self) -> &Matrix3<f64> {
        &self.basis
    }

    /// Parameter-wise comparison within a tolerance.
    pub fn approx_eq(&self, other: &UnitCell, tol: f64) -> bool {
        (self.a - other.a).abs() < tol
            && (self.b - other.b).abs() < tol
            && (self.c - other.c).abs() < tol
            && (self.alpha - other.alpha).abs() < tol
            && (self.beta - other.beta).abs() < tol
            && (self.gamma - other.gamma).abs() < tol
    }
}
