use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::EPS;
use crate::error::{LatticeError, Result};

/// A 2D plane embedded in 3D space, given by an origin and two spanning vectors.
///
/// The coordinate basis of the vectors is the caller's choice (fractional or
/// cartesian); the plane itself is agnostic. Callers must check
/// [`LatticePlane::is_valid`] before using a plane downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatticePlane {
    pub origin: Vector3<f64>,
    pub dir0: Vector3<f64>,
    pub dir1: Vector3<f64>,
    /// Cross product of the spanning vectors, not normalized.
    pub normal: Vector3<f64>,
}

fn is_finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

impl LatticePlane {
    pub fn new(origin: Vector3<f64>, dir0: Vector3<f64>, dir1: Vector3<f64>) -> Self {
        let normal = dir0.cross(&dir1);
        LatticePlane {
            origin,
            dir0,
            dir1,
            normal,
        }
    }

    /// False if either spanning vector is near zero-length, the two are
    /// parallel, or any component is NaN/Inf. Upstream numeric failures must
    /// not silently propagate into peak generation.
    pub fn is_valid(&self) -> bool {
        if !is_finite(&self.origin) || !is_finite(&self.dir0) || !is_finite(&self.dir1) {
            return false;
        }
        self.dir0.norm() > EPS && self.dir1.norm() > EPS && self.normal.norm() > EPS
    }

    /// Unit normal vector.
    pub fn unit_normal(&self) -> Result<Vector3<f64>> {
        let n = self.normal.norm();
        if !n.is_finite() || n <= EPS {
            return Err(LatticeError::invalid_plane(
                "spanning vectors are degenerate, no normal direction",
            ));
        }
        Ok(self.normal / n)
    }

    /// Orthonormal in-plane basis (e0 along dir0, e1 the orthogonalized dir1).
    pub fn orthonormal_basis(&self) -> Result<(Vector3<f64>, Vector3<f64>)> {
        if !self.is_valid() {
            return Err(LatticeError::invalid_plane(
                "cannot orthonormalize a degenerate plane",
            ));
        }
        let e0 = self.dir0 / self.dir0.norm();
        let d1 = self.dir1 - e0 * e0.dot(&self.dir1);
        let n1 = d1.norm();
        if n1 <= EPS {
            return Err(LatticeError::invalid_plane(
                "spanning vectors are parallel",
            ));
        }
        Ok((e0, d1 / n1))
    }

    /// Signed distance of a point from the plane.
    pub fn distance_to(&self, point: &Vector3<f64>) -> Result<f64> {
        let n = self.unit_normal()?;
        Ok(n.dot(&(point - self.origin)))
    }

    /// In-plane coordinates of a point with respect to the orthonormal basis.
    pub fn project(&self, point: &Vector3<f64>) -> Result<(f64, f64)> {
        let (e0, e1) = self.orthonormal_basis()?;
        let rel = point - self.origin;
        Ok((e0.dot(&rel), e1.dot(&rel)))
    }
}
