use nalgebra::{Matrix3, Vector3};

use crate::config::EPS;
use crate::error::{LatticeError, Result};

/// Gram-Schmidt orthonormalization of an ordered set of vectors.
///
/// Fails when a vector is linearly dependent on its predecessors within
/// the geometric tolerance.
pub fn gram_schmidt(vecs: &[Vector3<f64>]) -> Result<Vec<Vector3<f64>>> {
    let mut ortho: Vec<Vector3<f64>> = Vec::with_capacity(vecs.len());
    for (i, v) in vecs.iter().enumerate() {
        let mut u = *v;
        for e in &ortho {
            u -= e * e.dot(v);
        }
        let n = u.norm();
        if !n.is_finite() || n <= EPS {
            return Err(LatticeError::invalid_plane(format!(
                "vector {} is linearly dependent, cannot orthonormalize",
                i
            )));
        }
        ortho.push(u / n);
    }
    Ok(ortho)
}

/// Rotation matrix about an arbitrary axis by the given angle (right-hand
/// rule, Rodrigues formula). The axis need not be normalized.
pub fn rotation_matrix(axis: &Vector3<f64>, angle: f64) -> Result<Matrix3<f64>> {
    let n = axis.norm();
    if !n.is_finite() || n <= EPS {
        return Err(LatticeError::numeric_domain("rotation axis is degenerate"));
    }
    let u = axis / n;
    let (s, c) = angle.sin_cos();

    let cross = Matrix3::new(
        0.0, -u.z, u.y,
        u.z, 0.0, -u.x,
        -u.y, u.x, 0.0,
    );
    let outer = u * u.transpose();
    Ok(Matrix3::identity() * c + cross * s + outer * (1.0 - c))
}

/// Snap components within eps of zero to exactly zero.
pub fn set_eps_zero(v: Vector3<f64>, eps: f64) -> Vector3<f64> {
    v.map(|x| if x.abs() < eps { 0.0 } else { x })
}

/// Rotate a scattering-plane basis about one of its own orthonormal axes.
///
/// The spanning pair is completed with its normal, orthonormalized, and the
/// first two vectors of the rotated frame are returned as the new spanning
/// pair. Pure function; the caller owns persisting the result.
pub fn rotate_basis(
    dir_x: &Vector3<f64>,
    dir_y: &Vector3<f64>,
    axis_index: usize,
    angle: f64,
) -> Result<(Vector3<f64>, Vector3<f64>)> {
    if axis_index > 2 {
        return Err(LatticeError::numeric_domain(format!(
            "rotation axis index {} out of range 0..=2",
            axis_index
        )));
    }

    let dir_z = dir_x.cross(dir_y);
    let ortho = gram_schmidt(&[*dir_x, *dir_y, dir_z])?;

    let rot = rotation_matrix(&ortho[axis_index], angle)?;
    let new_x = set_eps_zero(rot * ortho[0], EPS);
    let new_y = set_eps_zero(rot * ortho[1], EPS);

    if !new_x.iter().all(|x| x.is_finite()) || !new_y.iter().all(|x| x.is_finite()) {
        return Err(LatticeError::numeric_domain("rotated basis is not finite"));
    }
    Ok((new_x, new_y))
}
