use nalgebra::Vector3;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::PLANE_DIST_TOLERANCE;
use crate::error::{LatticeError, Result};
use crate::peaks::common::LatticeCommon;

/// A Bragg reflection in the current scattering plane.
///
/// Ephemeral: regenerated on every calculation pass and handed to the
/// rendering collaborator as plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Peak {
    /// Miller indices of the representative reflection.
    pub hkl: Vector3<i32>,
    /// Position in cartesian reciprocal coordinates (1/A).
    pub position: Vector3<f64>,
    /// Coordinates in the scattering plane's orthonormal basis.
    pub in_plane: (f64, f64),
    /// |Q| in 1/A.
    pub q_norm: f64,
    /// False when the space group forbids the reflection.
    pub allowed: bool,
    /// |F|^2 from coherent scattering lengths; None without an atom list.
    pub intensity: Option<f64>,
    /// Number of reflections collapsed into this entry; 1 outside powder
    /// mode.
    pub multiplicity: u32,
}

/// Nuclear structure factor intensity |F|^2 for a reflection, from the
/// expanded scattering sites (fractional position, coherent b in fm).
pub fn structure_factor(hkl: Vector3<i32>, sites: &[(Vector3<f64>, f64)]) -> f64 {
    let mut f = Complex64::new(0.0, 0.0);
    for (pos, b_coh) in sites {
        let phase = 2.0
            * PI
            * (hkl.x as f64 * pos.x + hkl.y as f64 * pos.y + hkl.z as f64 * pos.z);
        f += *b_coh * Complex64::from_polar(1.0, phase);
    }
    f.norm_sqr()
}

/// Enumerate the Bragg peaks of one calculation pass.
///
/// Walks all (hkl) with indices in [-max_index, max_index], keeps the
/// reflections lying in the scattering plane within the plane-distance
/// tolerance, marks symmetry-forbidden ones and evaluates |F|^2 when
/// scattering sites are available. In powder mode, peaks sharing |Q| are
/// collapsed into one ring entry (forbidden reflections contribute nothing
/// to a powder pattern and are dropped).
pub fn generate_peaks(common: &LatticeCommon, powder: bool, max_index: i32) -> Result<Vec<Peak>> {
    let mut peaks: Vec<Peak> = Vec::new();

    for h in -max_index..=max_index {
        for k in -max_index..=max_index {
            for l in -max_index..=max_index {
                let hkl = Vector3::new(h, k, l);
                let q_cart = common
                    .recip
                    .frac_to_cart(Vector3::new(h as f64, k as f64, l as f64));
                if !q_cart.iter().all(|x| x.is_finite()) {
                    return Err(LatticeError::numeric_domain(format!(
                        "reciprocal position of ({}, {}, {})",
                        h, k, l
                    )));
                }

                let dist = common.plane_recip_cart.distance_to(&q_cart)?;
                if dist.abs() > PLANE_DIST_TOLERANCE {
                    continue;
                }

                let allowed = common
                    .space_group
                    .map_or(true, |sg| sg.is_reflection_allowed(hkl));

                let rel = q_cart - common.plane_recip_cart.origin;
                let in_plane = (common.basis0.dot(&rel), common.basis1.dot(&rel));
                let intensity = if common.scatter_sites.is_empty() {
                    None
                } else {
                    Some(structure_factor(hkl, &common.scatter_sites))
                };

                peaks.push(Peak {
                    hkl,
                    position: q_cart,
                    in_plane,
                    q_norm: q_cart.norm(),
                    allowed,
                    intensity,
                    multiplicity: 1,
                });
            }
        }
    }

    if powder {
        peaks = collapse_powder_rings(peaks);
    }
    Ok(peaks)
}

/// Collapse equal-|Q| peaks into rings. The representative (hkl) and
/// position are those of the first member in generation order; intensities
/// are summed over the ring.
fn collapse_powder_rings(peaks: Vec<Peak>) -> Vec<Peak> {
    let mut rings: Vec<Peak> = Vec::new();
    for peak in peaks {
        if !peak.allowed {
            continue;
        }
        match rings
            .iter_mut()
            .find(|r| (r.q_norm - peak.q_norm).abs() < PLANE_DIST_TOLERANCE)
        {
            Some(ring) => {
                ring.multiplicity += 1;
                ring.intensity = match (ring.intensity, peak.intensity) {
                    (Some(a), Some(b)) => Some(a + b),
                    _ => None,
                };
            }
            None => rings.push(peak),
        }
    }
    rings
}

/// Nearest peak to a query point in cartesian reciprocal coordinates.
///
/// Linear search by Euclidean distance; ties resolve to the first peak in
/// generation order. Empty peak sets yield None.
pub fn snap_to_nearest_peak<'a>(peaks: &'a [Peak], query: &Vector3<f64>) -> Option<&'a Peak> {
    let mut best: Option<(&Peak, f64)> = None;
    for peak in peaks {
        let dist = (peak.position - query).norm();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((peak, dist)),
        }
    }
    best.map(|(peak, _)| peak)
}
