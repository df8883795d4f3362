use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::KSQ2E;
use crate::interfaces::FixedK;

/// Neutron energy (meV) from wavenumber (1/A).
pub fn k_to_e(k: f64) -> f64 {
    KSQ2E * k * k
}

/// Neutron wavenumber (1/A) from energy (meV).
pub fn e_to_k(e: f64) -> f64 {
    (e / KSQ2E).sqrt()
}

/// Wavenumber selected by a monochromator or analyzer crystal with the
/// given d-spacing (A) at Bragg angle theta (radians): k = pi / (d sin theta).
pub fn bragg_k(d_spacing: f64, theta: f64) -> f64 {
    std::f64::consts::PI / (d_spacing * theta.sin())
}

/// Accidental elastic Bragg-scattering flags.
///
/// A-type: Q parallel to kf; M-type: Q parallel to ki (Shirane, ch. 6).
/// The kf-smaller flags record on which side of the elastic line the
/// condition occurs; ki = kf counts as "not smaller".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ElasticSpurion {
    pub a_type: bool,
    pub m_type: bool,
    pub a_kf_smaller_ki: bool,
    pub m_kf_smaller_ki: bool,
}

/// A spurious inelastic condition at one mono/analyzer harmonic pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InelasticSpurion {
    /// Energy transfer at which the spurion appears, meV.
    pub e_mev: f64,
    /// Monochromator reflection order involved.
    pub order_mono: u32,
    /// Analyzer reflection order involved.
    pub order_ana: u32,
}

/// Combined spurion scan result for one kinematic configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpurionResult {
    pub elastic: ElasticSpurion,
    pub inelastic_cki: Vec<InelasticSpurion>,
    pub inelastic_ckf: Vec<InelasticSpurion>,
}

impl SpurionResult {
    pub fn any(&self) -> bool {
        self.elastic.a_type
            || self.elastic.m_type
            || !self.inelastic_cki.is_empty()
            || !self.inelastic_ckf.is_empty()
    }
}

// Angular window within which Q counts as parallel to ki or kf.
const ANGLE_SENSITIVITY_DEG: f64 = 0.5;

/// Check for accidental elastic (Bragg-tail) spurions.
///
/// Vectors are in the scattering plane, Q = ki - kf. Conditions closer to
/// the origin than |k|/50 are ignored; there the parallelity test loses
/// meaning.
pub fn check_elastic_spurion(
    ki: &Vector3<f64>,
    kf: &Vector3<f64>,
    q: &Vector3<f64>,
) -> ElasticSpurion {
    let mut result = ElasticSpurion::default();

    let (ki_len, kf_len, q_len) = (ki.norm(), kf.norm(), q.norm());
    if ki_len <= 0.0 || kf_len <= 0.0 || q_len <= 0.0 {
        return result;
    }
    let q_min = ki_len.max(kf_len) / 50.0;
    if q_len < q_min {
        return result;
    }

    let sensitivity = ANGLE_SENSITIVITY_DEG.to_radians();
    // Shirane's convention points Q the other way
    let q_dir = -q / q_len;

    let angle_kf_q = (kf.dot(&q_dir) / kf_len).clamp(-1.0, 1.0).acos();
    if angle_kf_q.abs() < sensitivity {
        result.a_type = true;
        result.a_kf_smaller_ki = kf_len < ki_len;
    }

    let angle_ki_q = (ki.dot(&q_dir) / ki_len).clamp(-1.0, 1.0).acos();
    if angle_ki_q.abs() < sensitivity {
        result.m_type = true;
        result.m_kf_smaller_ki = kf_len < ki_len;
    }

    result
}

/// Spurious inelastic conditions from higher-order mono/analyzer
/// reflections, for harmonics n = 2..=max_order.
///
/// Fixed ki: the analyzer's n-th order passes elastically scattered
/// neutrons when the nominal transfer is dE = Ei (1 - 1/n^2). Fixed kf:
/// the monochromator's n-th order feeds the spurion at dE = Ef (n^2 - 1).
pub fn check_inelastic_spurions(
    fixed: FixedK,
    e_fixed_mev: f64,
    max_order: u32,
) -> Vec<InelasticSpurion> {
    let mut spurions = Vec::new();
    for order in 2..=max_order {
        let n2 = (order * order) as f64;
        let spurion = match fixed {
            FixedK::Ki => InelasticSpurion {
                e_mev: e_fixed_mev * (1.0 - 1.0 / n2),
                order_mono: 1,
                order_ana: order,
            },
            FixedK::Kf => InelasticSpurion {
                e_mev: e_fixed_mev * (n2 - 1.0),
                order_mono: order,
                order_ana: 1,
            },
        };
        if spurion.e_mev.abs() > 1e-9 {
            spurions.push(spurion);
        }
    }
    spurions
}

/// Full spurion scan from crystal angles: monochromator and analyzer
/// d-spacings (A) with their Bragg angles (radians), plus the sample
/// scattering angle. ki and kf follow from the Bragg condition.
pub fn check_spurions_crystal(
    d_mono: f64,
    theta_mono: f64,
    d_ana: f64,
    theta_ana: f64,
    two_theta: f64,
    max_order: u32,
) -> SpurionResult {
    check_spurions(
        bragg_k(d_mono, theta_mono),
        bragg_k(d_ana, theta_ana),
        two_theta,
        max_order,
    )
}

/// Full spurion scan from scalar kinematics: wavenumbers ki, kf (1/A) and
/// the scattering angle 2theta (radians). The in-plane vectors are
/// reconstructed with ki along x.
pub fn check_spurions(ki: f64, kf: f64, two_theta: f64, max_order: u32) -> SpurionResult {
    let vec_ki = Vector3::new(ki, 0.0, 0.0);
    let vec_kf = Vector3::new(kf * two_theta.cos(), kf * two_theta.sin(), 0.0);
    let vec_q = vec_ki - vec_kf;

    SpurionResult {
        elastic: check_elastic_spurion(&vec_ki, &vec_kf, &vec_q),
        inelastic_cki: check_inelastic_spurions(FixedK::Ki, k_to_e(ki), max_order),
        inelastic_ckf: check_inelastic_spurions(FixedK::Kf, k_to_e(kf), max_order),
    }
}
