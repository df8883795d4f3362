use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};
use crate::scattering::term::lande_g;

/// Which set of quantum inputs a magnetic ion's form factor takes.
///
/// Transition-metal d orbitals carry an effective g-factor (orbital moment
/// mostly quenched); rare-earth f orbitals use the full L, S, J set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitalModel {
    GFactor,
    Lsj,
}

/// Magnetic form factor in the dipole approximation,
/// f(Q) = <j0>(Q) + (1 - 2/g) <j2>(Q).
///
/// The radial integrals <j0> and <j2> are 3-Gaussian + constant fits in
/// s = Q / 4 pi; the <j2> fit carries an additional factor s^2.
#[derive(Debug, Clone, Copy)]
pub struct MagFormfactor {
    pub symbol: &'static str,
    pub j0: [f64; 7],
    pub j2: [f64; 7],
    pub model: OrbitalModel,
}

fn gauss3(c: &[f64; 7], s2: f64) -> f64 {
    c[0] * (-c[1] * s2).exp() + c[2] * (-c[3] * s2).exp() + c[4] * (-c[5] * s2).exp() + c[6]
}

impl MagFormfactor {
    /// Radial integral <j0> at scattering wavenumber Q (1/A).
    pub fn j0(&self, q: f64) -> f64 {
        let s = q / (4.0 * PI);
        gauss3(&self.j0, s * s)
    }

    /// Radial integral <j2> at scattering wavenumber Q (1/A).
    pub fn j2(&self, q: f64) -> f64 {
        let s = q / (4.0 * PI);
        let s2 = s * s;
        gauss3(&self.j2, s2) * s2
    }

    /// Dipole form factor with an explicit g-factor (d-orbital mode).
    pub fn formfactor_g(&self, q: f64, g: f64) -> Result<f64> {
        if g.abs() < 1e-12 || !g.is_finite() {
            return Err(LatticeError::numeric_domain(
                "magnetic form factor with vanishing g-factor",
            ));
        }
        Ok(self.j0(q) + (1.0 - 2.0 / g) * self.j2(q))
    }

    /// Dipole form factor from the full quantum-number set (f-orbital mode);
    /// the Lande g-factor is derived from (S, L, J).
    pub fn formfactor_lsj(&self, q: f64, l: f64, s: f64, j: f64) -> Result<f64> {
        let g = lande_g(s, l, j)?;
        self.formfactor_g(q, g)
    }
}

/// Magnetic ions commonly met in neutron work. 3d ions use the g-factor
/// mode, 4f ions the L,S,J mode.
static MAG_FORMFACTORS: &[MagFormfactor] = &[
    MagFormfactor { symbol: "Mn2+", j0: [0.4220, 17.6840, 0.5948, 6.0050, 0.0043, -0.6090, -0.0219], j2: [0.4082, 23.6710, 0.6091, 8.0670, 0.3541, 2.8523, 0.0039], model: OrbitalModel::GFactor },
    MagFormfactor { symbol: "Fe2+", j0: [0.0263, 34.9597, 0.3668, 15.9435, 0.6188, 5.5935, -0.0119], j2: [1.6490, 16.5593, 1.9064, 6.1325, 0.5206, 2.1370, 0.0035], model: OrbitalModel::GFactor },
    MagFormfactor { symbol: "Fe3+", j0: [0.3972, 13.2442, 0.6295, 4.9034, -0.0314, 0.3496, 0.0044], j2: [1.3602, 11.9976, 1.5188, 5.0025, 0.4705, 1.9914, 0.0038], model: OrbitalModel::GFactor },
    MagFormfactor { symbol: "Co2+", j0: [0.4332, 14.3553, 0.5857, 4.6077, -0.0382, 0.1338, 0.0179], j2: [1.9049, 11.6444, 1.3159, 4.3574, 0.3146, 1.6453, 0.0017], model: OrbitalModel::GFactor },
    MagFormfactor { symbol: "Ni2+", j0: [0.0163, 35.8826, 0.3916, 13.2233, 0.6052, 4.3388, -0.0133], j2: [1.7080, 11.0160, 1.2147, 4.1031, 0.3150, 1.5334, 0.0018], model: OrbitalModel::GFactor },
    MagFormfactor { symbol: "Cu2+", j0: [0.0232, 34.9686, 0.4023, 11.5640, 0.5882, 3.8428, -0.0137], j2: [1.5189, 10.4779, 1.1512, 3.8132, 0.2918, 1.3979, 0.0017], model: OrbitalModel::GFactor },
    MagFormfactor { symbol: "Gd3+", j0: [0.0186, 25.3867, 0.2895, 11.1421, 0.7135, 3.7520, -0.0217], j2: [0.2975, 13.2869, 0.9964, 4.9241, 0.3673, 1.7072, 0.0025], model: OrbitalModel::Lsj },
    MagFormfactor { symbol: "Tb3+", j0: [0.0177, 25.5095, 0.2921, 10.5769, 0.7133, 3.5122, -0.0231], j2: [0.2892, 12.4213, 1.1678, 4.8920, 0.3119, 1.6418, 0.0020], model: OrbitalModel::Lsj },
    MagFormfactor { symbol: "Ho3+", j0: [0.0566, 18.3176, 0.3365, 7.6880, 0.6317, 2.9427, -0.0248], j2: [0.2188, 11.0700, 1.0740, 4.4980, 0.3150, 1.5350, 0.0022], model: OrbitalModel::Lsj },
    MagFormfactor { symbol: "Er3+", j0: [0.0586, 17.9802, 0.3540, 7.0964, 0.6126, 2.7482, -0.0251], j2: [0.2580, 10.6010, 1.0898, 4.2390, 0.2930, 1.4110, 0.0019], model: OrbitalModel::Lsj },
];

/// Magnetic-ion table.
pub fn magnetic_ions() -> &'static [MagFormfactor] {
    MAG_FORMFACTORS
}

/// Look up a magnetic form factor by ion symbol.
pub fn find(symbol: &str) -> Option<&'static MagFormfactor> {
    MAG_FORMFACTORS.iter().find(|ff| ff.symbol == symbol)
}
