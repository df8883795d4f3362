use log::warn;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::EPS;
use crate::error::{LatticeError, Result};
use crate::lattice::{LatticePlane, UnitCell};
use crate::scattering::scatlen;
use crate::symmetries::SpaceGroup;

/// An atom site inside the unit cell: element or ion label plus fractional
/// coordinates. Supplied by the session layer, never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomPos {
    pub label: String,
    pub pos: Vector3<f64>,
}

impl AtomPos {
    pub fn new(label: impl Into<String>, pos: Vector3<f64>) -> Self {
        AtomPos {
            label: label.into(),
            pos,
        }
    }
}

/// The derived aggregate behind one peak-calculation pass.
///
/// Holds everything peak enumeration needs: both lattices, both planes, the
/// scattering plane mapped to cartesian reciprocal coordinates with its
/// orthonormal in-plane basis, the resolved space group and the
/// symmetry-expanded scattering sites. Recomputed wholesale on every
/// parameter change; never mutated in place.
#[derive(Debug, Clone)]
pub struct LatticeCommon {
    pub lattice: UnitCell,
    pub recip: UnitCell,
    /// Scattering plane in relative lattice units (hkl basis).
    pub plane_rlu: LatticePlane,
    /// View plane for the real lattice, in fractional coordinates.
    pub plane_real_frac: LatticePlane,
    /// Scattering plane mapped to cartesian reciprocal coordinates (1/A).
    pub plane_recip_cart: LatticePlane,
    /// View plane mapped to cartesian real-space coordinates (A).
    pub plane_real_cart: LatticePlane,
    /// Orthonormal in-plane basis of the cartesian scattering plane.
    pub basis0: Vector3<f64>,
    pub basis1: Vector3<f64>,
    pub space_group: Option<&'static SpaceGroup>,
    /// Atom sites expanded to all symmetry-equivalent positions, each paired
    /// with its coherent scattering length (fm). Atoms without a tabulated
    /// scattering length are dropped with a warning.
    pub scatter_sites: Vec<(Vector3<f64>, f64)>,
}

impl LatticeCommon {
    /// Derive the pass aggregate from the session inputs.
    ///
    /// Both planes must be valid; the scattering plane must stay
    /// non-degenerate after the mapping into cartesian reciprocal
    /// coordinates. Any failure aborts the pass before peak enumeration
    /// starts.
    pub fn calc(
        lattice: UnitCell,
        recip: UnitCell,
        plane_rlu: LatticePlane,
        plane_real_frac: LatticePlane,
        space_group: Option<&'static SpaceGroup>,
        atoms: &[AtomPos],
    ) -> Result<Self> {
        if !plane_rlu.is_valid() {
            return Err(LatticeError::invalid_plane("invalid scattering plane"));
        }
        if !plane_real_frac.is_valid() {
            return Err(LatticeError::invalid_plane(
                "invalid view plane for the real lattice",
            ));
        }

        let plane_recip_cart = LatticePlane::new(
            recip.frac_to_cart(plane_rlu.origin),
            recip.frac_to_cart(plane_rlu.dir0),
            recip.frac_to_cart(plane_rlu.dir1),
        );
        if !plane_recip_cart.is_valid() {
            return Err(LatticeError::invalid_plane(
                "scattering plane degenerates in cartesian reciprocal coordinates",
            ));
        }
        let (basis0, basis1) = plane_recip_cart.orthonormal_basis()?;

        let plane_real_cart = LatticePlane::new(
            lattice.frac_to_cart(plane_real_frac.origin),
            lattice.frac_to_cart(plane_real_frac.dir0),
            lattice.frac_to_cart(plane_real_frac.dir1),
        );
        if !plane_real_cart.is_valid() {
            return Err(LatticeError::invalid_plane(
                "view plane degenerates in cartesian coordinates",
            ));
        }

        let scatter_sites = expand_scatter_sites(space_group, atoms);

        Ok(LatticeCommon {
            lattice,
            recip,
            plane_rlu,
            plane_real_frac,
            plane_recip_cart,
            plane_real_cart,
            basis0,
            basis1,
            space_group,
            scatter_sites,
        })
    }

    /// Real and reciprocal unit cell volumes.
    pub fn volumes(&self) -> (f64, f64) {
        (self.lattice.volume(), self.recip.volume())
    }
}

/// Expand the user atom list to all symmetry-equivalent sites and attach
/// coherent scattering lengths.
fn expand_scatter_sites(
    space_group: Option<&'static SpaceGroup>,
    atoms: &[AtomPos],
) -> Vec<(Vector3<f64>, f64)> {
    let mut sites = Vec::new();
    for atom in atoms {
        let Some(b_coh) = scatlen::coherent_for_label(&atom.label) else {
            warn!(
                "no scattering length tabulated for '{}', atom skipped",
                atom.label
            );
            continue;
        };
        match space_group {
            Some(sg) => {
                for pos in sg.equivalent_positions(atom.pos, EPS) {
                    sites.push((pos, b_coh));
                }
            }
            None => sites.push((atom.pos.map(|x| x.rem_euclid(1.0)), b_coh)),
        }
    }
    sites
}
