use log::{debug, error};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_PEAK_INDEX, DEFAULT_UP_DECIMALS};
use crate::error::{LatticeError, Result};
use crate::lattice::{integer_up_direction, LatticePlane, UnitCell};
use crate::peaks::common::{AtomPos, LatticeCommon};
use crate::peaks::generator::{generate_peaks, snap_to_nearest_peak, Peak};
use crate::symmetries::{find_by_name, SpaceGroup};

/// Where the current calculation pass stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Idle,
    Computing,
    PeaksReady,
    CalculationFailed,
}

/// The raw sample inputs of one calculation pass, as handed over by the
/// collaborator layer. Lengths in A, angles in radians (degree conversion
/// happens at the boundary), plane vectors in fractional lattice units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleParams {
    pub lattice: [f64; 3],
    pub angles: [f64; 3],
    pub scatter_x: Vector3<f64>,
    pub scatter_y: Vector3<f64>,
    pub view_x: Vector3<f64>,
    pub view_y: Vector3<f64>,
    /// Hermann-Mauguin symbol, or None for the "not set" sentinel.
    pub space_group: Option<String>,
    pub atoms: Vec<AtomPos>,
    pub powder: bool,
}

impl SampleParams {
    /// Cubic cell with the standard (100)/(010) planes and no symmetry
    /// information, the usual starting configuration.
    pub fn cubic(a: f64) -> Self {
        let right = std::f64::consts::PI / 2.0;
        SampleParams {
            lattice: [a, a, a],
            angles: [right, right, right],
            scatter_x: Vector3::new(1.0, 0.0, 0.0),
            scatter_y: Vector3::new(0.0, 1.0, 0.0),
            view_x: Vector3::new(1.0, 0.0, 0.0),
            view_y: Vector3::new(0.0, 1.0, 0.0),
            space_group: None,
            atoms: Vec::new(),
            powder: false,
        }
    }
}

/// One peak-calculation session driven by input-change events.
///
/// Each call to [`CalcSession::calculate`] runs a full pass: lattice and
/// reciprocal construction, plane validation, symmetry resolution, peak
/// enumeration. A failed pass clears the previous peak set (results are
/// never left stale) and leaves the session ready for the next input
/// change; nothing here is fatal to the process.
#[derive(Debug)]
pub struct CalcSession {
    state: PassState,
    max_index: i32,
    up_decimals: u32,
    common: Option<LatticeCommon>,
    peaks: Vec<Peak>,
    last_error: Option<LatticeError>,
}

impl Default for CalcSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalcSession {
    pub fn new() -> Self {
        CalcSession {
            state: PassState::Idle,
            max_index: DEFAULT_MAX_PEAK_INDEX,
            up_decimals: DEFAULT_UP_DECIMALS,
            common: None,
            peaks: Vec::new(),
            last_error: None,
        }
    }

    /// Bound of the (hkl) search per axis.
    pub fn set_max_index(&mut self, max_index: i32) {
        self.max_index = max_index.abs();
    }

    /// Decimal digits kept when reducing plane directions to integer up
    /// vectors.
    pub fn set_up_decimals(&mut self, decimals: u32) {
        self.up_decimals = decimals;
    }

    /// Run one calculation pass over fresh inputs.
    ///
    /// On success the session holds the new peak set and derived lattice
    /// data; on failure both are cleared and the error is returned after
    /// being recorded for [`CalcSession::last_error`].
    pub fn calculate(&mut self, params: &SampleParams) -> Result<()> {
        self.state = PassState::Computing;
        self.peaks.clear();
        self.common = None;
        self.last_error = None;

        match self.run_pass(params) {
            Ok((common, peaks)) => {
                debug!(
                    "pass complete: {} peaks, cell volume {:.4} A^3",
                    peaks.len(),
                    common.lattice.volume()
                );
                self.common = Some(common);
                self.peaks = peaks;
                self.state = PassState::PeaksReady;
                Ok(())
            }
            Err(e) => {
                error!("lattice calculation failed: {}", e);
                self.last_error = Some(e.clone());
                self.state = PassState::CalculationFailed;
                Err(e)
            }
        }
    }

    fn run_pass(&self, params: &SampleParams) -> Result<(LatticeCommon, Vec<Peak>)> {
        let [a, b, c] = params.lattice;
        let [alpha, beta, gamma] = params.angles;
        let lattice = UnitCell::new(a, b, c, alpha, beta, gamma)?;
        let recip = lattice.reciprocal()?;

        let plane_rlu = LatticePlane::new(Vector3::zeros(), params.scatter_x, params.scatter_y);
        let plane_real = LatticePlane::new(Vector3::zeros(), params.view_x, params.view_y);

        let space_group = resolve_space_group(params.space_group.as_deref())?;

        let common = LatticeCommon::calc(
            lattice,
            recip,
            plane_rlu,
            plane_real,
            space_group,
            &params.atoms,
        )?;
        let peaks = generate_peaks(&common, params.powder, self.max_index)?;
        Ok((common, peaks))
    }

    /// Drop all results and return to the idle state.
    pub fn reset(&mut self) {
        self.state = PassState::Idle;
        self.common = None;
        self.peaks.clear();
        self.last_error = None;
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    /// Peaks of the last successful pass; empty after a failure.
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn last_error(&self) -> Option<&LatticeError> {
        self.last_error.as_ref()
    }

    /// Derived aggregate of the last successful pass.
    pub fn common(&self) -> Option<&LatticeCommon> {
        self.common.as_ref()
    }

    /// Reciprocal cell of the last successful pass.
    pub fn reciprocal_cell(&self) -> Option<&UnitCell> {
        self.common.as_ref().map(|c| &c.recip)
    }

    /// (real, reciprocal) unit cell volumes.
    pub fn volumes(&self) -> Option<(f64, f64)> {
        self.common.as_ref().map(|c| c.volumes())
    }

    /// Resolved crystal-system name, with the "<not set>" sentinel.
    pub fn crystal_system_name(&self) -> &'static str {
        self.common
            .as_ref()
            .and_then(|c| c.space_group)
            .map_or("<not set>", |sg| sg.crystal_system().name())
    }

    /// Integer up direction of the scattering plane.
    pub fn scatter_up_direction(&self) -> Option<Vector3<i64>> {
        self.common.as_ref().map(|c| {
            integer_up_direction(&c.plane_rlu.dir0, &c.plane_rlu.dir1, self.up_decimals)
        })
    }

    /// Integer up direction of the real-lattice view plane.
    pub fn view_up_direction(&self) -> Option<Vector3<i64>> {
        self.common.as_ref().map(|c| {
            integer_up_direction(
                &c.plane_real_frac.dir0,
                &c.plane_real_frac.dir1,
                self.up_decimals,
            )
        })
    }

    /// Nearest peak to a query point in cartesian reciprocal coordinates.
    pub fn snap_to_nearest(&self, query: &Vector3<f64>) -> Option<&Peak> {
        snap_to_nearest_peak(&self.peaks, query)
    }
}

/// Resolve the space-group selector against the registry. None stays the
/// "not set" sentinel; an unknown symbol is a symmetry error for this pass.
fn resolve_space_group(name: Option<&str>) -> Result<Option<&'static SpaceGroup>> {
    match name {
        None => Ok(None),
        Some(symbol) => find_by_name(symbol)
            .map(Some)
            .ok_or_else(|| LatticeError::symmetry_expansion(symbol, "not in the registry")),
    }
}
