// Peaks module: the central calculation pass mapping lattice, planes,
// space group and atom list onto the set of Bragg reflections shown in the
// reciprocal-space map.

// ======================== MODULE DECLARATIONS ========================
pub mod common;
pub mod generator;
pub mod session;

mod _tests_generator;
mod _tests_session;

// ======================== PASS AGGREGATE ========================
pub use common::{
    AtomPos,       // struct - element/ion label + fractional coordinates
    LatticeCommon, // struct - everything one peak pass derives from its inputs
};
// LatticeCommon impl methods:
//   calc(lattice, recip, plane_rlu, plane_real, sg, atoms) -> Result<Self>
//   volumes() -> (f64, f64)                               - real and reciprocal cell volumes

// ======================== PEAK ENUMERATION ========================
pub use generator::{
    generate_peaks,       // fn(&LatticeCommon, bool, i32) -> Result<Vec<Peak>> - bounded hkl walk
    snap_to_nearest_peak, // fn(&[Peak], &Vector3<f64>) -> Option<&Peak> - cursor snapping
    structure_factor,     // fn(Vector3<i32>, &[(Vector3<f64>, f64)]) -> f64 - |F|^2
    Peak,                 // struct - reflection + in-plane coordinates + flags
};

// ======================== CALCULATION SESSION ========================
pub use session::{
    CalcSession,  // struct - pass state machine with stale-result clearing
    PassState,    // enum - Idle / Computing / PeaksReady / CalculationFailed
    SampleParams, // struct - raw sample inputs of one pass
};
// CalcSession impl methods:
//   calculate(&mut self, &SampleParams) -> Result<()>     - run one full pass
//   state() / peaks() / last_error() / common()           - pass results
//   volumes() / reciprocal_cell() / crystal_system_name() - derived display data
//   scatter_up_direction() / view_up_direction()          - integer up vectors
//   snap_to_nearest(&self, query) -> Option<&Peak>        - nearest-peak query
//   reset() / set_max_index() / set_up_decimals()         - session control
