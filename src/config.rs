// Constants

// Tolerances
pub const EPS: f64 = 1e-6; // geometric degeneracy checks and zero snapping
pub const LATTICE_TOLERANCE: f64 = 1e-10; // metric tensor and volume comparisons
pub const PLANE_DIST_TOLERANCE: f64 = 1e-4; // reciprocal-space plane membership, in 1/A

// Defaults
pub const DEFAULT_UP_DECIMALS: u32 = 4; // decimal digits kept when reducing directions to integers
pub const DEFAULT_MAX_PEAK_INDEX: i32 = 5; // hkl search bound per axis
pub const DEFAULT_MAX_SPURION_ORDER: u32 = 5; // highest mono/ana harmonic checked

// Physics
pub const KSQ2E: f64 = 2.072124655; // E [meV] = KSQ2E * k^2, k in 1/A
