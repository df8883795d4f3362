// Spurion module: detection of spurious elastic and inelastic scattering
// conditions from instrument kinematics. Pure functions of ki, kf and Q;
// no state survives between calls.

pub mod detector;


pub use detector::{
    bragg_k,               // fn(f64, f64) -> f64 - wavenumber from crystal d-spacing + angle
    check_elastic_spurion, // fn(&Vector3, &Vector3, &Vector3) -> ElasticSpurion
    check_inelastic_spurions, // fn(FixedK, f64, u32) -> Vec<InelasticSpurion>
    check_spurions,        // fn(f64, f64, f64, u32) -> SpurionResult - full scan from scalars
    check_spurions_crystal, // fn - same from mono/analyzer d-spacings and Bragg angles
    e_to_k,                // fn(f64) -> f64 - meV to 1/A
    k_to_e,                // fn(f64) -> f64 - 1/A to meV
    ElasticSpurion,        // struct - A/M-type flags with kf<ki tie-breaks
    InelasticSpurion,      // struct - spurious energy transfer + harmonic orders
    SpurionResult,         // struct - elastic flags + CKI/CKF energy lists
};
