// Scattering module: static form-factor and scattering-length tables with
// their evaluation routines. Read-only after first access.

// ======================== MODULE DECLARATIONS ========================
pub mod formfactor;
pub mod magform;
pub mod scatlen;
pub mod term;


// ======================== ATOMIC FORM FACTORS ========================
pub use formfactor::Formfactor; // struct - 4-Gaussian + constant fit, eval(q) -> f
// free functions: formfactor::atoms(), formfactor::ions(), formfactor::find(symbol)

// ======================== MAGNETIC FORM FACTORS ========================
pub use magform::{MagFormfactor, OrbitalModel};
// MagFormfactor impl methods:
//   j0(q) / j2(q)                              - radial integrals
//   formfactor_g(q, g) -> Result<f64>          - dipole approximation, d-orbital mode
//   formfactor_lsj(q, l, s, j) -> Result<f64>  - f-orbital mode via the Lande g-factor
// free functions: magform::magnetic_ions(), magform::find(symbol)

// ======================== SCATTERING LENGTHS ========================
pub use scatlen::ScatteringLength; // struct - complex coherent/incoherent b in fm
// free functions: scatlen::elements(), scatlen::isotopes(), scatlen::find(symbol),
//                 scatlen::coherent_for_label(label)

// ======================== TERM SYMBOLS ========================
pub use term::{
    eff_magnetons, // fn(g, j) -> f64 - effective moment in Bohr magnetons
    hund,          // fn(&str) -> Result<(S, L, J)> - Hund's-rules ground state
    lande_g,       // fn(s, l, j) -> Result<f64> - Lande g-factor
};
