//! Error types for lattice and scattering calculations.
//!
//! Every failure here is recoverable at the granularity of one calculation
//! pass: the peak generator catches the error, clears its previous result
//! set and stays usable for the next input change.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LatticeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    /// Non-positive length, angle outside (0, pi) or vanishing cell volume.
    #[error("invalid lattice: {reason}")]
    InvalidLattice { reason: String },

    /// Degenerate or non-finite spanning vectors.
    #[error("invalid plane: {reason}")]
    InvalidPlane { reason: String },

    /// Space-group operations could not be resolved or expanded.
    #[error("symmetry expansion failed for '{group}': {reason}")]
    SymmetryExpansion { group: String, reason: String },

    /// NaN or infinity produced mid-calculation.
    #[error("numeric domain error in {context}")]
    NumericDomain { context: String },
}

impl LatticeError {
    pub fn invalid_lattice(reason: impl Into<String>) -> Self {
        Self::InvalidLattice {
            reason: reason.into(),
        }
    }

    pub fn invalid_plane(reason: impl Into<String>) -> Self {
        Self::InvalidPlane {
            reason: reason.into(),
        }
    }

    pub fn symmetry_expansion(group: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SymmetryExpansion {
            group: group.into(),
            reason: reason.into(),
        }
    }

    pub fn numeric_domain(context: impl Into<String>) -> Self {
        Self::NumericDomain {
            context: context.into(),
        }
    }
}
