use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The seven crystal systems, plus the "not set" sentinel used when no
/// space group has been chosen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CrystalSystem {
    NotSet,
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

impl CrystalSystem {
    /// Display name, matching the "<not set>" sentinel convention.
    pub fn name(&self) -> &'static str {
        match self {
            CrystalSystem::NotSet => "<not set>",
            CrystalSystem::Triclinic => "triclinic",
            CrystalSystem::Monoclinic => "monoclinic",
            CrystalSystem::Orthorhombic => "orthorhombic",
            CrystalSystem::Tetragonal => "tetragonal",
            CrystalSystem::Trigonal => "trigonal",
            CrystalSystem::Hexagonal => "hexagonal",
            CrystalSystem::Cubic => "cubic",
        }
    }

    /// Crystal system for an International Tables space-group number.
    pub fn for_group_number(number: u16) -> CrystalSystem {
        match number {
            1..=2 => CrystalSystem::Triclinic,
            3..=15 => CrystalSystem::Monoclinic,
            16..=74 => CrystalSystem::Orthorhombic,
            75..=142 => CrystalSystem::Tetragonal,
            143..=167 => CrystalSystem::Trigonal,
            168..=194 => CrystalSystem::Hexagonal,
            195..=230 => CrystalSystem::Cubic,
            _ => CrystalSystem::NotSet,
        }
    }

    /// Apply the metric constraints of this crystal system to a free set of
    /// lattice parameters, returning the constrained set.
    ///
    /// Trigonal cells use the hexagonal-axes setting. `NotSet` and
    /// `Triclinic` leave all six parameters free.
    pub fn constrain_parameters(
        &self,
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> (f64, f64, f64, f64, f64, f64) {
        let right = PI / 2.0;
        match self {
            CrystalSystem::NotSet | CrystalSystem::Triclinic => (a, b, c, alpha, beta, gamma),
            CrystalSystem::Monoclinic => (a, b, c, right, beta, right),
            CrystalSystem::Orthorhombic => (a, b, c, right, right, right),
            CrystalSystem::Tetragonal => (a, a, c, right, right, right),
            CrystalSystem::Trigonal | CrystalSystem::Hexagonal => {
                (a, a, c, right, right, 2.0 * PI / 3.0)
            }
            CrystalSystem::Cubic => (a, a, a, right, right, right),
        }
    }
}
