use std::sync::LazyLock;

use log::error;
use nalgebra::{Matrix3, Vector3};
use num_complex::Complex64;

use crate::error::{LatticeError, Result};
use crate::symmetries::crystal_system::CrystalSystem;
use crate::symmetries::symmetry_operations::SymOp;

/// A crystallographic space group: symbol, International Tables number,
/// crystal system and the full set of symmetry operations.
///
/// Instances live in the process-wide registry and are handed out as
/// `&'static` references; they are never constructed per calculation pass.
#[derive(Debug, Clone)]
pub struct SpaceGroup {
    pub number: u16,
    pub symbol: &'static str,
    pub system: CrystalSystem,
    pub ops: Vec<SymOp>,
}

impl SpaceGroup {
    pub fn crystal_system(&self) -> CrystalSystem {
        self.system
    }

    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Systematic-absence test for a reflection (hkl).
    ///
    /// Sums the phase factors exp(2 pi i h.t) over all operations whose
    /// rotation part leaves hkl invariant; the reflection is forbidden when
    /// the sum vanishes.
    pub fn is_reflection_allowed(&self, hkl: Vector3<i32>) -> bool {
        let mut sum = Complex64::new(0.0, 0.0);
        for op in &self.ops {
            if op.apply_hkl(hkl) == hkl {
                let phase = 2.0
                    * std::f64::consts::PI
                    * (hkl.x as f64 * op.translation.x
                        + hkl.y as f64 * op.translation.y
                        + hkl.z as f64 * op.translation.z);
                sum += Complex64::from_polar(1.0, phase);
            }
        }
        sum.norm() > 1e-6
    }

    /// All positions equivalent to a fractional position, wrapped into the
    /// unit cell and deduplicated within the tolerance.
    pub fn equivalent_positions(&self, pos: Vector3<f64>, tol: f64) -> Vec<Vector3<f64>> {
        let mut out: Vec<Vector3<f64>> = Vec::new();
        for op in &self.ops {
            let cand = op.apply_wrapped(pos);
            let duplicate = out.iter().any(|p| {
                (cand - p)
                    .iter()
                    .all(|d| {
                        let w = d.rem_euclid(1.0);
                        w < tol || (1.0 - w) < tol
                    })
            });
            if !duplicate {
                out.push(cand);
            }
        }
        out
    }
}

// ======================== GROUP DEFINITIONS ========================

/// Lattice centering; determines the pure translations added to every group.
#[derive(Debug, Clone, Copy)]
enum Centering {
    P,
    C,
    I,
    F,
    R,
}

impl Centering {
    /// Centering translations in twelfths of a cell edge.
    fn translations(&self) -> &'static [[i8; 3]] {
        match self {
            Centering::P => &[],
            Centering::C => &[[6, 6, 0]],
            Centering::I => &[[6, 6, 6]],
            Centering::F => &[[0, 6, 6], [6, 0, 6], [6, 6, 0]],
            Centering::R => &[[8, 4, 4], [4, 8, 8]],
        }
    }
}

/// A generator: rotation matrix (row major) + translation in twelfths.
type Generator = ([i8; 9], [i8; 3]);

struct GroupDef {
    number: u16,
    symbol: &'static str,
    centering: Centering,
    generators: &'static [Generator],
}

// Rotation parts used by the generator table, all in lattice coordinates.
const INV: [i8; 9] = [-1, 0, 0, 0, -1, 0, 0, 0, -1];
const R2X: [i8; 9] = [1, 0, 0, 0, -1, 0, 0, 0, -1];
const R2Y: [i8; 9] = [-1, 0, 0, 0, 1, 0, 0, 0, -1];
const R2Z: [i8; 9] = [-1, 0, 0, 0, -1, 0, 0, 0, 1];
const MX: [i8; 9] = [-1, 0, 0, 0, 1, 0, 0, 0, 1];
const MY: [i8; 9] = [1, 0, 0, 0, -1, 0, 0, 0, 1];
const MZ: [i8; 9] = [1, 0, 0, 0, 1, 0, 0, 0, -1];
const R4Z: [i8; 9] = [0, -1, 0, 1, 0, 0, 0, 0, 1];
const R3HEX: [i8; 9] = [0, -1, 0, 1, -1, 0, 0, 0, 1];
const R2_110: [i8; 9] = [0, 1, 0, 1, 0, 0, 0, 0, -1];
const M_110: [i8; 9] = [0, 1, 0, 1, 0, 0, 0, 0, 1];
const R3_111: [i8; 9] = [0, 0, 1, 1, 0, 0, 0, 1, 0];

const T0: [i8; 3] = [0, 0, 0];

/// Space groups commonly met in triple-axis work. The registry is a
/// representative subset of the 230 groups; each entry is expanded to its
/// full operation set from generators at first access.
static GROUP_DEFS: &[GroupDef] = &[
    GroupDef { number: 1, symbol: "P1", centering: Centering::P, generators: &[] },
    GroupDef { number: 2, symbol: "P-1", centering: Centering::P, generators: &[(INV, T0)] },
    GroupDef { number: 4, symbol: "P21", centering: Centering::P, generators: &[(R2Y, [0, 6, 0])] },
    GroupDef { number: 5, symbol: "C2", centering: Centering::C, generators: &[(R2Y, T0)] },
    GroupDef { number: 12, symbol: "C2/m", centering: Centering::C, generators: &[(R2Y, T0), (INV, T0)] },
    GroupDef { number: 14, symbol: "P21/c", centering: Centering::P, generators: &[(R2Y, [0, 6, 6]), (INV, T0)] },
    GroupDef { number: 19, symbol: "P212121", centering: Centering::P, generators: &[(R2Z, [6, 0, 6]), (R2Y, [0, 6, 6])] },
    GroupDef { number: 47, symbol: "Pmmm", centering: Centering::P, generators: &[(MX, T0), (MY, T0), (MZ, T0)] },
    GroupDef { number: 62, symbol: "Pnma", centering: Centering::P, generators: &[(R2Z, [6, 0, 6]), (R2Y, [0, 6, 0]), (INV, T0)] },
    GroupDef { number: 69, symbol: "Fmmm", centering: Centering::F, generators: &[(MX, T0), (MY, T0), (MZ, T0)] },
    GroupDef { number: 71, symbol: "Immm", centering: Centering::I, generators: &[(MX, T0), (MY, T0), (MZ, T0)] },
    GroupDef { number: 123, symbol: "P4/mmm", centering: Centering::P, generators: &[(R4Z, T0), (R2X, T0), (INV, T0)] },
    GroupDef { number: 139, symbol: "I4/mmm", centering: Centering::I, generators: &[(R4Z, T0), (R2X, T0), (INV, T0)] },
    GroupDef { number: 148, symbol: "R-3", centering: Centering::R, generators: &[(R3HEX, T0), (INV, T0)] },
    GroupDef { number: 166, symbol: "R-3m", centering: Centering::R, generators: &[(R3HEX, T0), (R2_110, T0), (INV, T0)] },
    GroupDef { number: 167, symbol: "R-3c", centering: Centering::R, generators: &[(R3HEX, T0), (R2_110, [0, 0, 6]), (INV, T0)] },
    GroupDef { number: 191, symbol: "P6/mmm", centering: Centering::P, generators: &[(R3HEX, T0), (R2Z, T0), (R2_110, T0), (INV, T0)] },
    GroupDef { number: 194, symbol: "P63/mmc", centering: Centering::P, generators: &[(R3HEX, T0), (R2Z, [0, 0, 6]), (R2_110, T0), (INV, T0)] },
    GroupDef { number: 198, symbol: "P213", centering: Centering::P, generators: &[(R3_111, T0), (R2Z, [6, 0, 6]), (R2Y, [0, 6, 6])] },
    GroupDef { number: 216, symbol: "F-43m", centering: Centering::F, generators: &[(R3_111, T0), (M_110, T0)] },
    GroupDef { number: 221, symbol: "Pm-3m", centering: Centering::P, generators: &[(R3_111, T0), (R4Z, T0), (INV, T0)] },
    GroupDef { number: 225, symbol: "Fm-3m", centering: Centering::F, generators: &[(R3_111, T0), (R4Z, T0), (INV, T0)] },
    GroupDef { number: 229, symbol: "Im-3m", centering: Centering::I, generators: &[(R3_111, T0), (R4Z, T0), (INV, T0)] },
];

// ======================== GROUP EXPANSION ========================

/// Largest operation count among the 230 space groups (Fm-3m and friends).
const MAX_GROUP_OPS: usize = 192;
const MAX_CLOSURE_ROUNDS: usize = 16;

fn generator_to_op(gen: &Generator) -> SymOp {
    let (m, t) = gen;
    let rotation = Matrix3::from_row_slice(m);
    let translation = Vector3::new(
        t[0] as f64 / 12.0,
        t[1] as f64 / 12.0,
        t[2] as f64 / 12.0,
    );
    SymOp::new(rotation, translation)
}

/// Expand a generator set (plus centering translations) to the full group
/// by closure under composition.
///
/// Fails when the set does not close within the operation-count bound,
/// which indicates inconsistent generators.
pub fn expand_group(
    symbol: &str,
    generators: &[SymOp],
    centering_translations: &[Vector3<f64>],
) -> Result<Vec<SymOp>> {
    let mut ops: Vec<SymOp> = vec![SymOp::identity()];
    for g in generators {
        if !ops.iter().any(|o| o.approx_eq(g)) {
            ops.push(g.clone());
        }
    }
    for t in centering_translations {
        let op = SymOp::translation_op(*t);
        if !ops.iter().any(|o| o.approx_eq(&op)) {
            ops.push(op);
        }
    }

    for _ in 0..MAX_CLOSURE_ROUNDS {
        let mut new_ops: Vec<SymOp> = Vec::new();
        for a in &ops {
            for b in &ops {
                let prod = a.compose(b);
                if !ops.iter().chain(new_ops.iter()).any(|o| o.approx_eq(&prod)) {
                    new_ops.push(prod);
                    if ops.len() + new_ops.len() > MAX_GROUP_OPS {
                        return Err(LatticeError::symmetry_expansion(
                            symbol,
                            format!("generator set does not close within {} operations", MAX_GROUP_OPS),
                        ));
                    }
                }
            }
        }
        if new_ops.is_empty() {
            return Ok(ops);
        }
        ops.extend(new_ops);
    }

    Err(LatticeError::symmetry_expansion(
        symbol,
        "closure did not stabilize",
    ))
}

fn build_group(def: &GroupDef) -> Result<SpaceGroup> {
    let generators: Vec<SymOp> = def.generators.iter().map(generator_to_op).collect();
    let centering: Vec<Vector3<f64>> = def
        .centering
        .translations()
        .iter()
        .map(|t| Vector3::new(t[0] as f64 / 12.0, t[1] as f64 / 12.0, t[2] as f64 / 12.0))
        .collect();
    let ops = expand_group(def.symbol, &generators, &centering)?;

    Ok(SpaceGroup {
        number: def.number,
        symbol: def.symbol,
        system: CrystalSystem::for_group_number(def.number),
        ops,
    })
}

// ======================== REGISTRY ========================

static REGISTRY: LazyLock<Vec<SpaceGroup>> = LazyLock::new(|| {
    GROUP_DEFS
        .iter()
        .filter_map(|def| match build_group(def) {
            Ok(sg) => Some(sg),
            Err(e) => {
                error!("space group {} dropped from registry: {}", def.symbol, e);
                None
            }
        })
        .collect()
});

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// All registered space groups, in International Tables order.
pub fn all_groups() -> &'static [SpaceGroup] {
    &REGISTRY
}

/// Look up a space group by Hermann-Mauguin symbol (case-insensitive).
pub fn find_by_name(name: &str) -> Option<&'static SpaceGroup> {
    let wanted = normalize(name);
    REGISTRY.iter().find(|sg| normalize(sg.symbol) == wanted)
}

/// Look up a space group by International Tables number.
pub fn find_by_number(number: u16) -> Option<&'static SpaceGroup> {
    REGISTRY.iter().find(|sg| sg.number == number)
}

/// Case-insensitive substring filter over the group symbols, for
/// interactive list population.
pub fn filter_by_name(filter: &str) -> Vec<&'static SpaceGroup> {
    let wanted = normalize(filter);
    REGISTRY
        .iter()
        .filter(|sg| wanted.is_empty() || normalize(sg.symbol).contains(&wanted))
        .collect()
}
