// Symmetries module: crystal systems, symmetry operations and the static
// space-group registry used to mark allowed/forbidden reflections.

// ======================== MODULE DECLARATIONS ========================
pub mod crystal_system;
pub mod space_group;
pub mod symmetry_operations;


// ======================== CRYSTAL SYSTEMS ========================
pub use crystal_system::CrystalSystem; // enum - seven systems + NotSet sentinel
// CrystalSystem impl methods:
//   name(&self) -> &'static str                           - display name, "<not set>" sentinel
//   for_group_number(u16) -> CrystalSystem                - classification by IT number
//   constrain_parameters(a, b, c, alpha, beta, gamma)     - metric constraints of the system

// ======================== SYMMETRY OPERATIONS ========================
pub use symmetry_operations::SymOp; // struct - integer rotation + fractional translation
// SymOp impl methods:
//   identity() / translation_op(t)                        - trivial operations
//   apply / apply_wrapped(point)                          - action on fractional positions
//   apply_hkl(hkl) -> Vector3<i32>                        - action on Miller indices (R^T h)
//   compose(&self, other) -> SymOp                        - group composition mod lattice translations
//   approx_eq(&self, other) -> bool                       - equality up to a lattice translation

// ======================== SPACE-GROUP REGISTRY ========================
pub use space_group::{
    all_groups,     // fn() -> &'static [SpaceGroup] - every registered group
    expand_group,   // fn(symbol, generators, centering) -> Result<Vec<SymOp>> - closure expansion
    filter_by_name, // fn(&str) -> Vec<&'static SpaceGroup> - substring filter for list population
    find_by_name,   // fn(&str) -> Option<&'static SpaceGroup> - Hermann-Mauguin lookup
    find_by_number, // fn(u16) -> Option<&'static SpaceGroup> - IT-number lookup
    SpaceGroup,     // struct - symbol, number, crystal system, full operation set
};
