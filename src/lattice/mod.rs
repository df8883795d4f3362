// Lattice module: unit cells, scattering planes and direction utilities
// for triple-axis experiment planning.

// ======================== MODULE DECLARATIONS ========================
pub mod cell;
pub mod direction;
pub mod plane;
pub mod rotation;

// Test modules
mod _tests_cell;

// ======================== UNIT CELLS ========================
pub use cell::UnitCell; // struct - triclinic unit cell from 6 lattice parameters
// UnitCell impl methods:
//   new(a, b, c, alpha, beta, gamma) -> Result<Self>      - validated construction, angles in radians
//   cubic(a) / hexagonal(a, c) / orthorhombic(a, b, c)    - shortcut constructors
//   reciprocal(&self) -> Result<UnitCell>                 - reciprocal cell, 2 pi convention
//   frac_to_cart / cart_to_frac                           - coordinate conversion
//   lattice_parameters() / lattice_angles() / volume()    - parameter access
//   metric_tensor() / basis_matrix()                      - derived matrices

// ======================== SCATTERING / VIEW PLANES ========================
pub use plane::LatticePlane; // struct - origin + two spanning vectors + normal
// LatticePlane impl methods:
//   new(origin, dir0, dir1) -> Self                       - normal = cross(dir0, dir1)
//   is_valid(&self) -> bool                               - degeneracy and NaN/Inf guard
//   unit_normal() / orthonormal_basis()                   - derived directions
//   distance_to(point) / project(point)                   - plane geometry queries

// ======================== INTEGER DIRECTIONS ========================
pub use direction::{
    gcd_reduce,                  // fn(Vector3<i64>) -> Vector3<i64> - divide by component GCD
    integer_up_direction,        // fn(&Vector3<f64>, &Vector3<f64>, u32) -> Vector3<i64> - reduced cross product
    integer_up_direction_default, // fn - same with the default input precision
    reduce_to_integers,          // fn(&Vector3<f64>, u32) -> Vector3<i64> - minimal integer direction
};

// ======================== PLANE ROTATION ========================
pub use rotation::{
    gram_schmidt,    // fn(&[Vector3<f64>]) -> Result<Vec<Vector3<f64>>> - orthonormalization
    rotate_basis,    // fn(&Vector3, &Vector3, usize, f64) -> Result<(Vector3, Vector3)> - rotate spanning pair
    rotation_matrix, // fn(&Vector3<f64>, f64) -> Result<Matrix3<f64>> - Rodrigues rotation
    set_eps_zero,    // fn(Vector3<f64>, f64) -> Vector3<f64> - numeric cleanup
};
