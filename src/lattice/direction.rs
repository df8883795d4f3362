use nalgebra::Vector3;

use crate::config::DEFAULT_UP_DECIMALS;

/// Greatest common divisor of two non-negative integers.
fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Divide a vector of integers by the GCD of its components.
///
/// The GCD is taken positive, so the direction of the vector is preserved.
/// The all-zero vector passes through unchanged.
pub fn gcd_reduce(v: Vector3<i64>) -> Vector3<i64> {
    let g = gcd(gcd(v.x.abs(), v.y.abs()), v.z.abs());
    if g == 0 {
        return v;
    }
    Vector3::new(v.x / g, v.y / g, v.z / g)
}

/// Convert a floating-point direction into a minimal integer vector.
///
/// Components are scaled by 10^decimals, rounded to the nearest integer and
/// GCD-reduced. Input precision beyond `decimals` digits is dropped.
pub fn reduce_to_integers(v: &Vector3<f64>, decimals: u32) -> Vector3<i64> {
    let scale = 10f64.powi(decimals as i32);
    let scaled = Vector3::new(
        (v.x * scale).round() as i64,
        (v.y * scale).round() as i64,
        (v.z * scale).round() as i64,
    );
    gcd_reduce(scaled)
}

/// Integer "up" direction perpendicular to two in-plane directions.
///
/// Both directions are scaled to integers first so the cross product stays
/// exact; the result is GCD-reduced to its minimal form.
pub fn integer_up_direction(
    dir_x: &Vector3<f64>,
    dir_y: &Vector3<f64>,
    decimals: u32,
) -> Vector3<i64> {
    let scale = 10f64.powi(decimals as i32);
    let ix = Vector3::new(
        (dir_x.x * scale).round() as i64,
        (dir_x.y * scale).round() as i64,
        (dir_x.z * scale).round() as i64,
    );
    let iy = Vector3::new(
        (dir_y.x * scale).round() as i64,
        (dir_y.y * scale).round() as i64,
        (dir_y.z * scale).round() as i64,
    );
    gcd_reduce(ix.cross(&iy))
}

/// [`integer_up_direction`] with the default input precision.
pub fn integer_up_direction_default(
    dir_x: &Vector3<f64>,
    dir_y: &Vector3<f64>,
) -> Vector3<i64> {
    integer_up_direction(dir_x, dir_y, DEFAULT_UP_DECIMALS)
}
