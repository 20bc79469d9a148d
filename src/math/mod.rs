//! Mathematical utilities for laminate calculations

pub mod lamina;

use nalgebra::{Matrix3, Vector3};

pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

// Re-export lamina functions
pub use lamina::{local_stiffness, strain_transform, stress_transform, transform};

/// Solve a 3x3 linear system using LU decomposition
///
/// Returns `None` when the matrix is singular or the solution is not finite.
pub fn solve_3x3(a: &Mat3, b: &Vec3) -> Option<Vec3> {
    a.clone()
        .lu()
        .solve(b)
        .filter(|x| x.iter().all(|v| v.is_finite()))
}

/// Round to a fixed number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Index and absolute value of the largest-magnitude component
pub fn max_abs_component(v: &Vec3) -> (usize, f64) {
    v.iter()
        .map(|x| x.abs())
        .enumerate()
        .fold((0, 0.0), |best, (i, x)| if x > best.1 { (i, x) } else { best })
}
