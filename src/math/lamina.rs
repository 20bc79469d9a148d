//! Lamina mechanics for 2D plane stress
//!
//! Closed-form stiffness of a single orthotropic ply and the tensor
//! rotations between material axes (1, 2) and laminate axes (x, y).
//! Strains are engineering strains `[e_1, e_2, gamma_12]`, stresses are
//! `[s_1, s_2, tau_12]`. Angles are in degrees.

use super::Mat3;
use crate::elements::MaterialProperties;

/// Compute the plane-stress reduced stiffness matrix [Q] in material axes
///
/// # Arguments
/// * `material` - Engineering constants (E1, E2, nu12, G12 are used)
///
/// # Returns
/// 3x3 matrix relating `[e_1, e_2, gamma_12]` to `[s_1, s_2, tau_12]`
pub fn local_stiffness(material: &MaterialProperties) -> Mat3 {
    let nu21 = material.nu12 * material.e2 / material.e1;
    let denom = 1.0 - material.nu12 * nu21;

    let q11 = material.e1 / denom;
    let q22 = material.e2 / denom;
    let q12 = material.nu12 * q22;
    let q66 = material.g12;

    Mat3::new(
        q11, q12, 0.0,
        q12, q22, 0.0,
        0.0, 0.0, q66,
    )
}

/// Matrix mapping laminate-axis engineering strain to material-axis strain
///
/// # Arguments
/// * `theta` - Fiber orientation relative to the laminate x-axis (degrees)
pub fn strain_transform(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();

    Mat3::new(
        c * c,        s * s,        c * s,
        s * s,        c * c,        -c * s,
        -2.0 * c * s, 2.0 * c * s,  c * c - s * s,
    )
}

/// Matrix mapping laminate-axis stress to material-axis stress
///
/// # Arguments
/// * `theta` - Fiber orientation relative to the laminate x-axis (degrees)
pub fn stress_transform(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();

    Mat3::new(
        c * c,  s * s,  2.0 * c * s,
        s * s,  c * c,  -2.0 * c * s,
        -c * s, c * s,  c * c - s * s,
    )
}

/// Rotate a material-axis stiffness matrix into laminate axes
///
/// `Qbar = T_s(theta)^-1 * Q * T_e(theta)`, where the inverse of the stress
/// rotation is the rotation by `-theta`.
pub fn transform(q: &Mat3, theta: f64) -> Mat3 {
    stress_transform(-theta) * q * strain_transform(theta)
}
