//! Load cases

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ServiceLoad;
use crate::math::Vec3;

/// One component of the service load and its thin-wall conversion to a
/// running load on the pipe wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCase {
    /// Internal pressure: hoop load P*r, axial load P*r/2
    InternalPressure,
    /// Axial force spread over the circumference
    AxialForce,
    /// Torque carried as shear flow
    Torque,
}

impl LoadCase {
    /// Every load case
    pub const ALL: [LoadCase; 3] = [Self::InternalPressure, Self::AxialForce, Self::Torque];

    /// Running load contribution [Nx, Ny, Nxy] of this case
    pub fn running_load(&self, load: &ServiceLoad, radius: f64) -> Vec3 {
        match self {
            Self::InternalPressure => Vec3::new(
                load.pressure * radius / 2.0,
                load.pressure * radius,
                0.0,
            ),
            Self::AxialForce => Vec3::new(load.axial_force / (2.0 * PI * radius), 0.0, 0.0),
            Self::Torque => Vec3::new(0.0, 0.0, load.torque / (2.0 * PI * radius * radius)),
        }
    }
}

impl fmt::Display for LoadCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InternalPressure => "internal pressure",
            Self::AxialForce => "axial force",
            Self::Torque => "torque",
        };
        write!(f, "{}", name)
    }
}
