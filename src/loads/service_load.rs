//! Service loads acting on a pipe

use serde::{Deserialize, Serialize};

use super::LoadCase;
use crate::math::Vec3;

/// Loads a pipe has to carry in service
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceLoad {
    /// Internal pressure
    pub pressure: f64,
    /// Axial force
    pub axial_force: f64,
    /// Torque about the pipe axis
    pub torque: f64,
}

impl ServiceLoad {
    /// Create a new service load
    pub fn new(pressure: f64, axial_force: f64, torque: f64) -> Self {
        Self {
            pressure,
            axial_force,
            torque,
        }
    }

    /// Internal pressure only
    pub fn pressure(p: f64) -> Self {
        Self::new(p, 0.0, 0.0)
    }

    /// Axial force only
    pub fn axial(fx: f64) -> Self {
        Self::new(0.0, fx, 0.0)
    }

    /// Torque only
    pub fn torque(t: f64) -> Self {
        Self::new(0.0, 0.0, t)
    }

    /// Equivalent running load [Nx, Ny, Nxy] on the pipe wall
    ///
    /// # Arguments
    /// * `radius` - Internal radius of the pipe
    /// * `cases` - Load cases that contribute
    pub fn equivalent_load(&self, radius: f64, cases: &[LoadCase]) -> Vec3 {
        cases
            .iter()
            .fold(Vec3::zeros(), |n, case| n + case.running_load(self, radius))
    }
}
