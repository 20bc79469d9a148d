//! Laminate - an ordered stack of plies loaded in-plane

use serde::{Deserialize, Serialize};

use super::{MaterialProperties, Ply};
use crate::error::{LaminateError, LaminateResult};
use crate::math::{self, Mat3, Vec3};

/// A bonded stack of plies under in-plane load
///
/// Only the extensional stiffness [A] is modelled. Bending is not, so the
/// laminate strain is uniform through the thickness and stacking order
/// does not change [A].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laminate {
    /// Plies in stacking order
    pub layup: Vec<Ply>,
    /// Laminate name
    pub name: String,
    /// Total thickness
    pub thickness: f64,
    /// Mass per unit area
    pub mass_per_area: f64,
    /// In-plane stiffness matrix [A]
    pub a: Mat3,
    /// Last applied running load [Nx, Ny, Nxy]
    pub load: Vec3,
    /// Last mid-plane strain [ex, ey, gxy]
    pub deformation: Vec3,
    /// Any ply has failed in the fibers
    pub is_fiber_failed: bool,
    /// Any ply has failed between the fibers
    pub is_inter_fiber_failed: bool,
}

impl Laminate {
    /// Create a laminate from a stack of plies
    pub fn new(layup: Vec<Ply>, name: &str) -> LaminateResult<Self> {
        if layup.is_empty() {
            return Err(LaminateError::InvalidInput(format!(
                "laminate '{}' has no plies",
                name
            )));
        }
        for (i, ply) in layup.iter().enumerate() {
            if !(ply.thickness > 0.0) {
                return Err(LaminateError::InvalidInput(format!(
                    "ply {} of laminate '{}' has non-positive thickness {}",
                    i, name, ply.thickness
                )));
            }
            ply.material().validate()?;
        }

        let mut laminate = Self {
            is_fiber_failed: layup.iter().any(|p| p.is_fiber_failed),
            is_inter_fiber_failed: layup.iter().any(|p| p.is_inter_fiber_failed),
            layup,
            name: name.to_string(),
            thickness: 0.0,
            mass_per_area: 0.0,
            a: Mat3::zeros(),
            load: Vec3::zeros(),
            deformation: Vec3::zeros(),
        };
        laminate.thickness = laminate.compute_thickness();
        laminate.mass_per_area = laminate.compute_mass();
        laminate.a = laminate.compute_a();
        Ok(laminate)
    }

    /// Create a laminate of one material from `(orientation, thickness)` pairs
    pub fn from_layup(
        name: &str,
        material: &MaterialProperties,
        layup: &[(f64, f64)],
    ) -> LaminateResult<Self> {
        let plies = layup
            .iter()
            .map(|&(orientation, thickness)| Ply::new(material, orientation, thickness))
            .collect();
        Self::new(plies, name)
    }

    /// Sum of ply thicknesses
    pub fn compute_thickness(&self) -> f64 {
        self.layup.iter().map(|p| p.thickness).sum()
    }

    /// Mass per unit area
    pub fn compute_mass(&self) -> f64 {
        self.layup
            .iter()
            .map(|p| p.material().rho * p.thickness)
            .sum()
    }

    /// Integrate the transformed ply stiffness through the thickness
    ///
    /// Uses the current `thickness`, so it must be refreshed first.
    pub fn compute_a(&self) -> Mat3 {
        let mut a = Mat3::zeros();
        let mut h_bot = -self.thickness / 2.0;
        for ply in &self.layup {
            let h_top = h_bot + ply.thickness;
            a += ply.transformed_stiffness() * (h_top - h_bot);
            h_bot = h_top;
        }
        a
    }

    /// Apply a running load and solve for the mid-plane strain
    ///
    /// Recomputes [A] from the current ply thicknesses and stiffnesses,
    /// then pushes the new state down to every ply.
    pub fn update_state(&mut self, load: Vec3) -> LaminateResult<()> {
        self.load = load;
        self.a = self.compute_a();
        self.deformation =
            math::solve_3x3(&self.a, &load).ok_or(LaminateError::SingularStiffness)?;
        self.update_ply_states();
        Ok(())
    }

    /// Material-axis strain and stress in every ply from the laminate strain
    pub fn update_ply_states(&mut self) {
        let deformation = self.deformation;
        for ply in &mut self.layup {
            let strain = ply.strain_transform() * deformation;
            let stress = ply.local_stiffness() * strain;
            ply.update_state(stress, strain);
        }
    }

    /// Scale every ply thickness by `factor`
    ///
    /// [A] and the ply states are left stale until the next `update_state`.
    pub fn update_thickness(&mut self, factor: f64) {
        for ply in &mut self.layup {
            ply.thickness *= factor;
        }
        self.thickness = self.compute_thickness();
        self.mass_per_area = self.compute_mass();
    }

    /// Refresh the aggregate damage flags from the plies
    pub fn refresh_damage_flags(&mut self) {
        self.is_fiber_failed = self.layup.iter().any(|p| p.is_fiber_failed);
        self.is_inter_fiber_failed = self.layup.iter().any(|p| p.is_inter_fiber_failed);
    }

    /// Thickness-averaged density
    pub fn average_density(&self) -> f64 {
        self.mass_per_area / self.thickness
    }
}
