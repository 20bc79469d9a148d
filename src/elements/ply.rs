//! Ply - a single unidirectional layer of the laminate

use serde::{Deserialize, Serialize};

use super::MaterialProperties;
use crate::error::{LaminateError, LaminateResult};
use crate::math::{self, Mat3, Vec3};

/// Load resistance factors applied to ply stresses before the failure
/// criteria are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceFactors {
    /// Factor on the fiber-direction stress (maximum stress criterion)
    pub fiber: f64,
    /// Factor on all stress components (Hashin inter-fiber criterion)
    pub inter_fiber: f64,
}

impl Default for ResistanceFactors {
    fn default() -> Self {
        Self {
            fiber: 3.0,
            inter_fiber: 1.2,
        }
    }
}

/// A single ply with its own copy of the material
///
/// Degradation only ever touches this copy, so plies built from the same
/// `MaterialProperties` never share damage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ply {
    material: MaterialProperties,
    orientation: f64,
    /// Ply thickness
    pub thickness: f64,
    /// Fiber failure has been detected in this ply
    pub is_fiber_failed: bool,
    /// Inter-fiber (matrix) failure has been detected in this ply
    pub is_inter_fiber_failed: bool,
    stress_state: Option<Vec3>,
    strain_state: Option<Vec3>,
    q: Mat3,
    te: Mat3,
    /// Last fiber failure exposure factor
    pub fiber_exposure: f64,
    /// Last inter-fiber failure exposure factor
    pub inter_fiber_exposure: f64,
}

impl Ply {
    /// Create a new ply
    ///
    /// # Arguments
    /// * `material` - Material, cloned into the ply
    /// * `orientation` - Fiber angle to the laminate x-axis (degrees)
    /// * `thickness` - Ply thickness
    pub fn new(material: &MaterialProperties, orientation: f64, thickness: f64) -> Self {
        let material = material.clone();
        let q = math::local_stiffness(&material);
        let te = math::strain_transform(orientation);
        Self {
            material,
            orientation,
            thickness,
            is_fiber_failed: false,
            is_inter_fiber_failed: false,
            stress_state: None,
            strain_state: None,
            q,
            te,
            fiber_exposure: 0.0,
            inter_fiber_exposure: 0.0,
        }
    }

    /// The ply's private material record
    pub fn material(&self) -> &MaterialProperties {
        &self.material
    }

    /// Fiber orientation in degrees
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// Stiffness in material axes
    pub fn local_stiffness(&self) -> &Mat3 {
        &self.q
    }

    /// Stiffness in laminate axes
    pub fn transformed_stiffness(&self) -> Mat3 {
        math::transform(&self.q, self.orientation)
    }

    /// Laminate-to-material strain rotation
    pub fn strain_transform(&self) -> &Mat3 {
        &self.te
    }

    /// Last recorded material-axis stress
    pub fn stress_state(&self) -> Option<&Vec3> {
        self.stress_state.as_ref()
    }

    /// Last recorded material-axis strain
    pub fn strain_state(&self) -> Option<&Vec3> {
        self.strain_state.as_ref()
    }

    /// Reduce the transverse and shear moduli to simulate post-failure
    /// residual stiffness
    pub fn degrade_stiffness(&mut self, factor: f64) {
        self.material.e2 *= factor;
        self.material.g12 *= factor;
        self.q = math::local_stiffness(&self.material);
    }

    /// Reduce the longitudinal compressive strength
    pub fn degrade_compressive_strength(&mut self, factor: f64) {
        self.material.xc *= factor;
        self.q = math::local_stiffness(&self.material);
    }

    /// Record the ply's material-axis stress and strain
    pub fn update_state(&mut self, stress: Vec3, strain: Vec3) {
        self.stress_state = Some(stress);
        self.strain_state = Some(strain);
    }

    /// Evaluate both failure criteria and store the exposure factors
    pub fn compute_exposure_factors(&mut self, factors: &ResistanceFactors) -> LaminateResult<()> {
        self.fiber_exposure = self.max_stress_criterion(factors.fiber)?;
        self.inter_fiber_exposure = self.hashin_2d(factors.inter_fiber)?;
        Ok(())
    }

    /// Fiber failure exposure from the maximum stress criterion
    ///
    /// `max(f * s_1 / XT, -f * s_1 / XC)`; a value of 1 or more means the
    /// fibers fail under the scaled load.
    pub fn max_stress_criterion(&self, load_factor: f64) -> LaminateResult<f64> {
        let stress = self.require_stress()?;
        let s1 = load_factor * stress[0];
        Ok((s1 / self.material.xt).max(-s1 / self.material.xc))
    }

    /// Inter-fiber failure exposure from the 2D Hashin criterion
    pub fn hashin_2d(&self, load_factor: f64) -> LaminateResult<f64> {
        let stress = self.require_stress()? * load_factor;
        let (s2, s6) = (stress[1], stress[2]);
        let m = &self.material;

        if s2 >= 0.0 {
            return Ok(((s2 / m.yt).powi(2) + (s6 / m.s12).powi(2)).sqrt());
        }

        let a = (s2 / (2.0 * m.s23)).powi(2) + (s6 / m.s12).powi(2);
        if a == 0.0 {
            return Ok(0.0);
        }
        let b = ((m.yc / (2.0 * m.s23)).powi(2) - 1.0) * s2 / m.yc;
        Ok(2.0 * a / (-b + (b * b + 4.0 * a).sqrt()))
    }

    fn require_stress(&self) -> LaminateResult<&Vec3> {
        self.stress_state.as_ref().ok_or_else(|| {
            LaminateError::InvalidState(format!(
                "exposure requested for {} degree ply before any stress state was set",
                self.orientation
            ))
        })
    }
}
