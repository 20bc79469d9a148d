//! Optimizer options

use serde::{Deserialize, Serialize};

use crate::elements::ResistanceFactors;
use crate::error::{LaminateError, LaminateResult};
use crate::loads::LoadCase;

/// Default iteration cap for one optimization run
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Default strain allowable
pub const DEFAULT_DEFORMATION_LIMIT: f64 = 0.05;

/// Options for a thickness optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerOptions {
    /// Degrade damaged plies and keep searching instead of stopping at the
    /// first fiber failure
    pub progressive_failure: bool,
    /// Maximum number of thickness iterations
    pub max_iterations: usize,
    /// Largest allowed magnitude of any laminate strain component
    pub deformation_limit: f64,
    /// Load resistance factors for the failure criteria
    pub resistance_factors: ResistanceFactors,
    /// Residual fraction of E2 and G12 after fiber failure
    pub stiffness_degradation: f64,
    /// Residual fraction of XC after inter-fiber failure
    pub compressive_strength_degradation: f64,
    /// Load cases that make up the equivalent running load
    pub load_cases: Vec<LoadCase>,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            progressive_failure: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            deformation_limit: DEFAULT_DEFORMATION_LIMIT,
            resistance_factors: ResistanceFactors::default(),
            stiffness_degradation: 0.1,
            compressive_strength_degradation: 0.9,
            load_cases: LoadCase::ALL.to_vec(),
        }
    }
}

impl OptimizerOptions {
    /// Progressive failure with default settings
    pub fn progressive() -> Self {
        Self::default()
    }

    /// Stop at the first fiber failure, ignoring inter-fiber failure
    pub fn first_ply_failure() -> Self {
        Self {
            progressive_failure: false,
            ..Self::default()
        }
    }

    /// Parse options from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> LaminateResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set the strain allowable
    pub fn with_deformation_limit(mut self, limit: f64) -> Self {
        self.deformation_limit = limit;
        self
    }

    /// Set the load resistance factors
    pub fn with_resistance_factors(mut self, factors: ResistanceFactors) -> Self {
        self.resistance_factors = factors;
        self
    }

    /// Set the residual stiffness and compressive strength fractions
    pub fn with_degradation(mut self, stiffness: f64, compressive_strength: f64) -> Self {
        self.stiffness_degradation = stiffness;
        self.compressive_strength_degradation = compressive_strength;
        self
    }

    /// Restrict the contributing load cases
    pub fn with_load_cases(mut self, cases: Vec<LoadCase>) -> Self {
        self.load_cases = cases;
        self
    }

    /// Check that every option is in range
    pub fn validate(&self) -> LaminateResult<()> {
        if !(self.deformation_limit > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "deformation limit must be positive, got {}",
                self.deformation_limit
            )));
        }
        let factors = self.resistance_factors;
        if !(factors.fiber > 0.0) || !(factors.inter_fiber > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "resistance factors must be positive, got {:?}",
                factors
            )));
        }
        for (name, value) in [
            ("stiffness_degradation", self.stiffness_degradation),
            ("compressive_strength_degradation", self.compressive_strength_degradation),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(LaminateError::InvalidInput(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        for (i, case) in self.load_cases.iter().enumerate() {
            if self.load_cases[..i].contains(case) {
                return Err(LaminateError::InvalidInput(format!(
                    "load case {} is listed more than once",
                    case
                )));
            }
        }
        Ok(())
    }
}
