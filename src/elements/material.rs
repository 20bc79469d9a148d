//! Material properties for unidirectional plies

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};

/// Engineering constants of a unidirectional fiber-reinforced ply
///
/// Units follow the consistent MPa-mm-Mg system used throughout the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Density
    pub rho: f64,
    /// Longitudinal (fiber direction) modulus
    pub e1: f64,
    /// Transverse modulus
    pub e2: f64,
    /// In-plane Poisson's ratio
    pub nu12: f64,
    /// In-plane shear modulus
    pub g12: f64,
    /// Longitudinal tensile strength
    pub xt: f64,
    /// Transverse tensile strength
    pub yt: f64,
    /// Longitudinal compressive strength
    pub xc: f64,
    /// Transverse compressive strength
    pub yc: f64,
    /// In-plane shear strength
    pub s12: f64,
    /// Transverse shear strength
    pub s23: f64,
}

impl MaterialProperties {
    /// Unidirectional E-glass/epoxy
    pub fn udgrp() -> Self {
        Self {
            rho: 2e-9,
            e1: 38000.0,
            e2: 8500.0,
            nu12: 0.28,
            g12: 3400.0,
            xt: 1150.0,
            yt: 40.0,
            xc: 700.0,
            yc: 120.0,
            s12: 60.0,
            s23: 40.0,
        }
    }

    /// Minor Poisson's ratio nu21 = nu12 * E2 / E1
    pub fn nu21(&self) -> f64 {
        self.nu12 * self.e2 / self.e1
    }

    /// Check that moduli and strengths are physically admissible
    pub fn validate(&self) -> LaminateResult<()> {
        let positive = [
            ("rho", self.rho),
            ("e1", self.e1),
            ("e2", self.e2),
            ("g12", self.g12),
            ("xt", self.xt),
            ("yt", self.yt),
            ("xc", self.xc),
            ("yc", self.yc),
            ("s12", self.s12),
            ("s23", self.s23),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(LaminateError::InvalidInput(format!(
                    "material property '{}' must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.nu12 * self.nu21() >= 1.0 {
            return Err(LaminateError::InvalidInput(format!(
                "Poisson's ratio {} gives a non-positive definite stiffness",
                self.nu12
            )));
        }
        Ok(())
    }
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self::udgrp()
    }
}

/// Named collection of materials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialLibrary {
    materials: HashMap<String, MaterialProperties>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding the built-in materials
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.insert("UDGRP", MaterialProperties::udgrp());
        library
    }

    /// Load a library from a JSON object of `name -> properties`
    pub fn from_json(json: &str) -> LaminateResult<Self> {
        let materials: HashMap<String, MaterialProperties> = serde_json::from_str(json)?;
        for material in materials.values() {
            material.validate()?;
        }
        Ok(Self { materials })
    }

    /// Add or replace a material
    pub fn insert(&mut self, name: &str, material: MaterialProperties) {
        self.materials.insert(name.to_string(), material);
    }

    /// Look up a material by name
    pub fn get(&self, name: &str) -> LaminateResult<&MaterialProperties> {
        self.materials
            .get(name)
            .ok_or_else(|| LaminateError::MaterialNotFound(name.to_string()))
    }

    /// Sorted material names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.materials.keys().cloned().collect();
        names.sort();
        names
    }
}
