//! Laminate Solver - classical laminate theory for composite pipe sizing
//!
//! This library models a fiber-reinforced laminate under in-plane load and
//! searches for the thinnest pipe wall that survives a service load:
//! - Plane-stress lamina stiffness and tensor rotations
//! - Extensional [A] stiffness of a ply stack and strain/stress recovery
//! - Maximum stress (fiber) and 2D Hashin (inter-fiber) failure criteria
//! - Progressive ply degradation during an iterative thickness search
//!
//! Bending is not modelled: the laminate strain is uniform through the
//! thickness.
//!
//! ## Example
//! ```rust
//! use laminate_solver::prelude::*;
//!
//! let library = MaterialLibrary::builtin();
//! let material = library.get("UDGRP").unwrap();
//!
//! // +/-45 degree angle-ply wall, deliberately far too thick
//! let laminate = Laminate::from_layup("pipe", material, &[(45.0, 100.0), (-45.0, 100.0)]).unwrap();
//!
//! let result = optimize_pipe(
//!     &laminate,
//!     75.0,
//!     ServiceLoad::pressure(8.0),
//!     OptimizerOptions::default(),
//! )
//! .unwrap();
//!
//! assert!(result.optimized_thickness < 200.0);
//! println!("{} at {:.3} mm", result.failure_mechanism, result.optimized_thickness);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod optimizer;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::OptimizerOptions;
    pub use crate::elements::{
        Laminate, MaterialLibrary, MaterialProperties, Ply, ResistanceFactors,
    };
    pub use crate::error::{LaminateError, LaminateResult};
    pub use crate::loads::{LoadCase, ServiceLoad};
    pub use crate::math::{Mat3, Vec3};
    pub use crate::optimizer::{optimize_pipe, CompositePipeOptimizer};
    pub use crate::results::{FailureMechanism, OptimizationResult, StrainComponent};
}
