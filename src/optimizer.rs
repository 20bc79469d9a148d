//! Composite pipe thickness optimizer
//!
//! Shrinks (or grows) the pipe wall until a ply reaches its failure
//! envelope or the laminate reaches the strain allowable. With progressive
//! failure enabled, the first fiber or inter-fiber failure of a ply only
//! degrades that ply and the search continues with the load redistributed.

use std::f64::consts::PI;

use log::{debug, info, warn};

use crate::analysis::OptimizerOptions;
use crate::elements::Laminate;
use crate::error::{LaminateError, LaminateResult};
use crate::loads::ServiceLoad;
use crate::math::{self, Vec3};
use crate::results::{FailureMechanism, OptimizationResult, StrainComponent};

/// Number of decimals kept when comparing normalized exposures against 1
const EXPOSURE_DECIMALS: i32 = 5;

/// One thickness optimization run for a laminated pipe wall
///
/// The optimizer owns its own copy of the laminate, so ply damage from one
/// run never reaches the caller's laminate or another run.
#[derive(Debug, Clone)]
pub struct CompositePipeOptimizer {
    laminate: Laminate,
    internal_radius: f64,
    service_load: ServiceLoad,
    options: OptimizerOptions,
    equivalent_load: Vec3,
    current_thickness: f64,
    thickness_history: Vec<f64>,
    iterations: usize,
}

impl CompositePipeOptimizer {
    /// Start a run from the laminate's own thickness
    pub fn new(
        laminate: &Laminate,
        internal_radius: f64,
        service_load: ServiceLoad,
        options: OptimizerOptions,
    ) -> LaminateResult<Self> {
        Self::with_wall_thickness(
            laminate,
            internal_radius,
            laminate.thickness,
            service_load,
            options,
        )
    }

    /// Start a run from a given wall thickness
    ///
    /// Plies are rescaled proportionally so the layup fractions are kept.
    pub fn with_wall_thickness(
        laminate: &Laminate,
        internal_radius: f64,
        wall_thickness: f64,
        service_load: ServiceLoad,
        options: OptimizerOptions,
    ) -> LaminateResult<Self> {
        options.validate()?;
        if !(internal_radius > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "internal radius must be positive, got {}",
                internal_radius
            )));
        }
        if !(wall_thickness > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "wall thickness must be positive, got {}",
                wall_thickness
            )));
        }

        let mut laminate = laminate.clone();
        if wall_thickness != laminate.thickness {
            laminate.update_thickness(wall_thickness / laminate.thickness);
        }

        let equivalent_load = service_load.equivalent_load(internal_radius, &options.load_cases);
        laminate.update_state(equivalent_load)?;

        Ok(Self {
            current_thickness: laminate.thickness,
            laminate,
            internal_radius,
            service_load,
            options,
            equivalent_load,
            thickness_history: Vec::new(),
            iterations: 0,
        })
    }

    /// Running load [Nx, Ny, Nxy] the service load is converted to
    pub fn equivalent_load(&self) -> Vec3 {
        self.equivalent_load
    }

    /// The run's laminate in its current state
    pub fn laminate(&self) -> &Laminate {
        &self.laminate
    }

    /// Service load of this run
    pub fn service_load(&self) -> &ServiceLoad {
        &self.service_load
    }

    /// Current wall thickness
    pub fn current_thickness(&self) -> f64 {
        self.current_thickness
    }

    /// Thicknesses moved to so far, oldest first
    pub fn thickness_history(&self) -> &[f64] {
        &self.thickness_history
    }

    /// Iterate until a termination condition is met
    ///
    /// Hitting `max_iterations` is not an error: the smallest thickness seen
    /// is returned with `FailureMechanism::RecursionLimitReached`.
    pub fn find_optimized_thickness(mut self) -> LaminateResult<OptimizationResult> {
        while self.iterations < self.options.max_iterations {
            self.iterations += 1;
            if let Some(mechanism) = self.iterate()? {
                return self.finish(mechanism);
            }
        }

        warn!(
            "{}: no termination after {} iterations, reporting best thickness so far",
            self.laminate.name, self.iterations
        );
        self.finish(FailureMechanism::RecursionLimitReached)
    }

    /// One pass of the search; `Some` when the run is finished
    fn iterate(&mut self) -> LaminateResult<Option<FailureMechanism>> {
        let progressive = self.options.progressive_failure;
        let factors = self.options.resistance_factors;

        // Thickness adjustment factor: the largest exposure still in play
        let mut taf = 0.0_f64;
        for ply in &mut self.laminate.layup {
            ply.compute_exposure_factors(&factors)?;
            taf = taf.max(ply.fiber_exposure);
            if progressive && !ply.is_inter_fiber_failed {
                taf = taf.max(ply.inter_fiber_exposure);
            }
        }

        let (component, max_strain) = math::max_abs_component(&self.laminate.deformation);
        let deformation_factor = max_strain / self.options.deformation_limit;

        debug!(
            "{}: iteration {} thickness={:.6} taf={:.6} deformation_factor={:.6}",
            self.laminate.name, self.iterations, self.current_thickness, taf, deformation_factor
        );

        if taf <= 0.0 && deformation_factor <= 0.0 {
            return Ok(Some(FailureMechanism::Unloaded));
        }

        let strength_thickness = self.current_thickness * taf;
        let deformation_thickness = self.current_thickness * deformation_factor;
        if strength_thickness < deformation_thickness {
            self.scale_thickness(deformation_factor);
            return Ok(Some(FailureMechanism::MaxDeformation {
                component: StrainComponent::from_index(component),
                fiber: self.laminate.is_fiber_failed,
                inter_fiber: self.laminate.is_inter_fiber_failed,
            }));
        }

        for ply in &mut self.laminate.layup {
            ply.fiber_exposure /= taf;
            ply.inter_fiber_exposure /= taf;
        }

        let mut fiber_failure = false;
        for (i, ply) in self.laminate.layup.iter_mut().enumerate() {
            if math::round_to(ply.fiber_exposure, EXPOSURE_DECIMALS) >= 1.0 {
                if ply.is_fiber_failed || !progressive {
                    fiber_failure = true;
                    break;
                }
                ply.is_fiber_failed = true;
                ply.degrade_stiffness(self.options.stiffness_degradation);
                debug!("{}: fiber failure in ply {} ({} deg)", self.laminate.name, i, ply.orientation());
            } else if progressive
                && !ply.is_inter_fiber_failed
                && math::round_to(ply.inter_fiber_exposure, EXPOSURE_DECIMALS) >= 1.0
            {
                ply.is_inter_fiber_failed = true;
                ply.degrade_compressive_strength(self.options.compressive_strength_degradation);
                debug!(
                    "{}: inter-fiber failure in ply {} ({} deg)",
                    self.laminate.name,
                    i,
                    ply.orientation()
                );
            }
        }
        self.laminate.refresh_damage_flags();

        if fiber_failure {
            self.scale_thickness(taf);
            return Ok(Some(FailureMechanism::FiberFailure {
                inter_fiber: self.laminate.is_inter_fiber_failed,
            }));
        }

        self.scale_thickness(taf);
        self.laminate.update_state(self.equivalent_load)?;
        Ok(None)
    }

    fn scale_thickness(&mut self, factor: f64) {
        self.current_thickness *= factor;
        self.laminate.update_thickness(factor);
        self.thickness_history.push(self.current_thickness);
    }

    fn finish(mut self, mechanism: FailureMechanism) -> LaminateResult<OptimizationResult> {
        // Terminal steps rescale the plies without solving at the new thickness
        self.laminate.update_state(self.equivalent_load)?;

        let optimized_thickness = match mechanism {
            // Every wall thinner than the last step exceeds the strain allowable
            FailureMechanism::MaxDeformation { .. } => self.current_thickness,
            _ if self.thickness_history.is_empty() => self.current_thickness,
            _ => self
                .thickness_history
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min),
        };

        let r = self.internal_radius;
        let area = PI * ((r + optimized_thickness).powi(2) - r * r);
        let mass_per_length = area * self.laminate.average_density();

        info!(
            "{}: {} at thickness {:.6} after {} iterations",
            self.laminate.name, mechanism, optimized_thickness, self.iterations
        );

        Ok(OptimizationResult {
            optimized_thickness,
            final_thickness: self.current_thickness,
            failure_mechanism: mechanism,
            thickness_history: self.thickness_history,
            iterations: self.iterations,
            mass_per_length,
            laminate: self.laminate,
        })
    }
}

/// Optimize the wall thickness of a pipe made from `laminate`
pub fn optimize_pipe(
    laminate: &Laminate,
    internal_radius: f64,
    service_load: ServiceLoad,
    options: OptimizerOptions,
) -> LaminateResult<OptimizationResult> {
    CompositePipeOptimizer::new(laminate, internal_radius, service_load, options)?
        .find_optimized_thickness()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DEFAULT_DEFORMATION_LIMIT;
    use crate::elements::MaterialProperties;
    use approx::assert_relative_eq;

    fn angle_ply(theta: f64) -> Laminate {
        Laminate::from_layup(
            "angle-ply",
            &MaterialProperties::udgrp(),
            &[(theta, 100.0), (-theta, 100.0)],
        )
        .unwrap()
    }

    fn unidirectional() -> Laminate {
        Laminate::from_layup("UD", &MaterialProperties::udgrp(), &[(0.0, 100.0)]).unwrap()
    }

    /// Fiber-governed thickness of a 0 degree ply under pure axial force
    fn closed_form_axial_thickness(fx: f64, r: f64) -> f64 {
        let m = MaterialProperties::udgrp();
        3.0 * fx / (2.0 * PI * r) / m.xt
    }

    #[test]
    fn test_init_applies_equivalent_load() {
        let opt = CompositePipeOptimizer::new(
            &angle_ply(45.0),
            75.0,
            ServiceLoad::pressure(8.0),
            OptimizerOptions::default(),
        )
        .unwrap();

        assert_relative_eq!(opt.equivalent_load()[0], 300.0);
        assert_relative_eq!(opt.equivalent_load()[1], 600.0);
        assert_eq!(opt.laminate().load, opt.equivalent_load());
        assert!(opt.laminate().layup[0].stress_state().is_some());
        assert_eq!(opt.current_thickness(), 200.0);
        assert!(opt.thickness_history().is_empty());
    }

    #[test]
    fn test_first_iteration_marks_inter_fiber_damage() {
        let mut opt = CompositePipeOptimizer::new(
            &angle_ply(45.0),
            75.0,
            ServiceLoad::pressure(8.0),
            OptimizerOptions::default(),
        )
        .unwrap();
        opt.iterations = 1;

        assert_eq!(opt.iterate().unwrap(), None);
        assert!(opt.laminate().is_inter_fiber_failed);
        assert!(!opt.laminate().is_fiber_failed);
        assert!(opt.laminate().layup.iter().all(|p| p.is_inter_fiber_failed));
        assert_relative_eq!(opt.laminate().layup[0].material().xc, 630.0, max_relative = 1e-12);
        assert_eq!(opt.thickness_history().len(), 1);
        assert!(opt.current_thickness() < 200.0);
        assert_relative_eq!(opt.laminate().thickness, opt.current_thickness(), max_relative = 1e-12);
    }

    #[test]
    fn test_axial_first_ply_failure_matches_closed_form() {
        let result = optimize_pipe(
            &unidirectional(),
            75.0,
            ServiceLoad::axial(100e3),
            OptimizerOptions::first_ply_failure(),
        )
        .unwrap();

        assert_eq!(result.failure_mechanism, FailureMechanism::FiberFailure { inter_fiber: false });
        assert_eq!(result.iterations, 1);
        assert_relative_eq!(
            result.optimized_thickness,
            closed_form_axial_thickness(100e3, 75.0),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_axial_progressive_fails_twice() {
        let result = optimize_pipe(
            &unidirectional(),
            75.0,
            ServiceLoad::axial(100e3),
            OptimizerOptions::default(),
        )
        .unwrap();

        assert_eq!(result.mechanism_tag(), "FF");
        assert_eq!(result.iterations, 2);
        assert_eq!(result.thickness_history.len(), 2);
        assert!(result.laminate.layup[0].is_fiber_failed);
        assert_relative_eq!(result.laminate.layup[0].material().e2, 850.0, max_relative = 1e-12);
        assert_relative_eq!(
            result.optimized_thickness,
            closed_form_axial_thickness(100e3, 75.0),
            max_relative = 1e-9
        );
        let (first, second) = (result.thickness_history[0], result.thickness_history[1]);
        assert!(second <= first * (1.0 + 1e-9));
    }

    #[test]
    fn test_starting_thickness_does_not_matter() {
        let lam = unidirectional();
        let from_thick = optimize_pipe(&lam, 75.0, ServiceLoad::axial(100e3), OptimizerOptions::first_ply_failure())
            .unwrap();
        let from_thin = CompositePipeOptimizer::with_wall_thickness(
            &lam,
            75.0,
            0.1,
            ServiceLoad::axial(100e3),
            OptimizerOptions::first_ply_failure(),
        )
        .unwrap()
        .find_optimized_thickness()
        .unwrap();

        assert_relative_eq!(
            from_thick.optimized_thickness,
            from_thin.optimized_thickness,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_zero_load_terminates_immediately() {
        let result = optimize_pipe(
            &angle_ply(45.0),
            75.0,
            ServiceLoad::default(),
            OptimizerOptions::default(),
        )
        .unwrap();

        assert_eq!(result.failure_mechanism, FailureMechanism::Unloaded);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.optimized_thickness, 200.0);
        assert!(result.thickness_history.is_empty());
    }

    #[test]
    fn test_iteration_cap() {
        let lam = angle_ply(45.0);
        let capped = optimize_pipe(
            &lam,
            75.0,
            ServiceLoad::pressure(8.0),
            OptimizerOptions::default().with_max_iter(1),
        )
        .unwrap();
        assert_eq!(capped.failure_mechanism, FailureMechanism::RecursionLimitReached);
        assert_eq!(capped.iterations, 1);
        assert_eq!(capped.thickness_history.len(), 1);
        assert_eq!(capped.optimized_thickness, capped.thickness_history[0]);

        let none = optimize_pipe(
            &lam,
            75.0,
            ServiceLoad::pressure(8.0),
            OptimizerOptions::default().with_max_iter(0),
        )
        .unwrap();
        assert_eq!(none.failure_mechanism, FailureMechanism::RecursionLimitReached);
        assert_eq!(none.optimized_thickness, 200.0);
    }

    #[test]
    fn test_caller_laminate_untouched() {
        let lam = angle_ply(45.0);
        let result = optimize_pipe(&lam, 75.0, ServiceLoad::pressure(8.0), OptimizerOptions::default())
            .unwrap();

        assert!(result.laminate.is_fiber_failed);
        assert!(!lam.is_fiber_failed);
        assert!(lam.layup.iter().all(|p| !p.is_fiber_failed && !p.is_inter_fiber_failed));
        assert_eq!(lam.thickness, 200.0);
        assert_eq!(lam.layup[0].material(), &MaterialProperties::udgrp());
    }

    #[test]
    fn test_mass_per_length() {
        let result = optimize_pipe(
            &unidirectional(),
            75.0,
            ServiceLoad::axial(100e3),
            OptimizerOptions::first_ply_failure(),
        )
        .unwrap();
        let t = result.optimized_thickness;
        let expected = PI * ((75.0 + t).powi(2) - 75.0 * 75.0) * 2e-9;
        assert_relative_eq!(result.mass_per_length, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_invalid_geometry() {
        let lam = angle_ply(45.0);
        assert!(matches!(
            CompositePipeOptimizer::new(&lam, 0.0, ServiceLoad::pressure(8.0), OptimizerOptions::default()),
            Err(LaminateError::InvalidInput(_))
        ));
        assert!(matches!(
            CompositePipeOptimizer::with_wall_thickness(
                &lam,
                75.0,
                -1.0,
                ServiceLoad::pressure(8.0),
                OptimizerOptions::default()
            ),
            Err(LaminateError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_result_laminate_is_solved_at_final_thickness() {
        let runs = [
            (unidirectional(), ServiceLoad::axial(100e3), OptimizerOptions::first_ply_failure()),
            (angle_ply(45.0), ServiceLoad::pressure(8.0), OptimizerOptions::default()),
        ];
        for (lam, load, options) in runs {
            let result = optimize_pipe(&lam, 75.0, load, options).unwrap();
            let final_lam = &result.laminate;

            assert_relative_eq!(final_lam.thickness, result.final_thickness, max_relative = 1e-12);
            assert_eq!(final_lam.a, final_lam.compute_a());
            let fresh = math::solve_3x3(&final_lam.a, &final_lam.load).unwrap();
            assert_eq!(final_lam.deformation, fresh);
            for ply in &final_lam.layup {
                let strain = ply.strain_transform() * fresh;
                assert_eq!(ply.strain_state().unwrap(), &strain);
            }
        }
    }

    #[test]
    fn test_max_deformation_reports_governing_wall() {
        let result = optimize_pipe(
            &angle_ply(45.0),
            75.0,
            ServiceLoad::pressure(8.0),
            OptimizerOptions::default(),
        )
        .unwrap();

        assert!(matches!(result.failure_mechanism, FailureMechanism::MaxDeformation { .. }));
        assert_eq!(result.optimized_thickness, result.final_thickness);
        assert_eq!(Some(&result.optimized_thickness), result.thickness_history.last());
        let (_, strain) = math::max_abs_component(&result.laminate.deformation);
        assert_relative_eq!(strain, DEFAULT_DEFORMATION_LIMIT, max_relative = 1e-9);
    }

    #[test]
    fn test_singular_stiffness_reaches_caller() {
        // Fiber failure leaves no usable shear stiffness to carry the torque
        let result = optimize_pipe(
            &unidirectional(),
            75.0,
            ServiceLoad::new(0.0, 100e3, 3e5),
            OptimizerOptions::default().with_degradation(1e-320, 0.9),
        );
        assert!(matches!(result, Err(LaminateError::SingularStiffness)));

        // Same load with the default degradation is solvable
        assert!(optimize_pipe(
            &unidirectional(),
            75.0,
            ServiceLoad::new(0.0, 100e3, 3e5),
            OptimizerOptions::default(),
        )
        .is_ok());
    }
}
