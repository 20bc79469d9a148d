//! Laminate Solver Example - Angle-Ply Pipe Under Five Load Cases

use anyhow::Result;
use laminate_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Laminate Solver Example: +/-theta Pipe Wall ===\n");

    let library = MaterialLibrary::builtin();
    println!("Available materials: {}", library.names().join(", "));

    let mut args = std::env::args().skip(1);
    let theta: f64 = args.next().map(|arg| arg.parse()).transpose()?.unwrap_or(55.0);
    let material_name = args.next().unwrap_or_else(|| "UDGRP".to_string());
    let material = library.get(&material_name)?;

    // Start far too thick and let the optimizer shrink the wall
    let laminate = Laminate::from_layup(
        &format!("type_A_theta={}", theta),
        material,
        &[(theta, 100.0), (-theta, 100.0)],
    )?;

    let internal_radius = 75.0;
    let service_loads = [
        ("case_1", ServiceLoad::new(8.0, 0.0, 0.0)),
        ("case_2", ServiceLoad::new(0.0, 100e3, 0.0)),
        ("case_3", ServiceLoad::new(0.0, 0.0, 20e6)),
        ("case_4", ServiceLoad::new(8.0, 100e3, 0.0)),
        ("case_5", ServiceLoad::new(0.0, 100e3, 20e6)),
    ];

    println!(
        "Layup: [+{0}/-{0}] {1}, internal radius {2} mm\n",
        theta, material_name, internal_radius
    );

    for progressive in [true, false] {
        let options = if progressive {
            OptimizerOptions::progressive()
        } else {
            OptimizerOptions::first_ply_failure()
        };
        println!("Progressive failure: {}", progressive);
        println!("{:<8} {:>12} {:>14} {:>6}  {}", "case", "t [mm]", "mass [g/mm]", "iter", "mechanism");

        for (name, load) in &service_loads {
            let result = optimize_pipe(&laminate, internal_radius, *load, options.clone())?;
            println!(
                "{:<8} {:>12.4} {:>14.6} {:>6}  {}",
                name,
                result.optimized_thickness,
                result.mass_per_length * 1e6,
                result.iterations,
                result.failure_mechanism
            );
        }
        println!();
    }

    Ok(())
}
