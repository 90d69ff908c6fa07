//! Energy drift checks for the integrator ordering

use ljfluid_core::observables::{kinetic_energy, temperature};
use ljfluid_core::tests::test_helpers::{run_steps, seeded_config};
use ljfluid_core::{SimConfig, Simulation};
use std::ops::ControlFlow;

#[test]
fn test_total_energy_drift_is_small_over_1000_steps() {
    let sim = run_steps(seeded_config(42), 1000).expect("run should succeed");
    let e0 = sim.initial_energy();
    let e1 = sim.total_energy();
    let drift = (e1 - e0).abs() / e0.abs();

    assert!(drift < 1e-2, "energy drifted by {:.3e} (E0 = {}, E = {})", drift, e0, e1);
}

#[test]
fn test_energy_drift_reported_in_summary() {
    let mut sim = Simulation::new(SimConfig {
        steps: Some(1000),
        ..seeded_config(8)
    })
    .unwrap();
    let summary = sim.run(|_| ControlFlow::Continue(())).unwrap();

    assert_eq!(summary.steps_completed, 1000);
    assert!(!summary.cancelled);
    assert!(summary.energy_drift < 1e-2, "drift {:.3e}", summary.energy_drift);
    assert_eq!(summary.final_energy, sim.total_energy());
}

fn max_energy_error(dt: f64, steps: u64) -> f64 {
    let mut sim = Simulation::new(SimConfig {
        dt,
        steps: Some(steps),
        ..seeded_config(17)
    })
    .unwrap();
    let e0 = sim.initial_energy();
    let mut worst: f64 = 0.0;
    while !sim.step().unwrap() {
        worst = worst.max((sim.total_energy() - e0).abs());
    }
    worst
}

#[test]
fn test_smaller_time_step_fluctuates_less() {
    // Same simulated time, 4x smaller step
    let coarse = max_energy_error(0.01, 500);
    let fine = max_energy_error(0.0025, 2000);
    assert!(fine < coarse, "fine {:.3e} vs coarse {:.3e}", fine, coarse);
}

#[test]
fn test_kinetic_energy_and_temperature_are_positive() {
    let sim = run_steps(seeded_config(2), 100).unwrap();
    let ke = kinetic_energy(sim.ensemble(), sim.config().mass);
    assert!(ke > 0.0);
    assert!(temperature(sim.ensemble(), sim.config().mass) > 0.0);
}
