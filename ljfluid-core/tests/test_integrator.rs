//! Tests for the velocity Verlet stepper

use glam::DVec2;
use ljfluid_core::boundary::minimum_image_vec;
use ljfluid_core::forces::LennardJones;
use ljfluid_core::integrator::VelocityVerlet;
use ljfluid_core::observables::total_momentum;
use ljfluid_core::tests::test_helpers::{all_in_box, approx_eq, ensemble_at, run_steps, seeded_config};
use ljfluid_core::{Ensemble, SimError};

const DT: f64 = 0.005;

fn create_test_setup() -> (LennardJones, VelocityVerlet) {
    (
        LennardJones::new(1.0, 1.0, 3.0, 10.0),
        VelocityVerlet::new(DT, 1.0, 10.0),
    )
}

#[test]
fn test_single_step_matches_velocity_verlet() {
    let (field, mut verlet) = create_test_setup();
    let mut ensemble = ensemble_at(&[(4.0, 5.0), (5.5, 5.0)]);
    field.compute_forces(&mut ensemble).unwrap();
    let f_old = ensemble.forces.clone();

    verlet.step(&mut ensemble, &field).unwrap();

    // x(t + dt) = x + v dt + ½ dt² f / m, with v = 0
    let x0 = 4.0 + 0.5 * DT * DT * f_old[0].x;
    let x1 = 5.5 + 0.5 * DT * DT * f_old[1].x;
    assert!(approx_eq(ensemble.positions[0].x, x0, 1e-14));
    assert!(approx_eq(ensemble.positions[1].x, x1, 1e-14));
    assert!(approx_eq(ensemble.positions[0].y, 5.0, 1e-14));

    // v(t + dt) = ½ dt (f_old + f_new) / m
    let f_new = field
        .pair_force(minimum_image_vec(ensemble.positions[0] - ensemble.positions[1], 10.0))
        .unwrap();
    assert!(approx_eq(ensemble.forces[0].x, f_new.x, 1e-12));
    assert!(approx_eq(
        ensemble.velocities[0].x,
        0.5 * DT * (f_old[0].x + f_new.x),
        1e-14
    ));
}

#[test]
fn test_position_update_uses_half_dt_squared_coefficient() {
    let (field, mut verlet) = create_test_setup();
    let mut ensemble = ensemble_at(&[(4.0, 5.0), (5.5, 5.0)]);
    field.compute_forces(&mut ensemble).unwrap();
    let f = ensemble.forces[0].x;

    verlet.step(&mut ensemble, &field).unwrap();

    let moved = ensemble.positions[0].x - 4.0;
    let quarter = 0.25 * DT * DT * f;
    assert!(
        (moved - quarter).abs() > 1e-7,
        "displacement should not use the (dt/2)^2 coefficient"
    );
    assert!(approx_eq(moved, 0.5 * DT * DT * f, 1e-14));
}

#[test]
fn test_crossing_the_boundary_wraps_position() {
    let (field, mut verlet) = create_test_setup();
    let mut ensemble = Ensemble::new(
        vec![DVec2::new(9.999, 0.0005)],
        vec![DVec2::new(1.0, -1.0)],
    );

    verlet.step(&mut ensemble, &field).unwrap();

    let p = ensemble.positions[0];
    assert!(approx_eq(p.x, 0.004, 1e-12), "x should wrap to 0.004, got {}", p.x);
    assert!(approx_eq(p.y, 9.9955, 1e-12), "y should wrap to 9.9955, got {}", p.y);
}

#[test]
fn test_escape_beyond_one_cell_is_reported() {
    let (field, mut verlet) = create_test_setup();
    // 3000 * 0.005 = 15 box units in one step
    let mut ensemble = Ensemble::new(vec![DVec2::new(5.0, 5.0)], vec![DVec2::new(3000.0, 0.0)]);

    let err = verlet.step(&mut ensemble, &field).unwrap_err();
    assert!(matches!(err, SimError::ParticleEscaped { particle: 0, .. }));
}

#[test]
fn test_momentum_conserved_over_many_steps() {
    let sim = run_steps(seeded_config(11), 500).expect("run should succeed");
    let p = total_momentum(sim.ensemble(), sim.config().mass);
    assert!(p.length() < 1e-10, "momentum drifted to {:?}", p);
}

#[test]
fn test_positions_stay_in_box() {
    let sim = run_steps(seeded_config(3), 2000).expect("run should succeed");
    assert!(all_in_box(sim.positions(), sim.config().box_length));
}

#[test]
fn test_positions_stay_in_box_every_step() {
    let (_, mut verlet) = create_test_setup();
    // Non-interacting fast particles that cross the boundary often
    let field = LennardJones::new(0.0, 1.0, 3.0, 10.0);
    let mut ensemble = Ensemble::new(
        vec![DVec2::new(1.0, 1.0), DVec2::new(6.0, 6.0), DVec2::new(3.0, 8.0)],
        vec![DVec2::new(20.0, -13.0), DVec2::new(-17.0, 9.0), DVec2::new(5.0, 31.0)],
    );
    field.compute_forces(&mut ensemble).unwrap();

    for _ in 0..1000 {
        verlet.step(&mut ensemble, &field).unwrap();
        assert!(all_in_box(&ensemble.positions, 10.0));
    }
}
