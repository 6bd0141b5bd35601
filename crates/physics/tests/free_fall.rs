use glam::DVec3;
use physics::{ModelBuilder, ReducedSim, Simulation};

fn ball(height: f64) -> ReducedSim {
    let mut builder = ModelBuilder::new("ball");
    let ball = builder.add_body("ball", 0, DVec3::new(0.0, 0.0, height), 1.0);
    builder.add_free_joint("root", ball).unwrap();
    ReducedSim::new(builder.build().unwrap())
}

#[test]
fn body_free_fall_matches_discrete_solution() {
    // initial height 10 m, no initial velocity, no ground contact points
    let mut sim = ball(10.0);
    let dt = sim.model().timestep;
    let steps = 100_usize;
    sim.step(&[], steps).unwrap();

    // semi-implicit Euler: z_n = z0 - g dt² n(n+1)/2
    let n = steps as f64;
    let expected = 10.0 - 9.81 * dt * dt * n * (n + 1.0) / 2.0;
    let z = sim.body_com("ball").unwrap().z;
    assert!((z - expected).abs() < 1e-9, "z={z} expected={expected}");
    assert!((sim.time() - 1.0).abs() < 1e-9);
}

#[test]
fn free_fall_is_close_to_analytic() {
    let mut sim = ball(10.0);
    sim.step(&[], 100).unwrap();
    let analytic = 10.0 - 0.5 * 9.81 * 1.0_f64.powi(2);
    let z = sim.body_com("ball").unwrap().z;
    // first-order integrator error is g·dt·t/2
    assert!((z - analytic).abs() < 0.05, "z={z}");
}

#[test]
fn reset_restores_nominal_pose() {
    let mut sim = ball(3.0);
    sim.step(&[], 20).unwrap();
    sim.reset();
    assert_eq!(sim.qpos(), &[0.0, 0.0, 3.0, 1.0, 0.0, 0.0, 0.0]);
    assert!(sim.qvel().iter().all(|v| *v == 0.0));
    assert_eq!(sim.time(), 0.0);
}
