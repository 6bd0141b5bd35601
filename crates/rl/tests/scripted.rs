mod common;

use common::{ScriptedSim, CountingViewer};
use glam::DVec3;
use phenotype::Phenotype;
use physics::{ModelBuilder, Simulation};
use rl::ant::{FRAME_SKIP, SURVIVE_REWARD};
use rl::{AntTruncatedObsEnv, Env, EnvError, RenderMode};

fn env() -> AntTruncatedObsEnv<ScriptedSim> {
    AntTruncatedObsEnv::with_simulation(ScriptedSim::ant(), None).unwrap()
}

#[test]
fn forward_reward_is_torso_velocity() {
    let mut env = env();
    env.inner_mut().sim_mut().advance_x = 0.01;
    let step = env.step(&[0.0; 8]).unwrap();
    let expected = 0.01 * FRAME_SKIP as f64 / env.dt();
    assert!((step.info.reward_forward - expected).abs() < 1e-12);
    assert!((step.reward - (expected + SURVIVE_REWARD)).abs() < 1e-12);
}

#[test]
fn reward_terms_add_up_to_reward() {
    let mut env = env();
    {
        let sim = env.inner_mut().sim_mut();
        sim.advance_x = -0.003;
        sim.next_cfrc[4] = [0.3, -2.0, 0.1, 5.0, -0.7, 12.0];
        sim.next_cfrc[9] = [0.0, 0.0, 0.0, 0.2, 0.2, 0.9];
    }
    let action = [0.5, -0.25, 1.0, 0.0, -1.0, 0.75, 0.1, -0.3];
    let step = env.step(&action).unwrap();
    let info = step.info;
    assert_eq!(info.total(), step.reward);
    assert_eq!(info.reward_survive, 1.0);

    let ctrl: f64 = 0.5 * action.iter().map(|a| a * a).sum::<f64>();
    assert!((info.reward_ctrl + ctrl).abs() < 1e-12);

    let clipped: f64 = [0.3_f64, -1.0, 0.1, 1.0, -0.7, 1.0, 0.2, 0.2, 0.9]
        .iter()
        .map(|f| f * f)
        .sum();
    assert!((info.reward_contact + 0.5e-3 * clipped).abs() < 1e-15);
}

#[test]
fn termination_follows_torso_height() {
    for (z, terminated) in [(0.1, true), (0.2, false), (0.5, false), (1.0, false), (1.5, true)] {
        let mut env = env();
        env.inner_mut().sim_mut().next_z = Some(z);
        let step = env.step(&[0.0; 8]).unwrap();
        assert_eq!(step.terminated, terminated, "z={z}");
        assert!(!step.truncated);
    }
}

#[test]
fn non_finite_state_terminates() {
    let mut env = env();
    let mut qvel = vec![0.0; 14];
    qvel[7] = f64::NAN;
    env.inner_mut().sim_mut().next_qvel = Some(qvel);
    let step = env.step(&[0.0; 8]).unwrap();
    assert!(step.terminated);
    assert!(!step.truncated);
}

#[test]
fn infinite_velocity_terminates() {
    let mut env = env();
    let mut qvel = vec![0.0; 14];
    qvel[0] = f64::INFINITY;
    env.inner_mut().sim_mut().next_qvel = Some(qvel);
    assert!(env.step(&[0.0; 8]).unwrap().terminated);
}

#[test]
fn observation_drops_global_xy() {
    let mut env = env();
    let qpos: Vec<f64> = (0..15).map(f64::from).collect();
    let qvel: Vec<f64> = (100..114).map(f64::from).collect();
    env.inner_mut().set_state(&qpos, &qvel).unwrap();
    let obs = env.observation();
    assert_eq!(obs.len(), 27);
    assert_eq!(obs[..13], qpos[2..]);
    assert_eq!(obs[13..], qvel[..]);
}

#[test]
fn wrong_action_length_is_rejected() {
    let mut env = env();
    let err = env.step(&[0.0; 3]).unwrap_err();
    assert!(matches!(err, EnvError::ActionShape { expected: 8, actual: 3 }));
    assert_eq!(env.inner().sim().steps, 0);
}

#[test]
fn each_step_runs_frame_skip_substeps() {
    let mut env = env();
    env.step(&[0.0; 8]).unwrap();
    env.step(&[0.0; 8]).unwrap();
    let time = env.inner().sim().time();
    assert!((time - 2.0 * 0.05).abs() < 1e-12);
}

#[test]
fn human_mode_renders_on_step_and_reset() {
    let (viewer, frames, distance) = CountingViewer::new();
    let mut env = AntTruncatedObsEnv::with_simulation(ScriptedSim::ant(), Some(RenderMode::Human))
        .unwrap()
        .with_viewer(Box::new(viewer));
    env.reset(Some(0)).unwrap();
    assert_eq!(frames.get(), 1);
    env.step(&[0.0; 8]).unwrap();
    env.step(&[0.0; 8]).unwrap();
    assert_eq!(frames.get(), 3);

    let extent = env.inner().sim().model().stat.extent;
    assert!((distance.get() - extent * 0.5).abs() < 1e-12);
}

#[test]
fn array_modes_do_not_render_on_step() {
    let (viewer, frames, _) = CountingViewer::new();
    let mut env = AntTruncatedObsEnv::with_simulation(ScriptedSim::ant(), Some(RenderMode::RgbArray))
        .unwrap()
        .with_viewer(Box::new(viewer));
    env.reset(None).unwrap();
    env.step(&[0.0; 8]).unwrap();
    assert_eq!(frames.get(), 0);
    env.render().unwrap();
    assert_eq!(frames.get(), 1);
}

#[test]
fn mismatched_render_fps_is_rejected() {
    let mut phenotype = Phenotype::ant().unwrap();
    phenotype.timestep = 0.02;
    let sim = ScriptedSim::new(phenotype.into_model().unwrap());
    let err = AntTruncatedObsEnv::with_simulation(sim, None).err().unwrap();
    assert!(matches!(err, EnvError::Metadata { declared: 20, .. }));
}

#[test]
fn non_ant_model_is_rejected() {
    let mut builder = ModelBuilder::new("ball");
    let ball = builder.add_body("torso", 0, DVec3::new(0.0, 0.0, 1.0), 1.0);
    builder.add_free_joint("root", ball).unwrap();
    let sim = ScriptedSim::new(builder.build().unwrap());
    let err = AntTruncatedObsEnv::with_simulation(sim, None).err().unwrap();
    assert!(matches!(err, EnvError::ObservationShape { expected: 27, actual: 11 }));
}

#[test]
fn model_without_planar_coordinates_is_rejected() {
    let mut builder = ModelBuilder::new("hinge");
    let torso = builder.add_body("torso", 0, DVec3::new(0.0, 0.0, 1.0), 1.0);
    builder.add_hinge("swing", torso, DVec3::Z, None).unwrap();
    let sim = ScriptedSim::new(builder.build().unwrap());
    let err = AntTruncatedObsEnv::with_simulation(sim, None).err().unwrap();
    assert!(matches!(err, EnvError::ObservationShape { expected: 27, actual: 1 }));
}
