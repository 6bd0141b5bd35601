use physics::Simulation;
use rand::{rngs::StdRng, SeedableRng};
use rl::{AntEnvArgs, AntTruncatedObsEnv, Env, RenderMode};

fn env() -> AntTruncatedObsEnv {
    AntTruncatedObsEnv::new(None).unwrap()
}

#[test]
fn spaces_match_the_ant() {
    let env = env();
    assert_eq!(env.observation_space().shape(), [27]);
    assert!(env.observation_space().low().iter().all(|l| *l == f64::NEG_INFINITY));
    assert!(env.observation_space().high().iter().all(|h| *h == f64::INFINITY));
    assert_eq!(env.action_size(), 8);
    assert!(env.action_space().low().iter().all(|l| *l == -1.0));
    assert!(env.action_space().high().iter().all(|h| *h == 1.0));
    assert!((env.dt() - 0.05).abs() < 1e-12);
}

#[test]
fn observations_always_have_27_components() {
    let mut env = env();
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(env.reset(Some(5)).unwrap().len(), 27);
    for _ in 0..200 {
        let action = env.action_space().sample(&mut rng);
        let step = env.step(&action).unwrap();
        assert_eq!(step.observation.len(), 27);
        assert!(!step.truncated);
        if step.terminated {
            assert_eq!(env.reset(None).unwrap().len(), 27);
        }
    }
}

#[test]
fn reward_decomposes_exactly_on_the_reduced_backend() {
    let mut env = env();
    env.reset(Some(9)).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..20 {
        let action = env.action_space().sample(&mut rng);
        let step = env.step(&action).unwrap();
        let info = step.info;
        assert_eq!(info.total(), step.reward);
        assert!(info.reward_ctrl <= 0.0);
        assert!(info.reward_contact <= 0.0);
    }
}

#[test]
fn reset_noise_is_bounded() {
    let mut env = env();
    for seed in 0..20 {
        let obs = env.reset(Some(seed)).unwrap();
        let nominal = &env.inner().init_qpos()[2..];
        for (o, n) in obs[..13].iter().zip(nominal) {
            assert!((o - n).abs() <= 0.1, "position {o} vs nominal {n}");
        }
        for v in &obs[13..] {
            assert!(v.abs() < 0.6, "velocity {v} beyond six sigma");
        }
    }
}

#[test]
fn reset_velocity_noise_has_expected_spread() {
    let mut env = env();
    let mut draws = Vec::new();
    for seed in 100..400 {
        let obs = env.reset(Some(seed)).unwrap();
        draws.extend_from_slice(&obs[13..]);
    }
    let n = draws.len() as f64;
    let mean = draws.iter().sum::<f64>() / n;
    let std = (draws.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    assert!(mean.abs() < 0.01, "mean={mean}");
    assert!((std - 0.1).abs() < 0.01, "std={std}");
}

#[test]
fn same_seed_same_reset() {
    let mut env = env();
    let a = env.reset(Some(42)).unwrap();
    env.step(&[0.3; 8]).unwrap();
    let b = env.reset(Some(42)).unwrap();
    assert_eq!(a, b);

    let c = env.reset(Some(43)).unwrap();
    assert_ne!(a, c);
}

#[test]
fn seeded_episodes_replay_identically() {
    let rollout = |seed: u64| {
        let mut env = env();
        let mut obs = vec![env.reset(Some(seed)).unwrap()];
        for i in 0..10 {
            let a = f64::from(i) / 10.0 - 0.5;
            obs.push(env.step(&[a; 8]).unwrap().observation);
        }
        obs
    };
    assert_eq!(rollout(7), rollout(7));
}

#[test]
fn unseeded_reset_continues_the_stream() {
    let mut env = env();
    let first = env.reset(Some(1)).unwrap();
    let second = env.reset(None).unwrap();
    assert_ne!(first, second);
}

#[test]
fn standing_ant_is_not_terminated() {
    let mut env = env();
    env.reset(Some(0)).unwrap();
    let ankle = 50_f64.to_radians();
    let mut qpos = vec![0.0, 0.0, 0.44, 1.0, 0.0, 0.0, 0.0];
    qpos.extend_from_slice(&[0.0, ankle, 0.0, -ankle, 0.0, -ankle, 0.0, ankle]);
    env.inner_mut().set_state(&qpos, &[0.0; 14]).unwrap();
    for _ in 0..20 {
        let step = env.step(&[0.0; 8]).unwrap();
        assert!(!step.terminated, "torso height {}", step.observation[0]);
    }
}

#[test]
fn raised_torso_is_terminated() {
    let mut env = env();
    env.reset(Some(0)).unwrap();
    let mut qpos = env.inner().init_qpos().to_vec();
    qpos[2] = 1.5;
    env.inner_mut().set_state(&qpos, &[0.0; 14]).unwrap();
    assert!(env.step(&[0.0; 8]).unwrap().terminated);
}

#[test]
fn constructor_args_rebuild_an_equivalent_env() {
    let env = AntTruncatedObsEnv::new(Some(RenderMode::RgbArray)).unwrap();
    let json = env.args().to_json().unwrap();
    let args = AntEnvArgs::from_json(&json).unwrap();
    assert_eq!(&args, env.args());

    let mut a = AntTruncatedObsEnv::from_args(&args).unwrap();
    let mut b = env;
    assert_eq!(a.inner().render_mode(), Some(RenderMode::RgbArray));
    assert_eq!(a.reset(Some(3)).unwrap(), b.reset(Some(3)).unwrap());
}

#[test]
fn default_args_have_no_render_mode() {
    let args = AntEnvArgs::from_json("{}").unwrap();
    assert_eq!(args, AntEnvArgs::default());
    assert!(AntEnvArgs::from_json(r#"{"render_mode":"window"}"#).is_err());
}

#[test]
fn human_mode_points_the_default_viewer_at_the_ant() {
    let mut env = AntTruncatedObsEnv::new(Some(RenderMode::Human)).unwrap();
    env.reset(Some(0)).unwrap();
    let step = env.step(&[0.0; 8]).unwrap();
    assert_eq!(step.observation.len(), 27);

    let extent = env.inner().sim().model().stat.extent;
    let viewer = env.inner().viewer().expect("human mode attaches a viewer");
    assert!((viewer.camera().distance - extent * 0.5).abs() < 1e-12);
}

#[test]
fn no_render_mode_means_no_viewer() {
    assert!(env().inner().viewer().is_none());
}
