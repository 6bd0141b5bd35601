//! Episode rollouts and the summaries printed by the CLI.

use anyhow::Result;
use physics::Simulation;
use rand::Rng;
use rl::seeding::np_random;
use rl::{AntInfo, AntTruncatedObsEnv, BoxSpace, Env, Metadata};
use serde::Serialize;

use crate::config::{Policy, RolloutConfig};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    #[serde(rename = "return")]
    pub total_reward: f64,
    pub length: usize,
    pub terminated: bool,
    /// Stopped by `max_steps` rather than by the task.
    pub truncated: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RolloutSummary {
    pub seed: u64,
    pub episodes: Vec<EpisodeSummary>,
    pub mean_return: f64,
    pub mean_length: f64,
    /// Reward terms averaged over every step of every episode.
    pub mean_components: AntInfo,
}

fn choose_action<R: Rng + ?Sized>(env: &impl Env, policy: Policy, rng: &mut R) -> Vec<f64> {
    match policy {
        Policy::Random => env.action_space().sample(rng),
        Policy::Zero => vec![0.0; env.action_size()],
    }
}

/// Run `config.episodes` episodes on `env`.
///
/// Only the first reset is seeded; later episodes continue the
/// environment's random stream. The policy draws from its own generator
/// built from the same seed.
///
/// # Errors
///
/// Propagates environment failures.
pub fn run<E: Env<Info = AntInfo>>(env: &mut E, config: &RolloutConfig) -> Result<RolloutSummary> {
    let (mut rng, seed) = np_random(config.seed);
    let mut episodes = Vec::with_capacity(config.episodes);
    let mut sums = [0.0; 4];
    let mut total_steps = 0usize;

    for episode in 0..config.episodes {
        env.reset((episode == 0).then_some(seed))?;
        let mut summary = EpisodeSummary {
            episode,
            total_reward: 0.0,
            length: 0,
            terminated: false,
            truncated: false,
        };

        while summary.length < config.max_steps {
            let action = choose_action(&*env, config.policy, &mut rng);
            let step = env.step(&action)?;
            summary.total_reward += step.reward;
            summary.length += 1;
            let info = step.info;
            sums[0] += info.reward_forward;
            sums[1] += info.reward_ctrl;
            sums[2] += info.reward_contact;
            sums[3] += info.reward_survive;
            tracing::trace!(episode, step = summary.length, reward = info.total(), "step");
            if step.done() {
                summary.terminated = step.terminated;
                summary.truncated = step.truncated;
                break;
            }
        }
        summary.truncated |= !summary.terminated && summary.length >= config.max_steps;
        total_steps += summary.length;

        tracing::info!(
            episode,
            total_reward = summary.total_reward,
            length = summary.length,
            terminated = summary.terminated,
            "episode finished"
        );
        episodes.push(summary);
    }

    let mean = |total: f64, n: usize| if n == 0 { 0.0 } else { total / n as f64 };
    Ok(RolloutSummary {
        seed,
        mean_return: mean(episodes.iter().map(|e| e.total_reward).sum(), episodes.len()),
        mean_length: mean(episodes.iter().map(|e| e.length as f64).sum(), episodes.len()),
        mean_components: AntInfo {
            reward_forward: mean(sums[0], total_steps),
            reward_ctrl: mean(sums[1], total_steps),
            reward_contact: mean(sums[2], total_steps),
            reward_survive: mean(sums[3], total_steps),
        },
        episodes,
    })
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpaceInfo {
    pub shape: [usize; 1],
    /// Infinite bounds serialize as `null`.
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnvInfo {
    pub model: String,
    pub nq: usize,
    pub nv: usize,
    pub nu: usize,
    pub nbody: usize,
    pub timestep: f64,
    pub frame_skip: usize,
    pub dt: f64,
    pub render_fps: u32,
    pub render_modes: Vec<String>,
    pub observation_space: SpaceInfo,
    pub action_space: SpaceInfo,
}

fn space_info(space: &BoxSpace) -> SpaceInfo {
    SpaceInfo {
        shape: space.shape(),
        low: space.low().to_vec(),
        high: space.high().to_vec(),
    }
}

/// Static description of the ant environment.
pub fn describe<S: Simulation>(env: &AntTruncatedObsEnv<S>, metadata: &Metadata) -> EnvInfo {
    let model = env.inner().sim().model();
    EnvInfo {
        model: model.name.clone(),
        nq: model.nq(),
        nv: model.nv(),
        nu: model.nu(),
        nbody: model.nbody(),
        timestep: model.timestep,
        frame_skip: env.inner().frame_skip(),
        dt: env.dt(),
        render_fps: metadata.render_fps,
        render_modes: metadata.render_modes.iter().map(|m| m.as_str().to_string()).collect(),
        observation_space: space_info(env.observation_space()),
        action_space: space_info(env.action_space()),
    }
}
