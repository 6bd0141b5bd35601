//! # Ant with truncated observations
//!
//! A quadruped rewarded for moving along +x. Observations drop the torso's
//! global x/y and the external contact forces, leaving 27 components:
//! `qpos[2..]` followed by `qvel`. Contact forces still enter the reward.

use anyhow::anyhow;
use phenotype::Phenotype;
use physics::{Model, ReducedSim, Simulation};
use serde::{Deserialize, Serialize};

use crate::env::{Env, Step};
use crate::render::{Camera, Metadata, RenderMode, TraceViewer, Viewer};
use crate::seeding::{standard_normal_vec, uniform};
use crate::sim_env::SimEnv;
use crate::space::BoxSpace;
use crate::EnvError;

pub const OBS_DIM: usize = 27;
pub const FRAME_SKIP: usize = 5;
pub const RESET_NOISE_SCALE: f64 = 0.1;
pub const CTRL_COST_WEIGHT: f64 = 0.5;
pub const CONTACT_COST_WEIGHT: f64 = 0.5e-3;
pub const CONTACT_FORCE_RANGE: [f64; 2] = [-1.0, 1.0];
pub const SURVIVE_REWARD: f64 = 1.0;
/// Torso heights for which the episode continues.
pub const HEALTHY_Z_RANGE: [f64; 2] = [0.2, 1.0];

pub const METADATA: Metadata = Metadata {
    render_modes: &RenderMode::ALL,
    render_fps: 20,
};

const TORSO: &str = "torso";

/// Reward terms of one step. The penalties are stored negated so the four
/// fields add up to the reward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AntInfo {
    pub reward_forward: f64,
    pub reward_ctrl: f64,
    pub reward_contact: f64,
    pub reward_survive: f64,
}

impl AntInfo {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.reward_forward + self.reward_ctrl + self.reward_contact + self.reward_survive
    }
}

/// Constructor arguments, enough to rebuild an equivalent environment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntEnvArgs {
    #[serde(default)]
    pub render_mode: Option<RenderMode>,
}

impl AntEnvArgs {
    /// # Errors
    ///
    /// Returns [`EnvError::Args`] if serialization fails.
    pub fn to_json(&self) -> Result<String, EnvError> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns [`EnvError::Args`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        Ok(serde_json::from_str(json)?)
    }
}

pub struct AntTruncatedObsEnv<S = ReducedSim> {
    inner: SimEnv<S>,
    args: AntEnvArgs,
}

impl AntTruncatedObsEnv<ReducedSim> {
    /// Load the bundled ant on the reduced backend.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Model`] if the bundled model fails to load.
    pub fn new(render_mode: Option<RenderMode>) -> Result<Self, EnvError> {
        let model = Phenotype::ant()
            .and_then(Phenotype::into_model)
            .map_err(EnvError::Model)?;
        Self::with_simulation(ReducedSim::new(model), render_mode)
    }

    /// Rebuild an environment from serialized constructor arguments.
    ///
    /// # Errors
    ///
    /// See [`AntTruncatedObsEnv::new`].
    pub fn from_args(args: &AntEnvArgs) -> Result<Self, EnvError> {
        Self::new(args.render_mode)
    }
}

impl<S: Simulation> AntTruncatedObsEnv<S> {
    /// Run the task on any backend providing an ant-shaped model with a
    /// `torso` body.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ObservationShape`] if the model has fewer than two
    /// position coordinates or does not produce 27 observation components, [`EnvError::Model`] if it lacks a torso,
    /// or any [`SimEnv::new`] error.
    pub fn with_simulation(sim: S, render_mode: Option<RenderMode>) -> Result<Self, EnvError> {
        let model = sim.model();
        let actual = model.nq().saturating_sub(2) + model.nv();
        if model.nq() < 2 || actual != OBS_DIM {
            return Err(EnvError::ObservationShape { expected: OBS_DIM, actual });
        }
        if model.body_id(TORSO).is_none() {
            return Err(EnvError::Model(anyhow!("model `{}` has no {TORSO} body", model.name)));
        }

        let inner = SimEnv::new(sim, FRAME_SKIP, BoxSpace::unbounded(OBS_DIM), render_mode, &METADATA)?;
        tracing::info!(
            model = %inner.sim().model().name,
            dt = inner.dt(),
            render_mode = ?render_mode,
            "ant environment ready"
        );
        let env = Self {
            inner,
            args: AntEnvArgs { render_mode },
        };
        Ok(match render_mode {
            Some(_) => env.with_viewer(Box::new(TraceViewer::new())),
            None => env,
        })
    }

    /// Attach a viewer, pointing its camera at the model first.
    #[must_use]
    pub fn with_viewer(mut self, mut viewer: Box<dyn Viewer>) -> Self {
        viewer_setup(viewer.camera_mut(), self.inner.sim().model());
        self.inner.attach_viewer(viewer);
        self
    }

    pub fn args(&self) -> &AntEnvArgs {
        &self.args
    }

    pub fn inner(&self) -> &SimEnv<S> {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut SimEnv<S> {
        &mut self.inner
    }

    pub fn dt(&self) -> f64 {
        self.inner.dt()
    }

    /// Generalized positions without global x/y, then all velocities.
    pub fn observation(&self) -> Vec<f64> {
        let sim = self.inner.sim();
        sim.qpos()[2..].iter().chain(sim.qvel()).copied().collect()
    }

    /// # Errors
    ///
    /// Propagates viewer failures.
    pub fn render(&mut self) -> Result<(), EnvError> {
        self.inner.render()
    }

    fn reset_model(&mut self) -> Result<Vec<f64>, EnvError> {
        let nq = self.inner.init_qpos().len();
        let nv = self.inner.init_qvel().len();
        let pos_noise = uniform(self.inner.rng(), -RESET_NOISE_SCALE, RESET_NOISE_SCALE, nq);
        let vel_noise = standard_normal_vec(self.inner.rng(), nv);
        let qpos: Vec<f64> = self
            .inner
            .init_qpos()
            .iter()
            .zip(&pos_noise)
            .map(|(q, n)| q + n)
            .collect();
        let qvel: Vec<f64> = self
            .inner
            .init_qvel()
            .iter()
            .zip(&vel_noise)
            .map(|(v, n)| v + n * RESET_NOISE_SCALE)
            .collect();
        self.inner.set_state(&qpos, &qvel)?;
        Ok(self.observation())
    }

    fn render_if_interactive(&mut self) -> Result<(), EnvError> {
        if self.inner.render_mode().is_some_and(RenderMode::is_interactive) {
            self.inner.render()?;
        }
        Ok(())
    }
}

impl<S: Simulation> Env for AntTruncatedObsEnv<S> {
    type Info = AntInfo;

    fn step(&mut self, action: &[f64]) -> Result<Step<AntInfo>, EnvError> {
        let x_before = self.inner.body_com(TORSO)?.x;
        self.inner.do_simulation(action, FRAME_SKIP)?;
        let x_after = self.inner.body_com(TORSO)?.x;

        let forward_reward = (x_after - x_before) / self.dt();
        let ctrl_cost = CTRL_COST_WEIGHT * action.iter().map(|a| a * a).sum::<f64>();
        let contact_cost = contact_cost(self.inner.sim().cfrc_ext());
        let reward = forward_reward - ctrl_cost - contact_cost + SURVIVE_REWARD;

        let state = self.inner.state_vector();
        let terminated = !is_healthy(&state);
        if terminated && !state.iter().all(|v| v.is_finite()) {
            tracing::warn!("simulation state is no longer finite");
        }
        let observation = self.observation();

        self.render_if_interactive()?;

        tracing::debug!(reward, forward_reward, ctrl_cost, contact_cost, terminated, "ant step");
        Ok(Step {
            observation,
            reward,
            terminated,
            truncated: false,
            info: AntInfo {
                reward_forward: forward_reward,
                reward_ctrl: -ctrl_cost,
                reward_contact: -contact_cost,
                reward_survive: SURVIVE_REWARD,
            },
        })
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Vec<f64>, EnvError> {
        self.inner.reset_simulation(seed);
        let observation = self.reset_model()?;
        self.render_if_interactive()?;
        tracing::debug!(seed = self.inner.seed(), "ant reset");
        Ok(observation)
    }

    fn observation_space(&self) -> &BoxSpace {
        self.inner.observation_space()
    }

    fn action_space(&self) -> &BoxSpace {
        self.inner.action_space()
    }
}

/// Camera distance of half the model's extent.
pub fn viewer_setup(camera: &mut Camera, model: &Model) {
    camera.distance = model.stat.extent * 0.5;
}

/// Weighted sum of squared contact forces after clamping each component.
#[must_use]
pub fn contact_cost(cfrc_ext: &[[f64; 6]]) -> f64 {
    let [lo, hi] = CONTACT_FORCE_RANGE;
    CONTACT_COST_WEIGHT
        * cfrc_ext
            .iter()
            .flatten()
            .map(|f| f.clamp(lo, hi).powi(2))
            .sum::<f64>()
}

/// Finite state with the torso height (`state[2]`) inside
/// [`HEALTHY_Z_RANGE`].
#[must_use]
pub fn is_healthy(state: &[f64]) -> bool {
    let [lo, hi] = HEALTHY_Z_RANGE;
    state.iter().all(|v| v.is_finite()) && state.get(2).is_some_and(|z| (lo..=hi).contains(z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_forces_are_clamped() {
        let mut cfrc = vec![[0.0; 6]; 2];
        cfrc[1][5] = 250.0;
        cfrc[1][3] = -0.5;
        let expected = CONTACT_COST_WEIGHT * (1.0 + 0.25);
        assert!((contact_cost(&cfrc) - expected).abs() < 1e-15);
    }

    #[test]
    fn healthy_range_is_inclusive() {
        assert!(is_healthy(&[0.0, 0.0, 0.2]));
        assert!(is_healthy(&[0.0, 0.0, 1.0]));
        assert!(!is_healthy(&[0.0, 0.0, 0.19]));
        assert!(!is_healthy(&[0.0, 0.0, 1.01]));
        assert!(!is_healthy(&[f64::NAN, 0.0, 0.5]));
        assert!(!is_healthy(&[0.0, f64::INFINITY, 0.5]));
    }

    #[test]
    fn info_total_matches_terms() {
        let info = AntInfo {
            reward_forward: 2.0,
            reward_ctrl: -0.5,
            reward_contact: -0.25,
            reward_survive: SURVIVE_REWARD,
        };
        assert_eq!(info.total(), 2.25);
    }
}
