//! # Simulation-backed environments
//!
//! [`SimEnv`] bundles what every physics environment needs around a
//! [`Simulation`]: the frame skip, the nominal state captured at load time,
//! observation and action spaces, the environment's own random source and
//! the optional viewer. Concrete tasks hold a `SimEnv` and add their reward,
//! observation and reset distribution on top.

use glam::DVec3;
use physics::Simulation;
use rand::rngs::StdRng;

use crate::render::{Metadata, RenderMode, Viewer};
use crate::seeding::np_random;
use crate::space::BoxSpace;
use crate::EnvError;

pub struct SimEnv<S> {
    sim: S,
    frame_skip: usize,
    init_qpos: Vec<f64>,
    init_qvel: Vec<f64>,
    observation_space: BoxSpace,
    action_space: BoxSpace,
    render_mode: Option<RenderMode>,
    viewer: Option<Box<dyn Viewer>>,
    rng: StdRng,
    seed: u64,
}

impl<S: Simulation> SimEnv<S> {
    /// Wrap `sim`, capturing its current state as the nominal state.
    ///
    /// The action space is taken from the actuator control ranges.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Metadata`] when the step duration does not match
    /// `metadata.render_fps`, and [`EnvError::RenderMode`] for a render mode
    /// the metadata does not list.
    pub fn new(
        sim: S,
        frame_skip: usize,
        observation_space: BoxSpace,
        render_mode: Option<RenderMode>,
        metadata: &Metadata,
    ) -> Result<Self, EnvError> {
        let dt = sim.model().timestep * frame_skip as f64;
        let expected = (1.0 / dt).round();
        if expected != f64::from(metadata.render_fps) {
            return Err(EnvError::Metadata {
                declared: metadata.render_fps,
                expected,
            });
        }
        if let Some(mode) = render_mode {
            if !metadata.render_modes.contains(&mode) {
                return Err(EnvError::RenderMode(mode.to_string()));
            }
        }

        let (low, high) = sim.model().ctrl_bounds();
        let (rng, seed) = np_random(None);
        Ok(Self {
            init_qpos: sim.qpos().to_vec(),
            init_qvel: sim.qvel().to_vec(),
            action_space: BoxSpace::new(low, high),
            observation_space,
            frame_skip,
            render_mode,
            viewer: None,
            rng,
            seed,
            sim,
        })
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn frame_skip(&self) -> usize {
        self.frame_skip
    }

    /// Simulated time covered by one environment step.
    pub fn dt(&self) -> f64 {
        self.sim.model().timestep * self.frame_skip as f64
    }

    pub fn init_qpos(&self) -> &[f64] {
        &self.init_qpos
    }

    pub fn init_qvel(&self) -> &[f64] {
        &self.init_qvel
    }

    pub fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    pub fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    pub fn render_mode(&self) -> Option<RenderMode> {
        self.render_mode
    }

    /// Seed the random source was last built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Rebuild the random source from `seed`, or from fresh entropy.
    pub fn reseed(&mut self, seed: Option<u64>) -> u64 {
        let (rng, seed) = np_random(seed);
        self.rng = rng;
        self.seed = seed;
        seed
    }

    /// Start a new episode: optionally reseed, then restore the nominal
    /// simulation state. Task-specific randomisation follows.
    pub fn reset_simulation(&mut self, seed: Option<u64>) {
        if seed.is_some() {
            self.reseed(seed);
        }
        self.sim.reset();
    }

    /// Run `action` for `n_frames` physics sub-steps.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ActionShape`] when the action does not match the
    /// action space, or the simulation's own error.
    pub fn do_simulation(&mut self, action: &[f64], n_frames: usize) -> Result<(), EnvError> {
        if action.len() != self.action_space.len() {
            return Err(EnvError::ActionShape {
                expected: self.action_space.len(),
                actual: action.len(),
            });
        }
        self.sim.step(action, n_frames)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates [`physics::PhysicsError::StateShape`].
    pub fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<(), EnvError> {
        self.sim.set_state(qpos, qvel)?;
        Ok(())
    }

    pub fn state_vector(&self) -> Vec<f64> {
        self.sim.state_vector()
    }

    /// # Errors
    ///
    /// Propagates [`physics::PhysicsError::UnknownBody`].
    pub fn body_com(&self, name: &str) -> Result<DVec3, EnvError> {
        Ok(self.sim.body_com(name)?)
    }

    pub fn attach_viewer(&mut self, viewer: Box<dyn Viewer>) {
        self.viewer = Some(viewer);
    }

    pub fn viewer(&self) -> Option<&dyn Viewer> {
        self.viewer.as_deref()
    }

    /// Hand the current state to the viewer in the configured mode.
    ///
    /// Without a render mode or a viewer this only logs.
    ///
    /// # Errors
    ///
    /// Propagates viewer failures.
    pub fn render(&mut self) -> Result<(), EnvError> {
        let Some(mode) = self.render_mode else {
            tracing::warn!("render called without a render mode");
            return Ok(());
        };
        match self.viewer.as_mut() {
            Some(viewer) => viewer.render(&self.sim, mode),
            None => {
                tracing::debug!(%mode, "no viewer attached");
                Ok(())
            }
        }
    }
}
