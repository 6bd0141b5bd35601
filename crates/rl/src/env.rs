use crate::space::BoxSpace;
use crate::EnvError;

/// Outcome of a single [`Env::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step<I> {
    pub observation: Vec<f64>,
    pub reward: f64,
    /// The episode reached a terminal state of the task.
    pub terminated: bool,
    /// The episode was cut short from outside the task, e.g. by a time limit.
    pub truncated: bool,
    pub info: I,
}

impl<I> Step<I> {
    /// Either terminated or truncated.
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Reinforcement learning environment trait.
///
/// Inspired by classic frameworks like OpenAI Gym, this trait defines the core
/// interface an environment must provide. Each call to [`step`] advances the
/// simulation by one action and returns the new observation vector, a reward
/// signal, termination and truncation flags, and task-specific diagnostics.
///
/// [`step`]: Env::step
pub trait Env {
    /// Per-step diagnostics.
    type Info;

    /// Advance the environment by one action.
    ///
    /// # Errors
    ///
    /// Returns an error when the action does not fit the action space or the
    /// underlying simulation fails.
    fn step(&mut self, action: &[f64]) -> Result<Step<Self::Info>, EnvError>;

    /// Reset the environment to a fresh starting state and return the initial
    /// observation vector. A seed re-seeds the environment's random source.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying simulation rejects the new state.
    fn reset(&mut self, seed: Option<u64>) -> Result<Vec<f64>, EnvError>;

    fn observation_space(&self) -> &BoxSpace;

    fn action_space(&self) -> &BoxSpace;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize {
        self.observation_space().len()
    }

    /// Size of the action vector.
    fn action_size(&self) -> usize {
        self.action_space().len()
    }
}
