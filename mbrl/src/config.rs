//! Rollout configuration.
//!
//! A [`RolloutConfig`] is read from an optional JSON file; every field has a
//! default, and command-line flags override whatever the file sets.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rl::RenderMode;
use serde::{Deserialize, Serialize};

/// How actions are chosen during a rollout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Uniform samples from the action space.
    #[default]
    Random,
    /// The all-zero action.
    Zero,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RolloutConfig {
    pub episodes: usize,
    /// Episodes reaching this many steps are reported as truncated.
    pub max_steps: usize,
    pub seed: Option<u64>,
    pub policy: Policy,
    pub render_mode: Option<RenderMode>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            episodes: 1,
            max_steps: 1000,
            seed: None,
            policy: Policy::Random,
            render_mode: None,
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub episodes: Option<usize>,
    pub max_steps: Option<usize>,
    pub seed: Option<u64>,
    pub policy: Option<Policy>,
    pub render_mode: Option<RenderMode>,
}

impl RolloutConfig {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading rollout config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("parsing rollout config {}", path.display()))
    }

    /// Load `path` if given, otherwise start from the defaults, then apply
    /// `overrides`.
    ///
    /// # Errors
    ///
    /// See [`RolloutConfig::from_path`].
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(episodes) = overrides.episodes {
            self.episodes = episodes;
        }
        if let Some(max_steps) = overrides.max_steps {
            self.max_steps = max_steps;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(policy) = overrides.policy {
            self.policy = policy;
        }
        if overrides.render_mode.is_some() {
            self.render_mode = overrides.render_mode;
        }
    }
}
