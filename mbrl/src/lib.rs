//! # mbrl
//!
//! Entry crate for the ant locomotion workspace. The `mbrl` binary rolls
//! out [`rl::AntTruncatedObsEnv`] with a simple policy and prints JSON
//! summaries; this library holds its configuration and rollout logic.
//!
//! -   [`physics`] defines the simulation contract and the reduced-order
//!     backend.
//! -   [`phenotype`] loads creature descriptions, including the bundled ant.
//! -   [`rl`] holds the environment interface and the ant task.

pub mod cli;
pub mod config;
pub mod rollout;

pub use config::{Overrides, Policy, RolloutConfig};
pub use phenotype;
pub use physics;
pub use rl;
pub use rollout::{describe, run, EnvInfo, EpisodeSummary, RolloutSummary};
