#![deny(clippy::all)]
//! # Locomotion Environments
//!
//! Reinforcement learning environments over the [`physics`] simulation
//! contract.
//!
//! -   [`Env`] is the step/reset interface consumed by training loops.
//! -   [`SimEnv`] holds what every physics task shares: the simulation,
//!     frame skip, nominal state, spaces, seeded random source and viewer.
//! -   [`AntTruncatedObsEnv`] is the quadruped task with a 27-component
//!     observation that leaves out external contact forces.
//!
//! ```rust
//! use rl::{AntTruncatedObsEnv, Env};
//!
//! let mut env = AntTruncatedObsEnv::new(None).unwrap();
//! let obs = env.reset(Some(0)).unwrap();
//! assert_eq!(obs.len(), 27);
//!
//! let step = env.step(&[0.0; 8]).unwrap();
//! assert!(!step.truncated);
//! ```

pub mod ant;
pub mod env;
pub mod error;
pub mod render;
pub mod seeding;
pub mod sim_env;
pub mod space;

pub use ant::{AntEnvArgs, AntInfo, AntTruncatedObsEnv};
pub use env::{Env, Step};
pub use error::EnvError;
pub use render::{Camera, Metadata, RenderMode, TraceViewer, Viewer};
pub use sim_env::SimEnv;
pub use space::BoxSpace;
