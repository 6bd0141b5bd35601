#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
//! # Articulated Physics
//!
//! The physics layer behind the locomotion environments.
//!
//! This crate defines what an environment needs from a physics backend and
//! ships one small backend of its own.
//!
//! ## Key Components
//!
//! -   **Model:** [`Model`] describes a body tree, its joints and its
//!     actuators. It is assembled with [`ModelBuilder`], which assigns the
//!     generalized-coordinate layout and derives the nominal pose.
//! -   **Simulation contract:** the [`Simulation`] trait is the seam
//!     environments are written against: state access, stepping with a
//!     control vector, body positions and external contact forces.
//! -   **Reduced backend:** [`ReducedSim`] implements the contract with a
//!     lightweight articulated integrator and spring-damper ground contact,
//!     so environments can be run and tested headless.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use physics::{ModelBuilder, ReducedSim, Simulation};
//!
//! let mut builder = ModelBuilder::new("ball");
//! let ball = builder.add_body("ball", 0, DVec3::new(0.0, 0.0, 2.0), 1.0);
//! builder.add_free_joint("root", ball).unwrap();
//! let mut sim = ReducedSim::new(builder.build().unwrap());
//!
//! sim.step(&[], 10).unwrap();
//! assert!(sim.body_com("ball").unwrap().z < 2.0);
//! ```

pub mod builder;
pub mod error;
pub mod kinematics;
pub mod model;
pub mod reduced;
pub mod simulation;
pub mod steps;

pub use builder::ModelBuilder;
pub use error::PhysicsError;
pub use model::{Actuator, Body, ContactParams, Joint, JointKind, Model, Stat, WORLD};
pub use reduced::{hinges_within_range, ReducedSim};
pub use simulation::{check_control_shape, check_state_shape, Simulation};
