//! # Simulation Contract
//!
//! The [`Simulation`] trait is the seam between environments and physics
//! backends. Environments only read generalized state, body positions and
//! external contact forces, write state on reset, and advance time with a
//! control vector. Anything that honours this contract can drive an
//! environment.

use glam::DVec3;

use crate::model::Model;
use crate::PhysicsError;

/// Physics backend driven by an environment.
pub trait Simulation {
    /// The static model this simulation runs.
    fn model(&self) -> &Model;

    /// Generalized positions (length `nq`).
    fn qpos(&self) -> &[f64];

    /// Generalized velocities (length `nv`).
    fn qvel(&self) -> &[f64];

    /// External contact wrench per body as `[torque; force]`.
    fn cfrc_ext(&self) -> &[[f64; 6]];

    /// Simulated time in seconds.
    fn time(&self) -> f64;

    /// Restore the nominal pose, zero velocity and zero time.
    fn reset(&mut self);

    /// Overwrite the generalized state.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StateShape`] if the slice lengths do not match
    /// the model.
    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<(), PhysicsError>;

    /// Apply `ctrl` and advance `n_frames` sub-steps of `model().timestep`.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::ControlShape`] if `ctrl` does not have one
    /// entry per actuator.
    fn step(&mut self, ctrl: &[f64], n_frames: usize) -> Result<(), PhysicsError>;

    /// World-frame centre of mass of the named body.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] if no body has that name.
    fn body_com(&self, name: &str) -> Result<DVec3, PhysicsError>;

    /// Positions followed by velocities.
    fn state_vector(&self) -> Vec<f64> {
        self.qpos().iter().chain(self.qvel()).copied().collect()
    }
}

/// Check that a state matches the model dimensions.
///
/// # Errors
///
/// Returns [`PhysicsError::StateShape`] on mismatch.
pub fn check_state_shape(model: &Model, qpos: &[f64], qvel: &[f64]) -> Result<(), PhysicsError> {
    if qpos.len() != model.nq() || qvel.len() != model.nv() {
        return Err(PhysicsError::StateShape {
            expected_nq: model.nq(),
            expected_nv: model.nv(),
            nq: qpos.len(),
            nv: qvel.len(),
        });
    }
    Ok(())
}

/// Check that a control vector has one entry per actuator.
///
/// # Errors
///
/// Returns [`PhysicsError::ControlShape`] on mismatch.
pub fn check_control_shape(model: &Model, ctrl: &[f64]) -> Result<(), PhysicsError> {
    if ctrl.len() != model.nu() {
        return Err(PhysicsError::ControlShape {
            expected: model.nu(),
            actual: ctrl.len(),
        });
    }
    Ok(())
}
