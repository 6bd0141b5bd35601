use thiserror::Error;

/// Errors raised by a [`crate::Simulation`] backend or while building a
/// [`crate::Model`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("state shape mismatch: expected qpos {expected_nq} / qvel {expected_nv}, got {nq} / {nv}")]
    StateShape {
        expected_nq: usize,
        expected_nv: usize,
        nq: usize,
        nv: usize,
    },
    #[error("control shape mismatch: expected {expected}, got {actual}")]
    ControlShape { expected: usize, actual: usize },
    #[error("unknown body `{0}`")]
    UnknownBody(String),
    #[error("invalid model: {0}")]
    InvalidModel(String),
}
