use physics::PhysicsError;
use thiserror::Error;

/// Errors surfaced by environments.
///
/// Numerical blow-up of the simulation is not an error; it terminates the
/// episode instead.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error("failed to load model: {0:#}")]
    Model(anyhow::Error),
    #[error("action has {actual} components, expected {expected}")]
    ActionShape { expected: usize, actual: usize },
    #[error("model yields {actual} observation components, expected {expected}")]
    ObservationShape { expected: usize, actual: usize },
    #[error("render_fps is {declared} but 1/dt is {expected}")]
    Metadata { declared: u32, expected: f64 },
    #[error("unsupported render mode `{0}`")]
    RenderMode(String),
    #[error("invalid environment arguments: {0}")]
    Args(#[from] serde_json::Error),
}
