//! Render modes, cameras and viewers.
//!
//! Rasterising frames is left to external viewers; the crate only defines
//! the hook an environment calls and a headless viewer that reports the
//! pose of the floating base through `tracing`.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use physics::Simulation;
use serde::{Deserialize, Serialize};

use crate::EnvError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Interactive display, refreshed on every step and reset.
    Human,
    RgbArray,
    DepthArray,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [RenderMode::Human, RenderMode::RgbArray, RenderMode::DepthArray];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RenderMode::Human => "human",
            RenderMode::RgbArray => "rgb_array",
            RenderMode::DepthArray => "depth_array",
        }
    }

    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, RenderMode::Human)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| EnvError::RenderMode(s.to_string()))
    }
}

/// Static rendering capabilities of an environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metadata {
    pub render_modes: &'static [RenderMode],
    /// Frames per second implied by the environment's step duration.
    pub render_fps: u32,
}

/// Free camera looking at a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub distance: f64,
    pub lookat: DVec3,
    /// Degrees.
    pub elevation: f64,
    /// Degrees.
    pub azimuth: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 4.0,
            lookat: DVec3::ZERO,
            elevation: -45.0,
            azimuth: 90.0,
        }
    }
}

/// Something that can present a simulation.
pub trait Viewer {
    fn camera(&self) -> &Camera;

    fn camera_mut(&mut self) -> &mut Camera;

    /// Present the current simulation state.
    ///
    /// # Errors
    ///
    /// Implementations report their own display failures.
    fn render(&mut self, sim: &dyn Simulation, mode: RenderMode) -> Result<(), EnvError>;
}

/// Headless viewer that logs the floating base pose each frame.
#[derive(Clone, Debug, Default)]
pub struct TraceViewer {
    camera: Camera,
    frames: u64,
}

impl TraceViewer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Viewer for TraceViewer {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn render(&mut self, sim: &dyn Simulation, mode: RenderMode) -> Result<(), EnvError> {
        self.frames += 1;
        let model = sim.model();
        let root = model.root_joint().map(|j| model.bodies[j.body].name.as_str());
        match root {
            Some(name) => {
                let pos = sim.body_com(name)?;
                tracing::info!(
                    frame = self.frames,
                    %mode,
                    time = sim.time(),
                    x = pos.x,
                    y = pos.y,
                    z = pos.z,
                    distance = self.camera.distance,
                    "{name}"
                );
            }
            None => tracing::info!(frame = self.frames, %mode, time = sim.time(), "frame"),
        }
        Ok(())
    }
}
