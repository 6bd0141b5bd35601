#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use glam::DVec3;
use phenotype::Phenotype;
use physics::{check_control_shape, check_state_shape, Model, PhysicsError, Simulation};
use rl::{Camera, EnvError, RenderMode, Viewer};

pub fn ant_model() -> Model {
    Phenotype::ant().unwrap().into_model().unwrap()
}

/// Backend whose next step outcome is chosen by the test.
pub struct ScriptedSim {
    model: Model,
    qpos: Vec<f64>,
    qvel: Vec<f64>,
    cfrc_ext: Vec<[f64; 6]>,
    time: f64,
    /// Torso x displacement per sub-step.
    pub advance_x: f64,
    /// Torso height after the next step.
    pub next_z: Option<f64>,
    /// Velocity written after the next step.
    pub next_qvel: Option<Vec<f64>>,
    /// Contact wrenches after the next step.
    pub next_cfrc: Vec<[f64; 6]>,
    pub steps: usize,
}

impl ScriptedSim {
    pub fn new(model: Model) -> Self {
        let nbody = model.nbody();
        Self {
            qpos: model.qpos0.clone(),
            qvel: vec![0.0; model.nv()],
            cfrc_ext: vec![[0.0; 6]; nbody],
            time: 0.0,
            advance_x: 0.0,
            next_z: None,
            next_qvel: None,
            next_cfrc: vec![[0.0; 6]; nbody],
            steps: 0,
            model,
        }
    }

    pub fn ant() -> Self {
        Self::new(ant_model())
    }
}

impl Simulation for ScriptedSim {
    fn model(&self) -> &Model {
        &self.model
    }

    fn qpos(&self) -> &[f64] {
        &self.qpos
    }

    fn qvel(&self) -> &[f64] {
        &self.qvel
    }

    fn cfrc_ext(&self) -> &[[f64; 6]] {
        &self.cfrc_ext
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn reset(&mut self) {
        self.qpos.clone_from(&self.model.qpos0);
        self.qvel.fill(0.0);
        self.time = 0.0;
    }

    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<(), PhysicsError> {
        check_state_shape(&self.model, qpos, qvel)?;
        self.qpos.copy_from_slice(qpos);
        self.qvel.copy_from_slice(qvel);
        Ok(())
    }

    fn step(&mut self, ctrl: &[f64], n_frames: usize) -> Result<(), PhysicsError> {
        check_control_shape(&self.model, ctrl)?;
        self.steps += 1;
        self.qpos[0] += self.advance_x * n_frames as f64;
        if let Some(z) = self.next_z {
            self.qpos[2] = z;
        }
        if let Some(qvel) = &self.next_qvel {
            self.qvel.clone_from(qvel);
        }
        self.cfrc_ext.clone_from(&self.next_cfrc);
        self.time += self.model.timestep * n_frames as f64;
        Ok(())
    }

    fn body_com(&self, name: &str) -> Result<DVec3, PhysicsError> {
        if name == "torso" {
            Ok(DVec3::new(self.qpos[0], self.qpos[1], self.qpos[2]))
        } else {
            Err(PhysicsError::UnknownBody(name.to_string()))
        }
    }
}

/// Viewer that counts frames through a shared handle.
pub struct CountingViewer {
    pub camera: Camera,
    pub frames: Rc<Cell<u32>>,
    pub distance_seen: Rc<Cell<f64>>,
}

impl CountingViewer {
    pub fn new() -> (Self, Rc<Cell<u32>>, Rc<Cell<f64>>) {
        let frames = Rc::new(Cell::new(0));
        let distance = Rc::new(Cell::new(0.0));
        (
            Self {
                camera: Camera::default(),
                frames: Rc::clone(&frames),
                distance_seen: Rc::clone(&distance),
            },
            frames,
            distance,
        )
    }
}

impl Viewer for CountingViewer {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn render(&mut self, _sim: &dyn Simulation, _mode: RenderMode) -> Result<(), EnvError> {
        self.frames.set(self.frames.get() + 1);
        self.distance_seen.set(self.camera.distance);
        Ok(())
    }
}
