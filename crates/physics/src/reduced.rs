//! # Reduced-Order Backend
//!
//! [`ReducedSim`] is a small articulated integrator implementing
//! [`Simulation`] on the CPU. Hinges are driven by their motors against
//! damping and a lumped inertia; limb tips touching the ground push the
//! floating base through spring-damper contacts. Contact torques on the
//! base and reaction torques on the hinges are not resolved, so the base
//! stays near its initial attitude unless given angular velocity.
//!
//! It exists so that environments run headless and deterministically
//! without a native engine. It is not a contact-accurate simulator.

use glam::{DQuat, DVec3};

use crate::kinematics::forward_kinematics;
use crate::model::{JointKind, Model};
use crate::simulation::{check_control_shape, check_state_shape, Simulation};
use crate::steps::{contact::ground_contacts, integration::integrate, joint};
use crate::PhysicsError;

/// CPU reference implementation of [`Simulation`].
#[derive(Clone, Debug)]
pub struct ReducedSim {
    model: Model,
    qpos: Vec<f64>,
    qvel: Vec<f64>,
    qacc: Vec<f64>,
    ctrl: Vec<f64>,
    cfrc_ext: Vec<[f64; 6]>,
    xpos: Vec<DVec3>,
    xquat: Vec<DQuat>,
    inertia: Vec<f64>,
    time: f64,
}

impl ReducedSim {
    /// Create a simulation at the model's nominal pose.
    #[must_use]
    pub fn new(model: Model) -> Self {
        let nbody = model.nbody();
        let inertia = joint::hinge_inertia(&model);
        let mut sim = Self {
            qpos: model.qpos0.clone(),
            qvel: vec![0.0; model.nv()],
            qacc: vec![0.0; model.nv()],
            ctrl: vec![0.0; model.nu()],
            cfrc_ext: vec![[0.0; 6]; nbody],
            xpos: vec![DVec3::ZERO; nbody],
            xquat: vec![DQuat::IDENTITY; nbody],
            inertia,
            time: 0.0,
            model,
        };
        sim.forward();
        sim
    }

    fn forward(&mut self) {
        forward_kinematics(&self.model, &self.qpos, &mut self.xpos, &mut self.xquat);
    }

    fn substep(&mut self) {
        let dt = self.model.timestep;
        self.forward();
        self.qacc.fill(0.0);
        joint::hinge_accelerations(&self.model, &self.ctrl, &self.qvel, &self.inertia, &mut self.qacc);
        let contact_force = ground_contacts(
            &self.model,
            &self.qvel,
            &self.xpos,
            &self.xquat,
            &mut self.cfrc_ext,
        );

        if let Some(root) = self.model.root_joint() {
            let d = root.dof_adr;
            let mass = self.model.total_mass();
            let linear = if mass > 0.0 {
                self.model.gravity + contact_force / mass
            } else {
                self.model.gravity
            };
            self.qacc[d..d + 3].copy_from_slice(&linear.to_array());
            let damping = self.model.contact.angular_damping;
            for k in 3..6 {
                self.qacc[d + k] = -damping * self.qvel[d + k];
            }
        }

        integrate(&self.model, &mut self.qpos, &mut self.qvel, &self.qacc, dt);
        self.time += dt;
    }
}

impl Simulation for ReducedSim {
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
        self.qacc.fill(0.0);
        self.ctrl.fill(0.0);
        self.cfrc_ext.fill([0.0; 6]);
        self.time = 0.0;
        self.forward();
    }

    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<(), PhysicsError> {
        check_state_shape(&self.model, qpos, qvel)?;
        self.qpos.copy_from_slice(qpos);
        self.qvel.copy_from_slice(qvel);
        self.forward();
        Ok(())
    }

    fn step(&mut self, ctrl: &[f64], n_frames: usize) -> Result<(), PhysicsError> {
        check_control_shape(&self.model, ctrl)?;
        self.ctrl.copy_from_slice(ctrl);
        for _ in 0..n_frames {
            self.substep();
        }
        self.forward();
        tracing::trace!(time = self.time, n_frames, "reduced sim advanced");
        Ok(())
    }

    fn body_com(&self, name: &str) -> Result<DVec3, PhysicsError> {
        let body = self
            .model
            .body_id(name)
            .ok_or_else(|| PhysicsError::UnknownBody(name.to_string()))?;
        Ok(self.xpos[body])
    }
}

/// Whether every limited hinge sits inside its range.
#[must_use]
pub fn hinges_within_range(model: &Model, qpos: &[f64]) -> bool {
    model
        .joints
        .iter()
        .filter(|j| j.kind == JointKind::Hinge)
        .all(|j| match j.range {
            Some([lo, hi]) => (lo..=hi).contains(&qpos[j.qpos_adr]),
            None => true,
        })
}
