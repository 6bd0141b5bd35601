//! # Model Builder
//!
//! Incremental construction of a [`Model`]. The builder assigns joint
//! addresses in insertion order, derives the nominal pose and the rest-pose
//! statistics, and validates the tree before handing out a model.

use glam::DVec3;

use crate::model::{Actuator, Body, ContactParams, Joint, JointKind, Model, Stat, WORLD};
use crate::PhysicsError;

/// Builder for [`Model`].
///
/// ```rust
/// use glam::DVec3;
/// use physics::ModelBuilder;
///
/// let mut builder = ModelBuilder::new("pendulum");
/// let arm = builder.add_body("arm", 0, DVec3::new(0.0, 0.0, 1.0), 1.0);
/// let hinge = builder.add_hinge(
///     "swing",
///     arm,
///     DVec3::Y,
///     None,
/// ).unwrap();
/// builder.add_actuator("motor", hinge, 10.0, [-1.0, 1.0]).unwrap();
/// let model = builder.build().unwrap();
/// assert_eq!(model.nq(), 1);
/// assert_eq!(model.nu(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    name: String,
    timestep: f64,
    gravity: DVec3,
    contact: ContactParams,
    extent: Option<f64>,
    bodies: Vec<Body>,
    joints: Vec<Joint>,
    actuators: Vec<Actuator>,
}

impl ModelBuilder {
    /// Create a builder containing only the world body.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestep: 0.01,
            gravity: DVec3::new(0.0, 0.0, -9.81),
            contact: ContactParams::default(),
            extent: None,
            bodies: vec![Body {
                name: "world".to_string(),
                parent: WORLD,
                pos: DVec3::ZERO,
                mass: 0.0,
                tip: None,
                joint: None,
            }],
            joints: Vec::new(),
            actuators: Vec::new(),
        }
    }

    pub fn timestep(&mut self, timestep: f64) -> &mut Self {
        self.timestep = timestep;
        self
    }

    pub fn gravity(&mut self, gravity: DVec3) -> &mut Self {
        self.gravity = gravity;
        self
    }

    pub fn contact(&mut self, contact: ContactParams) -> &mut Self {
        self.contact = contact;
        self
    }

    /// Override the extent derived from the rest pose.
    pub fn extent(&mut self, extent: f64) -> &mut Self {
        self.extent = Some(extent);
        self
    }

    /// Add a body under `parent` and return its index.
    pub fn add_body(&mut self, name: impl Into<String>, parent: usize, pos: DVec3, mass: f64) -> usize {
        self.bodies.push(Body {
            name: name.into(),
            parent,
            pos,
            mass,
            tip: None,
            joint: None,
        });
        self.bodies.len() - 1
    }

    /// Give `body` a limb end point that can touch the ground.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidModel`] when `body` does not exist.
    pub fn set_tip(&mut self, body: usize, tip: DVec3) -> Result<(), PhysicsError> {
        let body = self.body_mut(body)?;
        body.tip = Some(tip);
        Ok(())
    }

    /// Attach a free joint to `body`, making it a floating base.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidModel`] when the body is unknown,
    /// already jointed, or not a direct child of the world.
    pub fn add_free_joint(&mut self, name: impl Into<String>, body: usize) -> Result<usize, PhysicsError> {
        if self.bodies.get(body).map(|b| b.parent) != Some(WORLD) || body == WORLD {
            return Err(PhysicsError::InvalidModel(
                "free joints must attach to a child of the world".to_string(),
            ));
        }
        self.push_joint(name.into(), JointKind::Free, body, DVec3::ZERO, None, 0.0, 0.0)
    }

    /// Attach a hinge with unit damping and armature to `body`.
    ///
    /// # Errors
    ///
    /// See [`ModelBuilder::add_hinge_with`].
    pub fn add_hinge(
        &mut self,
        name: impl Into<String>,
        body: usize,
        axis: DVec3,
        range: Option<[f64; 2]>,
    ) -> Result<usize, PhysicsError> {
        self.add_hinge_with(name, body, axis, range, 1.0, 1.0)
    }

    /// Attach a hinge to `body`. `range` is in radians.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidModel`] for a zero axis, an inverted
    /// range, negative damping/armature, or an unknown or already jointed body.
    pub fn add_hinge_with(
        &mut self,
        name: impl Into<String>,
        body: usize,
        axis: DVec3,
        range: Option<[f64; 2]>,
        damping: f64,
        armature: f64,
    ) -> Result<usize, PhysicsError> {
        let name = name.into();
        let axis = axis.try_normalize().ok_or_else(|| {
            PhysicsError::InvalidModel(format!("hinge `{name}` has a zero axis"))
        })?;
        if let Some([lo, hi]) = range {
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(PhysicsError::InvalidModel(format!(
                    "hinge `{name}` has inverted range [{lo}, {hi}]"
                )));
            }
        }
        if damping < 0.0 || armature < 0.0 {
            return Err(PhysicsError::InvalidModel(format!(
                "hinge `{name}` has negative damping or armature"
            )));
        }
        self.push_joint(name, JointKind::Hinge, body, axis, range, damping, armature)
    }

    /// Add a motor driving a hinge.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidModel`] when the joint is unknown or
    /// not a hinge, or the control range is inverted.
    pub fn add_actuator(
        &mut self,
        name: impl Into<String>,
        joint: usize,
        gear: f64,
        ctrl_range: [f64; 2],
    ) -> Result<usize, PhysicsError> {
        let name = name.into();
        match self.joints.get(joint) {
            Some(j) if j.kind == JointKind::Hinge => {}
            _ => {
                return Err(PhysicsError::InvalidModel(format!(
                    "actuator `{name}` must drive a hinge"
                )))
            }
        }
        let [lo, hi] = ctrl_range;
        if lo.is_nan() || hi.is_nan() || lo > hi || !gear.is_finite() {
            return Err(PhysicsError::InvalidModel(format!(
                "actuator `{name}` has an invalid gear or control range"
            )));
        }
        self.actuators.push(Actuator { name, joint, gear, ctrl_range });
        Ok(self.actuators.len() - 1)
    }

    /// Validate the tree and produce the model.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidModel`] for a non-positive timestep,
    /// a parent that does not precede its child, or duplicate body names.
    pub fn build(self) -> Result<Model, PhysicsError> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(PhysicsError::InvalidModel(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        for (i, body) in self.bodies.iter().enumerate().skip(1) {
            if body.parent >= i {
                return Err(PhysicsError::InvalidModel(format!(
                    "body `{}` must come after its parent",
                    body.name
                )));
            }
            if self.bodies[..i].iter().any(|b| b.name == body.name) {
                return Err(PhysicsError::InvalidModel(format!(
                    "duplicate body name `{}`",
                    body.name
                )));
            }
        }

        let mut joints = self.joints;
        let (mut nq, mut nv) = (0, 0);
        let mut qpos0 = Vec::new();
        for joint in &mut joints {
            joint.qpos_adr = nq;
            joint.dof_adr = nv;
            nq += joint.kind.nq();
            nv += joint.kind.nv();
            match joint.kind {
                JointKind::Free => {
                    let p = self.bodies[joint.body].pos;
                    qpos0.extend_from_slice(&[p.x, p.y, p.z, 1.0, 0.0, 0.0, 0.0]);
                }
                JointKind::Hinge => qpos0.push(0.0),
            }
        }

        let mut stat = rest_stat(&self.bodies);
        if let Some(extent) = self.extent {
            stat.extent = extent;
        }

        Ok(Model {
            name: self.name,
            timestep: self.timestep,
            gravity: self.gravity,
            contact: self.contact,
            bodies: self.bodies,
            joints,
            actuators: self.actuators,
            qpos0,
            stat,
            nq,
            nv,
        })
    }

    fn body_mut(&mut self, body: usize) -> Result<&mut Body, PhysicsError> {
        match self.bodies.get_mut(body) {
            Some(b) if body != WORLD => Ok(b),
            _ => Err(PhysicsError::InvalidModel(format!("unknown body index {body}"))),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_joint(
        &mut self,
        name: String,
        kind: JointKind,
        body: usize,
        axis: DVec3,
        range: Option<[f64; 2]>,
        damping: f64,
        armature: f64,
    ) -> Result<usize, PhysicsError> {
        let index = self.joints.len();
        let target = self.body_mut(body)?;
        if target.joint.is_some() {
            return Err(PhysicsError::InvalidModel(format!(
                "body `{}` already has a joint",
                target.name
            )));
        }
        target.joint = Some(index);
        self.joints.push(Joint {
            name,
            kind,
            body,
            axis,
            range,
            damping,
            armature,
            qpos_adr: 0,
            dof_adr: 0,
        });
        Ok(index)
    }
}

/// Bounding statistics of body origins and limb tips with every joint at
/// its zero position.
fn rest_stat(bodies: &[Body]) -> Stat {
    let mut origins = vec![DVec3::ZERO; bodies.len()];
    let mut points = Vec::with_capacity(bodies.len() * 2);
    for (i, body) in bodies.iter().enumerate().skip(1) {
        origins[i] = origins[body.parent] + body.pos;
        points.push(origins[i]);
        if let Some(tip) = body.tip {
            points.push(origins[i] + tip);
        }
    }
    if points.is_empty() {
        return Stat { extent: 1.0, center: DVec3::ZERO };
    }
    let (min, max) = points
        .iter()
        .fold((points[0], points[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    let center = (min + max) * 0.5;
    let radius = points
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0_f64, f64::max);
    let extent = if radius > 0.0 { 2.0 * radius } else { 1.0 };
    Stat { extent, center }
}
