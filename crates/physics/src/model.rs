//! # Model Description
//!
//! Static description of an articulated body: the body tree, the joints
//! that give it degrees of freedom and the actuators that drive them.
//! A [`Model`] is immutable once built; dynamic state lives in the
//! simulation backend.
//!
//! Generalized coordinates follow the usual articulated-body layout:
//! a free joint contributes 7 position coordinates (`x y z` followed by a
//! `w x y z` quaternion) and 6 velocity coordinates (linear world-frame
//! velocity followed by body-frame angular velocity). A hinge contributes
//! one of each.

use glam::DVec3;

/// Index of the implicit world body.
pub const WORLD: usize = 0;

/// Kind of degree of freedom a joint adds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointKind {
    /// Six degrees of freedom relative to the world.
    Free,
    /// Rotation about a single body-frame axis.
    Hinge,
}

impl JointKind {
    /// Number of position coordinates used by this joint.
    #[must_use]
    pub const fn nq(self) -> usize {
        match self {
            JointKind::Free => 7,
            JointKind::Hinge => 1,
        }
    }

    /// Number of velocity coordinates used by this joint.
    #[must_use]
    pub const fn nv(self) -> usize {
        match self {
            JointKind::Free => 6,
            JointKind::Hinge => 1,
        }
    }
}

/// A rigid body in the kinematic tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub name: String,
    /// Parent body index. Parents always precede their children.
    pub parent: usize,
    /// Offset of the body frame in the parent frame.
    pub pos: DVec3,
    pub mass: f64,
    /// End point of the body's limb in the body frame. Only bodies with a
    /// tip can touch the ground.
    pub tip: Option<DVec3>,
    pub joint: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
    pub name: String,
    pub kind: JointKind,
    pub body: usize,
    /// Unit rotation axis in the body frame (unused for free joints).
    pub axis: DVec3,
    /// Position limits in radians.
    pub range: Option<[f64; 2]>,
    pub damping: f64,
    pub armature: f64,
    pub qpos_adr: usize,
    pub dof_adr: usize,
}

/// A motor applying `gear * ctrl` as generalized force on a hinge.
#[derive(Clone, Debug, PartialEq)]
pub struct Actuator {
    pub name: String,
    pub joint: usize,
    pub gear: f64,
    pub ctrl_range: [f64; 2],
}

/// Ground contact parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactParams {
    /// Normal spring stiffness per contact point (N/m).
    pub stiffness: f64,
    /// Normal damping per contact point (N·s/m).
    pub damping: f64,
    /// Viscous tangential coefficient (N·s/m), capped by Coulomb friction.
    pub tangential_damping: f64,
    pub friction: f64,
    /// Angular velocity damping applied to free bodies (1/s).
    pub angular_damping: f64,
}

impl Default for ContactParams {
    fn default() -> Self {
        Self {
            stiffness: 1000.0,
            damping: 15.0,
            tangential_damping: 20.0,
            friction: 1.0,
            angular_damping: 5.0,
        }
    }
}

/// Spatial statistics of the model in its rest pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stat {
    /// Characteristic size of the model.
    pub extent: f64,
    pub center: DVec3,
}

/// Immutable description of an articulated system.
///
/// Built with [`crate::ModelBuilder`].
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub name: String,
    pub timestep: f64,
    pub gravity: DVec3,
    pub contact: ContactParams,
    pub bodies: Vec<Body>,
    pub joints: Vec<Joint>,
    pub actuators: Vec<Actuator>,
    /// Nominal generalized positions.
    pub qpos0: Vec<f64>,
    pub stat: Stat,
    pub(crate) nq: usize,
    pub(crate) nv: usize,
}

impl Model {
    #[must_use]
    pub fn nq(&self) -> usize {
        self.nq
    }

    #[must_use]
    pub fn nv(&self) -> usize {
        self.nv
    }

    #[must_use]
    pub fn nu(&self) -> usize {
        self.actuators.len()
    }

    /// Number of bodies including the world body.
    #[must_use]
    pub fn nbody(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn body_id(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    #[must_use]
    pub fn joint_id(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j.name == name)
    }

    /// Sum of all body masses.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// The first free joint, if the model has a floating base.
    #[must_use]
    pub fn root_joint(&self) -> Option<&Joint> {
        self.joints.iter().find(|j| j.kind == JointKind::Free)
    }

    /// Lower and upper control bounds, one entry per actuator.
    #[must_use]
    pub fn ctrl_bounds(&self) -> (Vec<f64>, Vec<f64>) {
        self.actuators
            .iter()
            .map(|a| (a.ctrl_range[0], a.ctrl_range[1]))
            .unzip()
    }

    /// Whether `body` lies in the subtree rooted at `ancestor`.
    #[must_use]
    pub fn is_descendant(&self, mut body: usize, ancestor: usize) -> bool {
        loop {
            if body == ancestor {
                return true;
            }
            if body == WORLD {
                return false;
            }
            body = self.bodies[body].parent;
        }
    }
}
