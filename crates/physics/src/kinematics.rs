//! # Forward Kinematics
//!
//! World-frame poses of every body from generalized positions, and the
//! velocity of points rigidly attached to a body.

use glam::{DQuat, DVec3};

use crate::model::{JointKind, Model, WORLD};

/// Orientation stored in a free joint's `w x y z` slot.
#[must_use]
pub fn free_quat(qpos: &[f64], adr: usize) -> DQuat {
    DQuat::from_xyzw(qpos[adr + 4], qpos[adr + 5], qpos[adr + 6], qpos[adr + 3]).normalize()
}

/// Fill `xpos` and `xquat` with body frame poses.
///
/// Bodies are visited in index order, which the builder guarantees is
/// parent-first.
pub fn forward_kinematics(model: &Model, qpos: &[f64], xpos: &mut [DVec3], xquat: &mut [DQuat]) {
    xpos[WORLD] = DVec3::ZERO;
    xquat[WORLD] = DQuat::IDENTITY;
    for (b, body) in model.bodies.iter().enumerate().skip(1) {
        let parent_pos = xpos[body.parent];
        let parent_quat = xquat[body.parent];
        let mut pos = parent_pos + parent_quat * body.pos;
        let mut quat = parent_quat;
        if let Some(j) = body.joint {
            let joint = &model.joints[j];
            let a = joint.qpos_adr;
            match joint.kind {
                JointKind::Free => {
                    pos = DVec3::new(qpos[a], qpos[a + 1], qpos[a + 2]);
                    quat = free_quat(qpos, a);
                }
                JointKind::Hinge => {
                    quat = parent_quat * DQuat::from_axis_angle(joint.axis, qpos[a]);
                }
            }
        }
        xpos[b] = pos;
        xquat[b] = quat;
    }
}

/// World velocity of `point`, rigidly attached to `body`.
#[must_use]
pub fn point_velocity(
    model: &Model,
    qvel: &[f64],
    xpos: &[DVec3],
    xquat: &[DQuat],
    body: usize,
    point: DVec3,
) -> DVec3 {
    let mut vel = DVec3::ZERO;
    let mut b = body;
    while b != WORLD {
        if let Some(j) = model.bodies[b].joint {
            let joint = &model.joints[j];
            let d = joint.dof_adr;
            let lever = point - xpos[b];
            match joint.kind {
                JointKind::Free => {
                    let linear = DVec3::new(qvel[d], qvel[d + 1], qvel[d + 2]);
                    let angular = xquat[b] * DVec3::new(qvel[d + 3], qvel[d + 4], qvel[d + 5]);
                    vel += linear + angular.cross(lever);
                }
                JointKind::Hinge => {
                    vel += (xquat[b] * joint.axis).cross(lever) * qvel[d];
                }
            }
        }
        b = model.bodies[b].parent;
    }
    vel
}
