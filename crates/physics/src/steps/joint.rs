//! Actuated hinge dynamics.

use glam::DVec3;

use crate::model::{JointKind, Model, WORLD};

/// Effective rotational inertia of every hinge dof.
///
/// Each hinge sees its armature plus the point masses of its subtree at
/// their rest-pose distance, with limb masses lumped at the limb midpoint.
#[must_use]
pub fn hinge_inertia(model: &Model) -> Vec<f64> {
    let mut inertia = vec![0.0; model.nv()];
    for joint in model.joints.iter().filter(|j| j.kind == JointKind::Hinge) {
        let mut total = joint.armature;
        for (d, body) in model.bodies.iter().enumerate().skip(1) {
            if !model.is_descendant(d, joint.body) {
                continue;
            }
            let mut offset = body.tip.map_or(DVec3::ZERO, |t| t * 0.5);
            let mut b = d;
            while b != joint.body && b != WORLD {
                offset += model.bodies[b].pos;
                b = model.bodies[b].parent;
            }
            total += body.mass * offset.length_squared();
        }
        inertia[joint.dof_adr] = total;
    }
    inertia
}

/// Write hinge accelerations from motor torque and passive damping.
///
/// Controls are clamped to each actuator's range before use.
pub fn hinge_accelerations(model: &Model, ctrl: &[f64], qvel: &[f64], inertia: &[f64], qacc: &mut [f64]) {
    let mut qfrc = vec![0.0; model.nv()];
    for (actuator, &u) in model.actuators.iter().zip(ctrl) {
        let [lo, hi] = actuator.ctrl_range;
        let dof = model.joints[actuator.joint].dof_adr;
        qfrc[dof] += actuator.gear * u.clamp(lo, hi);
    }
    for joint in model.joints.iter().filter(|j| j.kind == JointKind::Hinge) {
        let d = joint.dof_adr;
        let passive = -joint.damping * qvel[d];
        qacc[d] = if inertia[d] > 0.0 {
            (qfrc[d] + passive) / inertia[d]
        } else {
            0.0
        };
    }
}
