//! Ground contact against the plane `z = 0`.
//!
//! Every limb tip below the plane gets a spring-damper normal force and a
//! viscous tangential force capped by Coulomb friction. The resulting wrench
//! is recorded per body in `cfrc_ext`.

use glam::{DQuat, DVec3};

use crate::kinematics::point_velocity;
use crate::model::Model;

/// Resolve ground contacts and return the net contact force.
pub fn ground_contacts(
    model: &Model,
    qvel: &[f64],
    xpos: &[DVec3],
    xquat: &[DQuat],
    cfrc_ext: &mut [[f64; 6]],
) -> DVec3 {
    let params = model.contact;
    let mut total = DVec3::ZERO;
    cfrc_ext.fill([0.0; 6]);
    for (b, body) in model.bodies.iter().enumerate() {
        let Some(tip_local) = body.tip else { continue };
        let tip = xpos[b] + xquat[b] * tip_local;
        let depth = -tip.z;
        if depth.is_nan() || depth <= 0.0 {
            continue;
        }
        let vel = point_velocity(model, qvel, xpos, xquat, b, tip);
        let normal = (params.stiffness * depth - params.damping * vel.z).max(0.0);
        let mut tangential = DVec3::new(vel.x, vel.y, 0.0) * -params.tangential_damping;
        let limit = params.friction * normal;
        let magnitude = tangential.length();
        if magnitude > limit {
            tangential *= limit / magnitude;
        }
        let force = tangential + DVec3::Z * normal;
        let torque = (tip - xpos[b]).cross(force);
        cfrc_ext[b] = [torque.x, torque.y, torque.z, force.x, force.y, force.z];
        total += force;
    }
    total
}
