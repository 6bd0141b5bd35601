//! Semi-implicit Euler integration of generalized coordinates.

use glam::DVec3;

use crate::kinematics::free_quat;
use crate::model::{JointKind, Model};

/// Advance velocities by `qacc`, then positions by the new velocities.
///
/// Hinges are hard-limited: a joint that reaches the end of its range is
/// clamped there and loses the velocity component pushing outward.
pub fn integrate(model: &Model, qpos: &mut [f64], qvel: &mut [f64], qacc: &[f64], dt: f64) {
    for (v, a) in qvel.iter_mut().zip(qacc) {
        *v += a * dt;
    }
    for joint in &model.joints {
        let (a, d) = (joint.qpos_adr, joint.dof_adr);
        match joint.kind {
            JointKind::Hinge => {
                qpos[a] += qvel[d] * dt;
                if let Some([lo, hi]) = joint.range {
                    if qpos[a] < lo {
                        qpos[a] = lo;
                        qvel[d] = qvel[d].max(0.0);
                    } else if qpos[a] > hi {
                        qpos[a] = hi;
                        qvel[d] = qvel[d].min(0.0);
                    }
                }
            }
            JointKind::Free => {
                for k in 0..3 {
                    qpos[a + k] += qvel[d + k] * dt;
                }
                let omega = DVec3::new(qvel[d + 3], qvel[d + 4], qvel[d + 5]);
                let quat = (free_quat(qpos, a) * glam::DQuat::from_scaled_axis(omega * dt)).normalize();
                qpos[a + 3] = quat.w;
                qpos[a + 4] = quat.x;
                qpos[a + 5] = quat.y;
                qpos[a + 6] = quat.z;
            }
        }
    }
}
