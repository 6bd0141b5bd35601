#![deny(clippy::all, clippy::pedantic)]
//! JSON description of simulated creatures.
//!
//! A [`Phenotype`] lists bodies by id with their parent, offset, mass,
//! optional ground-contact tip and optional joint, plus the actuators that
//! drive named joints. Hinge ranges are written in degrees. The `ant`
//! quadruped ships with the crate.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use glam::DVec3;
use physics::{ContactParams, Model, ModelBuilder, WORLD};
use serde::Deserialize;

/// The bundled quadruped.
pub const ANT_JSON: &str = include_str!("../assets/ant.json");

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Phenotype {
    pub name: String,
    #[serde(default = "default_timestep")]
    pub timestep: f64,
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 3],
    #[serde(default)]
    pub extent: Option<f64>,
    #[serde(default)]
    pub contact: Option<ContactDef>,
    #[serde(default)]
    pub joint_defaults: JointDefaults,
    pub bodies: Vec<BodyDef>,
    #[serde(default)]
    pub actuators: Vec<ActuatorDef>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BodyDef {
    pub id: String,
    /// Parent body id; the world when absent.
    #[serde(default)]
    pub parent: Option<String>,
    pub pos: [f64; 3],
    pub mass: f64,
    #[serde(default)]
    pub tip: Option<[f64; 3]>,
    #[serde(default)]
    pub joint: Option<JointDef>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum JointDef {
    #[serde(rename = "free")]
    Free { name: String },
    #[serde(rename = "hinge")]
    Hinge {
        name: String,
        axis: [f64; 3],
        /// Degrees.
        #[serde(default)]
        range: Option<[f64; 2]>,
        #[serde(default)]
        damping: Option<f64>,
        #[serde(default)]
        armature: Option<f64>,
    },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ActuatorDef {
    /// Defaults to the joint name.
    #[serde(default)]
    pub name: Option<String>,
    pub joint: String,
    pub gear: f64,
    pub ctrl_range: [f64; 2],
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct JointDefaults {
    pub damping: f64,
    pub armature: f64,
}

impl Default for JointDefaults {
    fn default() -> Self {
        Self { damping: 1.0, armature: 1.0 }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct ContactDef {
    pub stiffness: f64,
    pub damping: f64,
    pub tangential_damping: f64,
    pub friction: f64,
    pub angular_damping: f64,
}

impl From<ContactDef> for ContactParams {
    fn from(c: ContactDef) -> Self {
        Self {
            stiffness: c.stiffness,
            damping: c.damping,
            tangential_damping: c.tangential_damping,
            friction: c.friction,
            angular_damping: c.angular_damping,
        }
    }
}

fn default_timestep() -> f64 {
    0.01
}

fn default_gravity() -> [f64; 3] {
    [0.0, 0.0, -9.81]
}

fn vec3(v: [f64; 3]) -> DVec3 {
    DVec3::from_array(v)
}

impl FromStr for Phenotype {
    type Err = anyhow::Error;

    fn from_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Phenotype {
    /// The bundled `ant` quadruped.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled asset is malformed.
    pub fn ant() -> Result<Self> {
        ANT_JSON.parse().context("bundled ant model")
    }

    /// Read a phenotype from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading phenotype {}", path.display()))?;
        json.parse()
            .with_context(|| format!("parsing phenotype {}", path.display()))
    }

    /// Resolve names and build the physics model.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown parent or joint references, duplicate
    /// ids, or anything the model builder rejects.
    pub fn into_model(self) -> Result<Model> {
        let mut builder = ModelBuilder::new(self.name);
        builder.timestep(self.timestep).gravity(vec3(self.gravity));
        if let Some(contact) = self.contact {
            builder.contact(contact.into());
        }
        if let Some(extent) = self.extent {
            builder.extent(extent);
        }

        let mut bodies: HashMap<String, usize> = HashMap::new();
        let mut joints: HashMap<String, usize> = HashMap::new();
        for body in self.bodies {
            let parent = match &body.parent {
                None => WORLD,
                Some(id) => *bodies
                    .get(id)
                    .ok_or_else(|| anyhow!("unknown body {id}"))?,
            };
            if bodies.contains_key(&body.id) {
                return Err(anyhow!("duplicate body {}", body.id));
            }
            let idx = builder.add_body(body.id.clone(), parent, vec3(body.pos), body.mass);
            bodies.insert(body.id, idx);
            if let Some(tip) = body.tip {
                builder.set_tip(idx, vec3(tip))?;
            }
            match body.joint {
                None => {}
                Some(JointDef::Free { name }) => {
                    let j = builder.add_free_joint(name.clone(), idx)?;
                    joints.insert(name, j);
                }
                Some(JointDef::Hinge { name, axis, range, damping, armature }) => {
                    let j = builder.add_hinge_with(
                        name.clone(),
                        idx,
                        vec3(axis),
                        range.map(|[lo, hi]| [lo.to_radians(), hi.to_radians()]),
                        damping.unwrap_or(self.joint_defaults.damping),
                        armature.unwrap_or(self.joint_defaults.armature),
                    )?;
                    joints.insert(name, j);
                }
            }
        }

        for actuator in self.actuators {
            let joint = *joints
                .get(&actuator.joint)
                .ok_or_else(|| anyhow!("unknown joint {}", actuator.joint))?;
            let name = actuator.name.unwrap_or_else(|| actuator.joint.clone());
            builder.add_actuator(name, joint, actuator.gear, actuator.ctrl_range)?;
        }

        Ok(builder.build()?)
    }
}
