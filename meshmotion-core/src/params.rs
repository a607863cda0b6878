//! Scene parameters with serde support.
//!
//! Every field has a default, so a configuration file only needs the values
//! it changes.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::car::{HeadingPolicy, CANONICAL_WHEEL_OFFSETS, DEFAULT_SPIN_SPEED};
use crate::error::GeometryError;
use crate::geometry::WheelShape;
use crate::transform::Axis;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    pub car: CarParams,
    pub wheels: WheelParams,
    pub body: BodyParams,
}

impl SceneParams {
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.wheels.shape.validate()?;
        for (name, value) in [
            ("body width", self.body.width),
            ("body height", self.body.height),
            ("body depth", self.body.depth),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarParams {
    /// Units travelled per second
    pub displacement: Vector3<f32>,
    pub heading: HeadingPolicy,
}

impl Default for CarParams {
    fn default() -> Self {
        Self {
            displacement: Vector3::new(0.0, 0.0, -1.0),
            heading: HeadingPolicy::FollowTravel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelParams {
    /// Degrees per second
    pub spin_speed: f32,
    pub spin_axis: Axis,
    pub shape: WheelShape,
    pub offsets: Vec<Vector3<f32>>,
}

impl Default for WheelParams {
    fn default() -> Self {
        Self {
            spin_speed: DEFAULT_SPIN_SPEED,
            spin_axis: Axis::X,
            shape: WheelShape {
                spokes: 8,
                radius: 0.2,
                thickness: 0.1,
            },
            offsets: CANONICAL_WHEEL_OFFSETS.iter().map(|&o| Vector3::from(o)).collect(),
        }
    }
}

/// Dimensions of the box used as the car body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            width: 0.8,
            height: 0.5,
            depth: 2.0,
        }
    }
}
