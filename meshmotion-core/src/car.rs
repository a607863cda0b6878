/// Car body and wheel animators with parent-to-child composition
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::animator::{MeshAnimator, MeshHandle};
use crate::clock::FrameTime;
use crate::error::{AnimError, SceneError};
use crate::geometry::Mesh;
use crate::params::SceneParams;
use crate::transform::{Axis, Transform};

/// Wheel offsets relative to the car origin: front right, back right,
/// front left, back left. The car's front faces `-z`.
pub const CANONICAL_WHEEL_OFFSETS: [[f32; 3]; 4] = [
    [-0.46, -0.25, -0.78],
    [-0.46, -0.25, 0.74],
    [0.46, -0.25, -0.78],
    [0.46, -0.25, 0.74],
];

/// Default wheel spin in degrees per second
pub const DEFAULT_SPIN_SPEED: f32 = 200.0;

/// Rule for the car body's rotation each tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HeadingPolicy {
    /// Face the direction of travel: `-(atan2(dz, dx) + 90°)` about Y.
    ///
    /// The angle is negated because rotations are right-handed, so positive
    /// angles about Y carry `-z` toward `-x`.
    #[default]
    FollowTravel,
    /// Spin at a constant rate regardless of travel direction
    FixedRate { degrees_per_second: f32, axis: Axis },
}

impl HeadingPolicy {
    /// Heading angle in degrees and its axis at `elapsed` seconds
    pub fn heading(&self, displacement: &Vector3<f32>, elapsed: f32) -> (f32, Axis) {
        match *self {
            HeadingPolicy::FollowTravel => {
                let degrees = -(displacement.z.atan2(displacement.x).to_degrees() + 90.0);
                (degrees, Axis::Y)
            }
            HeadingPolicy::FixedRate {
                degrees_per_second,
                axis,
            } => (degrees_per_second * elapsed, axis),
        }
    }

    pub fn rotation(&self, displacement: &Vector3<f32>, elapsed: f32) -> Matrix4<f32> {
        let (degrees, axis) = self.heading(displacement, elapsed);
        Transform::rotation(degrees, axis)
    }
}

/// A wheel that spins about its own axis and rides along with the car
#[derive(Debug, Clone)]
pub struct Wheel<M = Mesh> {
    animator: MeshAnimator<M>,
    offset: Vector3<f32>,
    spin_speed: f32,
    spin_axis: Axis,
}

impl<M: MeshHandle> Wheel<M> {
    pub fn new(mesh: M, offset: Vector3<f32>, spin_speed: f32, spin_axis: Axis) -> Result<Self, AnimError> {
        Ok(Self {
            animator: MeshAnimator::new(mesh)?,
            offset,
            spin_speed,
            spin_axis,
        })
    }

    /// Spin angle in degrees at `elapsed` seconds
    pub fn spin_angle(&self, elapsed: f32) -> f32 {
        self.spin_speed * elapsed
    }

    /// World transform: spin in place, move to the offset, then follow the car.
    pub fn composite(&self, car_composite: &Matrix4<f32>, elapsed: f32) -> Matrix4<f32> {
        let translate = Transform::translation_vector(&self.offset);
        let rotate = Transform::rotation(self.spin_angle(elapsed), self.spin_axis);
        car_composite * translate * rotate
    }

    pub fn tick(&mut self, car_composite: &Matrix4<f32>, time: &FrameTime) -> Result<Matrix4<f32>, AnimError> {
        let composite = self.composite(car_composite, time.elapsed);
        self.animator.tick(&composite)?;
        Ok(composite)
    }

    pub fn offset(&self) -> Vector3<f32> {
        self.offset
    }

    pub fn spin_axis(&self) -> Axis {
        self.spin_axis
    }

    pub fn animator(&self) -> &MeshAnimator<M> {
        &self.animator
    }

    pub fn mesh(&self) -> &M {
        self.animator.mesh()
    }
}

/// Car body animator owning its wheels
#[derive(Debug, Clone)]
pub struct Car<M = Mesh> {
    body: MeshAnimator<M>,
    displacement: Vector3<f32>,
    heading: HeadingPolicy,
    wheels: Vec<Wheel<M>>,
}

/// Car built from in-memory meshes
pub type CarScene = Car<Mesh>;

impl<M: MeshHandle> Car<M> {
    pub fn new(body: M, displacement: Vector3<f32>, heading: HeadingPolicy) -> Result<Self, AnimError> {
        Ok(Self {
            body: MeshAnimator::new(body)?,
            displacement,
            heading,
            wheels: Vec::new(),
        })
    }

    pub fn attach_wheel(&mut self, wheel: Wheel<M>) {
        self.wheels.push(wheel);
    }

    /// Car transform at `elapsed` seconds: `move * rotate`.
    ///
    /// Position is `displacement * elapsed`, so restarting the clock puts
    /// the car back at the origin.
    pub fn composite(&self, elapsed: f32) -> Matrix4<f32> {
        let travelled = self.displacement * elapsed;
        let translate = Transform::translation_vector(&travelled);
        let rotate = self.heading.rotation(&self.displacement, elapsed);
        translate * rotate
    }

    /// Tick the body, then each wheel with the body's composite.
    ///
    /// Stops at the first rejected write. Nothing is rolled back: the body and
    /// any wheels ticked before the failure keep the new frame, the failing
    /// wheel and those after it stay on their last accepted frame.
    pub fn tick(&mut self, time: &FrameTime) -> Result<Matrix4<f32>, AnimError> {
        let composite = self.composite(time.elapsed);
        trace!(elapsed = time.elapsed, "car tick");

        self.body.tick(&composite)?;
        for wheel in &mut self.wheels {
            wheel.tick(&composite, time)?;
        }
        Ok(composite)
    }

    pub fn position(&self, elapsed: f32) -> Point3<f32> {
        Transform::apply(&self.composite(elapsed), &Point3::origin())
    }

    pub fn heading_degrees(&self, elapsed: f32) -> f32 {
        self.heading.heading(&self.displacement, elapsed).0
    }

    pub fn displacement(&self) -> Vector3<f32> {
        self.displacement
    }

    pub fn heading(&self) -> HeadingPolicy {
        self.heading
    }

    pub fn body(&self) -> &MeshAnimator<M> {
        &self.body
    }

    pub fn wheels(&self) -> &[Wheel<M>] {
        &self.wheels
    }
}

impl Car<Mesh> {
    /// Build a box body with a procedural wheel at every configured offset
    pub fn from_params(params: &SceneParams) -> Result<Self, SceneError> {
        params.validate()?;

        let body = Mesh::cuboid(params.body.width, params.body.height, params.body.depth);
        let mut car = Car::new(body, params.car.displacement, params.car.heading)?;

        let wheel_mesh = Mesh::wheel(&params.wheels.shape);
        for offset in &params.wheels.offsets {
            car.attach_wheel(Wheel::new(
                wheel_mesh.clone(),
                *offset,
                params.wheels.spin_speed,
                params.wheels.spin_axis,
            )?);
        }

        info!(
            wheels = car.wheels.len(),
            body_vertices = car.body.vertex_count(),
            wheel_vertices = wheel_mesh.vertex_count(),
            "car scene assembled"
        );
        Ok(car)
    }
}
