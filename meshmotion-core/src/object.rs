/// Single mesh moving and spinning on its own
use nalgebra::{Matrix4, Vector3};

use crate::animator::{MeshAnimator, MeshHandle};
use crate::clock::FrameTime;
use crate::error::AnimError;
use crate::geometry::Mesh;
use crate::transform::{Axis, Transform};

/// Translates by `displacement * t` and rotates by `angle_rate * t` degrees.
#[derive(Debug, Clone)]
pub struct ObjectAnimator<M = Mesh> {
    animator: MeshAnimator<M>,
    pub displacement: Vector3<f32>,
    pub angle_rate: f32,
    pub axis: Axis,
}

impl<M: MeshHandle> ObjectAnimator<M> {
    pub fn new(mesh: M, displacement: Vector3<f32>, angle_rate: f32, axis: Axis) -> Result<Self, AnimError> {
        Ok(Self {
            animator: MeshAnimator::new(mesh)?,
            displacement,
            angle_rate,
            axis,
        })
    }

    pub fn composite(&self, elapsed: f32) -> Matrix4<f32> {
        let travelled = self.displacement * elapsed;
        Transform::translation_vector(&travelled) * Transform::rotation(self.angle_rate * elapsed, self.axis)
    }

    /// Returns whether the mesh was rewritten
    pub fn tick(&mut self, time: &FrameTime) -> Result<bool, AnimError> {
        let composite = self.composite(time.elapsed);
        self.animator.tick(&composite)
    }

    pub fn animator(&self) -> &MeshAnimator<M> {
        &self.animator
    }

    pub fn mesh(&self) -> &M {
        self.animator.mesh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_position_depends_only_on_elapsed() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let mut object = ObjectAnimator::new(mesh, Vector3::new(0.0, 1.0, 0.0), 90.0, Axis::Z).unwrap();

        for _ in 0..10 {
            object.tick(&FrameTime::new(0.5, 0.016)).unwrap();
        }
        object.tick(&FrameTime::new(1.0, 0.5)).unwrap();

        // 90 degrees about Z maps +x to +y, then the object has risen by 1.
        assert_relative_eq!(object.mesh().positions()[0], Point3::new(0.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_stationary_object_keeps_base() {
        let mut object = ObjectAnimator::new(Mesh::cube(1.0), Vector3::zeros(), 0.0, Axis::Y).unwrap();
        assert!(!object.tick(&FrameTime::at(12.0)).unwrap());
        assert_eq!(object.mesh().positions(), object.animator().base_positions());
    }
}
