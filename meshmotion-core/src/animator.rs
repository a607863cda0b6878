/// Per-tick vertex recomputation from an immutable base snapshot
use nalgebra::{Matrix4, Point3};
use tracing::{debug, trace, warn};

use crate::error::AnimError;
use crate::transform::Transform;

/// Mesh resource an animator writes into.
///
/// Rendering engines implement this for their own mesh objects;
/// [`crate::Mesh`] is the in-memory implementation.
pub trait MeshHandle {
    /// Snapshot of the current vertex positions
    fn vertex_positions(&self) -> Vec<Point3<f32>>;

    /// Replace every vertex position. Must reject a buffer of the wrong length.
    fn set_vertex_positions(&mut self, positions: &[Point3<f32>]) -> Result<(), AnimError>;

    /// Re-derive normals after the positions changed
    fn recalculate_normals(&mut self);
}

/// Owns a mesh and re-derives its vertices from the base snapshot every tick
#[derive(Debug, Clone)]
pub struct MeshAnimator<M> {
    mesh: M,
    base: Vec<Point3<f32>>,
    working: Vec<Point3<f32>>,
    applied: Matrix4<f32>,
}

impl<M: MeshHandle> MeshAnimator<M> {
    /// Capture the mesh's current positions as the base snapshot
    pub fn new(mesh: M) -> Result<Self, AnimError> {
        let base = mesh.vertex_positions();
        if base.is_empty() {
            return Err(AnimError::EmptyMesh);
        }
        debug!(vertices = base.len(), "captured base vertices");

        Ok(Self {
            working: base.clone(),
            base,
            mesh,
            applied: Matrix4::identity(),
        })
    }

    /// Transform every base vertex by `composite` and push the result to the mesh.
    ///
    /// Returns `Ok(false)` without touching the mesh when `composite` is the
    /// matrix already applied. A rejected write leaves the working buffer on
    /// the last frame the mesh accepted.
    pub fn tick(&mut self, composite: &Matrix4<f32>) -> Result<bool, AnimError> {
        if *composite == self.applied {
            trace!("composite unchanged, skipping vertex update");
            return Ok(false);
        }

        self.derive(composite);

        if let Err(err) = self.mesh.set_vertex_positions(&self.working) {
            warn!(error = %err, "mesh rejected vertex update");
            let applied = self.applied;
            self.derive(&applied);
            return Err(err);
        }
        self.mesh.recalculate_normals();
        self.applied = *composite;

        trace!(vertices = self.working.len(), "mesh vertices updated");
        Ok(true)
    }

    fn derive(&mut self, composite: &Matrix4<f32>) {
        for (working, base) in self.working.iter_mut().zip(&self.base) {
            *working = Transform::apply(composite, base);
        }
    }

    /// Put the mesh back to its base snapshot
    pub fn reset(&mut self) -> Result<bool, AnimError> {
        self.tick(&Matrix4::identity())
    }

    pub fn base_positions(&self) -> &[Point3<f32>] {
        &self.base
    }

    pub fn working_positions(&self) -> &[Point3<f32>] {
        &self.working
    }

    pub fn vertex_count(&self) -> usize {
        self.base.len()
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    pub fn into_mesh(self) -> M {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use crate::transform::Axis;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn single_point(p: Point3<f32>) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(p);
        mesh
    }

    /// Handle that drops a vertex after construction
    struct ShrinkingMesh {
        positions: Vec<Point3<f32>>,
        normal_updates: usize,
    }

    impl MeshHandle for ShrinkingMesh {
        fn vertex_positions(&self) -> Vec<Point3<f32>> {
            self.positions.clone()
        }

        fn set_vertex_positions(&mut self, positions: &[Point3<f32>]) -> Result<(), AnimError> {
            let actual = self.positions.len() - 1;
            if positions.len() != actual {
                return Err(AnimError::VertexCountMismatch {
                    expected: positions.len(),
                    actual,
                });
            }
            Ok(())
        }

        fn recalculate_normals(&mut self) {
            self.normal_updates += 1;
        }
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        let err = MeshAnimator::new(Mesh::new()).unwrap_err();
        assert_eq!(err, AnimError::EmptyMesh);
    }

    #[test]
    fn test_initial_working_matches_base() {
        let animator = MeshAnimator::new(Mesh::cube(1.0)).unwrap();
        assert_eq!(animator.vertex_count(), 8);
        assert_eq!(animator.working_positions(), animator.base_positions());
    }

    #[test]
    fn test_rotate_then_translate() {
        let mut animator = MeshAnimator::new(single_point(Point3::new(1.0, 0.0, 0.0))).unwrap();
        let composite = Transform::translation(2.0, 0.0, 0.0) * Transform::rotation(90.0, Axis::Z);

        assert!(animator.tick(&composite).unwrap());
        assert_relative_eq!(animator.working_positions()[0], Point3::new(2.0, 1.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(animator.mesh().positions()[0], Point3::new(2.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_ticks_derive_from_base() {
        let mut animator = MeshAnimator::new(Mesh::cube(2.0)).unwrap();
        let first = Transform::translation(1.0, 0.0, 0.0);
        let second = Transform::translation(0.0, 3.0, 0.0);

        animator.tick(&first).unwrap();
        let after_first = animator.working_positions().to_vec();
        animator.tick(&second).unwrap();
        animator.tick(&first).unwrap();

        assert_eq!(animator.working_positions(), after_first.as_slice());
        for (working, base) in animator.working_positions().iter().zip(animator.base_positions()) {
            assert_relative_eq!(*working, base + Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_repeated_composite_is_skipped() {
        let mut animator = MeshAnimator::new(Mesh::cube(1.0)).unwrap();
        let composite = Transform::rotation(30.0, Axis::Y);

        assert!(animator.tick(&composite).unwrap());
        let snapshot = animator.working_positions().to_vec();
        assert!(!animator.tick(&composite).unwrap());
        assert_eq!(animator.working_positions(), snapshot.as_slice());
    }

    #[test]
    fn test_identity_needs_no_update() {
        let mut animator = MeshAnimator::new(Mesh::cube(1.0)).unwrap();
        assert!(!animator.tick(&Matrix4::identity()).unwrap());
    }

    #[test]
    fn test_normals_follow_rotation() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_triangle([0, 1, 2]).unwrap();
        mesh.recalculate_normals();

        let mut animator = MeshAnimator::new(mesh).unwrap();
        animator.tick(&Transform::rotation(90.0, Axis::X)).unwrap();

        for normal in animator.mesh().normals() {
            assert_relative_eq!(*normal, -Vector3::y(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_reset_restores_base() {
        let mut animator = MeshAnimator::new(Mesh::cube(1.0)).unwrap();
        animator.tick(&Transform::translation(4.0, 4.0, 4.0)).unwrap();
        assert!(animator.reset().unwrap());
        assert_eq!(animator.mesh().positions(), animator.base_positions());
    }

    #[test]
    fn test_count_mismatch_is_reported() {
        let handle = ShrinkingMesh {
            positions: vec![Point3::origin(), Point3::new(1.0, 1.0, 1.0)],
            normal_updates: 0,
        };
        let mut animator = MeshAnimator::new(handle).unwrap();
        let err = animator.tick(&Transform::translation(1.0, 0.0, 0.0)).unwrap_err();

        assert_eq!(
            err,
            AnimError::VertexCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(animator.mesh().normal_updates, 0);
        assert_eq!(animator.working_positions(), animator.base_positions());
    }

    #[test]
    fn test_rejected_write_keeps_last_accepted_frame() {
        let mut animator = MeshAnimator::new(single_point(Point3::new(1.0, 0.0, 0.0))).unwrap();
        animator.tick(&Transform::translation(0.0, 2.0, 0.0)).unwrap();

        // Swap in a handle that can no longer take writes of this length.
        let mut rejecting = MeshAnimator {
            mesh: ShrinkingMesh {
                positions: vec![Point3::origin(); 3],
                normal_updates: 0,
            },
            base: animator.base_positions().to_vec(),
            working: animator.working_positions().to_vec(),
            applied: Transform::translation(0.0, 2.0, 0.0),
        };
        assert!(rejecting.tick(&Transform::translation(5.0, 0.0, 0.0)).is_err());
        assert_relative_eq!(rejecting.working_positions()[0], Point3::new(1.0, 2.0, 0.0), epsilon = 1e-6);

        // The same composite is retried rather than skipped.
        assert!(rejecting.tick(&Transform::translation(5.0, 0.0, 0.0)).is_err());
    }
}
