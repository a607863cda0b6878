/// Geometry primitives for mesh animation
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::animator::MeshHandle;
use crate::error::{AnimError, GeometryError};

/// A triangle face defined by three positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>) -> Self {
        Self {
            positions: [p0, p1, p2],
        }
    }

    /// Unnormalized face normal; its length is twice the triangle's area.
    pub fn area_normal(&self) -> Vector3<f32> {
        let [p0, p1, p2] = self.positions;
        (p1 - p0).cross(&(p2 - p0))
    }

    /// Calculate the face normal from the triangle's positions.
    ///
    /// Counter-clockwise winding faces the viewer. Degenerate triangles give
    /// the zero vector.
    pub fn calculate_normal(&self) -> Vector3<f32> {
        self.area_normal()
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }
}

/// An indexed triangle mesh with one normal per vertex
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f32>) -> u32 {
        self.positions.push(position);
        self.normals.push(Vector3::zeros());
        (self.positions.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, indices: [u32; 3]) -> Result<(), GeometryError> {
        if let Some(&index) = indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count: self.positions.len(),
            });
        }
        self.triangles.push(indices);
        Ok(())
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Resolve the triangle at `index` into positions
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        let [a, b, c] = *self.triangles.get(index)?;
        Some(Triangle::new(
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ))
    }

    pub fn face_normals(&self) -> impl Iterator<Item = Vector3<f32>> + '_ {
        (0..self.triangles.len()).filter_map(move |i| self.triangle(i).map(|t| t.calculate_normal()))
    }

    /// Re-derive vertex normals from the current positions.
    ///
    /// Each vertex normal is the normalized sum of the area-weighted normals
    /// of the faces that use it.
    pub fn recalculate_normals(&mut self) {
        let mut accumulated = vec![Vector3::<f32>::zeros(); self.positions.len()];

        for i in 0..self.triangles.len() {
            if let Some(triangle) = self.triangle(i) {
                let face = triangle.area_normal();
                for &index in &self.triangles[i] {
                    accumulated[index as usize] += face;
                }
            }
        }

        self.normals = accumulated
            .into_iter()
            .map(|n| n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros))
            .collect();
    }

    /// Create an axis-aligned box centred on the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self::with_capacity(8, 12);

        for corner in [
            [-w, -h, -d],
            [w, -h, -d],
            [w, h, -d],
            [-w, h, -d],
            [-w, -h, d],
            [w, -h, d],
            [w, h, d],
            [-w, h, d],
        ] {
            mesh.add_vertex(Point3::from(corner));
        }

        mesh.triangles.extend_from_slice(&[
            // Front (+z)
            [4, 5, 6],
            [4, 6, 7],
            // Back (-z)
            [0, 2, 1],
            [0, 3, 2],
            // Top (+y)
            [3, 7, 6],
            [3, 6, 2],
            // Bottom (-y)
            [0, 1, 5],
            [0, 5, 4],
            // Right (+x)
            [1, 2, 6],
            [1, 6, 5],
            // Left (-x)
            [0, 4, 7],
            [0, 7, 3],
        ]);

        mesh.recalculate_normals();
        mesh
    }

    /// Create a simple cube mesh for testing
    pub fn cube(size: f32) -> Self {
        Self::cuboid(size, size, size)
    }

    /// Create a spoked wheel whose axle runs along X.
    ///
    /// Vertices 0 and 1 are the centres of the `+x` and `-x` caps, followed
    /// by one `(+x, -x)` pair per spoke around the rim.
    pub fn wheel(shape: &WheelShape) -> Self {
        let spokes = shape.spokes;
        let half = shape.thickness / 2.0;
        let mut mesh = Self::with_capacity(2 * spokes as usize + 2, 4 * spokes as usize);

        mesh.add_vertex(Point3::new(half, 0.0, 0.0));
        mesh.add_vertex(Point3::new(-half, 0.0, 0.0));

        for i in 0..spokes {
            let angle = TAU * i as f32 / spokes as f32;
            let (sin, cos) = angle.sin_cos();
            let (y, z) = (shape.radius * sin, shape.radius * cos);
            mesh.add_vertex(Point3::new(half, y, z));
            mesh.add_vertex(Point3::new(-half, y, z));
        }

        for i in 0..spokes {
            let j = (i + 1) % spokes;
            let (top_i, bottom_i) = (2 * i + 2, 2 * i + 3);
            let (top_j, bottom_j) = (2 * j + 2, 2 * j + 3);

            mesh.triangles.push([top_j, bottom_j, top_i]);
            mesh.triangles.push([bottom_j, bottom_i, top_i]);
        }

        for i in 0..spokes {
            let j = (i + 1) % spokes;
            mesh.triangles.push([2 * j + 2, 2 * i + 2, 0]);
            mesh.triangles.push([2 * i + 3, 2 * j + 3, 1]);
        }

        mesh.recalculate_normals();
        mesh
    }
}

impl MeshHandle for Mesh {
    fn vertex_positions(&self) -> Vec<Point3<f32>> {
        self.positions.clone()
    }

    fn set_vertex_positions(&mut self, positions: &[Point3<f32>]) -> Result<(), AnimError> {
        if positions.len() != self.positions.len() {
            return Err(AnimError::VertexCountMismatch {
                expected: self.positions.len(),
                actual: positions.len(),
            });
        }
        self.positions.copy_from_slice(positions);
        Ok(())
    }

    fn recalculate_normals(&mut self) {
        Mesh::recalculate_normals(self);
    }
}

/// Shape parameters for a procedural wheel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelShape {
    pub spokes: u32,
    pub radius: f32,
    pub thickness: f32,
}

impl WheelShape {
    pub const MIN_SPOKES: u32 = 3;
    pub const MAX_SPOKES: u32 = 360;

    pub fn new(spokes: u32, radius: f32, thickness: f32) -> Result<Self, GeometryError> {
        let shape = Self {
            spokes,
            radius,
            thickness,
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Check the bounds a deserialized shape skipped
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(Self::MIN_SPOKES..=Self::MAX_SPOKES).contains(&self.spokes) {
            return Err(GeometryError::SpokeCount {
                spokes: self.spokes,
                min: Self::MIN_SPOKES,
                max: Self::MAX_SPOKES,
            });
        }
        positive("radius", self.radius)?;
        positive("thickness", self.thickness)?;
        Ok(())
    }

    /// Object name for export; whole-number sizes keep their `.0`.
    pub fn object_name(&self) -> String {
        format!("Wheel_N{}_R{:?}_T{:?}", self.spokes, self.radius, self.thickness)
    }
}

impl Default for WheelShape {
    fn default() -> Self {
        Self {
            spokes: 8,
            radius: 1.0,
            thickness: 0.5,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_triangle_normal() {
        let triangle = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(triangle.calculate_normal(), Vector3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_triangle_normal_is_zero() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let triangle = Triangle::new(p, p, Point3::new(2.0, 2.0, 2.0));
        assert_eq!(triangle.calculate_normal(), Vector3::zeros());
    }

    #[test]
    fn test_add_triangle_rejects_bad_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::origin());
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let err = mesh.add_triangle([0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::IndexOutOfRange {
                index: 2,
                vertex_count: 2
            }
        );
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_cuboid_faces_point_outward() {
        let mesh = Mesh::cuboid(1.0, 0.5, 2.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);

        for (i, normal) in mesh.face_normals().enumerate() {
            let triangle = mesh.triangle(i).unwrap();
            let centroid = triangle.positions.iter().fold(Vector3::<f32>::zeros(), |acc, p| acc + p.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0, "face {} points inward", i);
        }
    }

    #[test]
    fn test_cube_vertex_normals_point_to_corners() {
        let mesh = Mesh::cube(2.0);
        for (position, normal) in mesh.positions().iter().zip(mesh.normals()) {
            assert!((normal.norm() - 1.0).abs() < 1e-5);
            assert!(normal.dot(&position.coords) > 0.0);
        }
    }

    #[test]
    fn test_wheel_counts() {
        let shape = WheelShape::new(8, 1.0, 0.5).unwrap();
        let mesh = Mesh::wheel(&shape);
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.triangle_count(), 32);
        assert_relative_eq!(mesh.positions()[0], Point3::new(0.25, 0.0, 0.0));
        assert_relative_eq!(mesh.positions()[1], Point3::new(-0.25, 0.0, 0.0));
        assert_relative_eq!(mesh.positions()[2], Point3::new(0.25, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_wheel_faces_point_outward() {
        let mesh = Mesh::wheel(&WheelShape::new(12, 0.4, 0.2).unwrap());
        for (i, normal) in mesh.face_normals().enumerate() {
            let triangle = mesh.triangle(i).unwrap();
            let centroid = triangle.positions.iter().fold(Vector3::<f32>::zeros(), |acc, p| acc + p.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0, "face {} points inward", i);
        }
    }

    #[test]
    fn test_wheel_shape_validation() {
        assert!(matches!(
            WheelShape::new(2, 1.0, 0.5),
            Err(GeometryError::SpokeCount { spokes: 2, .. })
        ));
        assert!(WheelShape::new(361, 1.0, 0.5).is_err());
        assert!(matches!(
            WheelShape::new(8, 0.0, 0.5),
            Err(GeometryError::NonPositive { name: "radius", .. })
        ));
        assert!(matches!(
            WheelShape::new(8, 1.0, f32::NAN),
            Err(GeometryError::NonPositive { name: "thickness", .. })
        ));
        assert!(WheelShape::new(360, 1.0, 0.5).is_ok());
        assert_eq!(WheelShape::default().object_name(), "Wheel_N8_R1.0_T0.5");
        assert_eq!(WheelShape::new(12, 2.0, 0.25).unwrap().object_name(), "Wheel_N12_R2.0_T0.25");
    }

    #[test]
    fn test_set_positions_checks_length() {
        let mut mesh = Mesh::cube(1.0);
        let err = mesh.set_vertex_positions(&[Point3::origin()]).unwrap_err();
        assert_eq!(
            err,
            AnimError::VertexCountMismatch {
                expected: 8,
                actual: 1
            }
        );
    }
}
