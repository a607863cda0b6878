/// Hand-built affine transformation matrices
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Principal axis used for rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit_vector(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(format!("unknown axis '{}', expected x, y or z", other)),
        }
    }
}

/// Transform builder for 3D transformations.
///
/// Matrices are indexed `(row, column)` and act on column vectors, so the
/// translation lives in column 3 and `a * b` applies `b` first.
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix4<f32> {
        let mut matrix = Matrix4::identity();
        matrix[(0, 3)] = tx;
        matrix[(1, 3)] = ty;
        matrix[(2, 3)] = tz;
        matrix
    }

    pub fn translation_vector(offset: &Vector3<f32>) -> Matrix4<f32> {
        Self::translation(offset.x, offset.y, offset.z)
    }

    /// Create a scale matrix
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        let mut matrix = Matrix4::identity();
        matrix[(0, 0)] = sx;
        matrix[(1, 1)] = sy;
        matrix[(2, 2)] = sz;
        matrix
    }

    /// Create a right-handed rotation of `degrees` about a principal axis.
    ///
    /// Positive angles turn counter-clockwise when looking down the axis
    /// toward the origin. Each axis negates exactly one sine term.
    pub fn rotation(degrees: f32, axis: Axis) -> Matrix4<f32> {
        let (sin, cos) = degrees.to_radians().sin_cos();

        let mut matrix = Matrix4::identity();
        match axis {
            Axis::X => {
                matrix[(1, 1)] = cos;
                matrix[(1, 2)] = -sin;
                matrix[(2, 1)] = sin;
                matrix[(2, 2)] = cos;
            }
            Axis::Y => {
                matrix[(0, 0)] = cos;
                matrix[(0, 2)] = sin;
                matrix[(2, 0)] = -sin;
                matrix[(2, 2)] = cos;
            }
            Axis::Z => {
                matrix[(0, 0)] = cos;
                matrix[(0, 1)] = -sin;
                matrix[(1, 0)] = sin;
                matrix[(1, 1)] = cos;
            }
        }
        matrix
    }

    /// Apply an affine matrix to a point treated as `(x, y, z, 1)`.
    ///
    /// No perspective divide: every matrix built here keeps `w == 1`.
    pub fn apply(matrix: &Matrix4<f32>, point: &Point3<f32>) -> Point3<f32> {
        let h = matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(h.x, h.y, h.z)
    }
}
