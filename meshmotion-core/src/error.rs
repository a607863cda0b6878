/// Error types for mesh animation and mesh generation
use thiserror::Error;

/// Malformed mesh input reported by an animator or a mesh handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimError {
    /// The mesh handle exposed no vertices at initialization.
    #[error("mesh has no vertices to animate")]
    EmptyMesh,
    /// The handle's vertex count no longer matches the captured base buffer.
    #[error("vertex count mismatch: expected {expected}, mesh has {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },
}

/// Invalid parameters for a procedural mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("number of spokes must be between {min} and {max}, got {spokes}")]
    SpokeCount { spokes: u32, min: u32, max: u32 },
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("triangle index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Failure while assembling a scene from parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Anim(#[from] AnimError),
}
