//! meshmotion core - hand-built affine transforms applied to mesh vertices
//!
//! Transformation matrices are composed per tick and multiplied into an
//! immutable base snapshot of each mesh, so an animation is a pure function
//! of elapsed time. A car animator feeds its composite to its wheels.

pub mod animator;
pub mod car;
pub mod clock;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod object;
pub mod params;
pub mod transform;

// Re-export commonly used types
pub use animator::{MeshAnimator, MeshHandle};
pub use car::{Car, CarScene, HeadingPolicy, Wheel, CANONICAL_WHEEL_OFFSETS};
pub use clock::{FixedStepClock, FrameTime};
pub use error::{AnimError, GeometryError, SceneError};
pub use geometry::{Mesh, Triangle, WheelShape};
pub use object::ObjectAnimator;
pub use params::{BodyParams, CarParams, SceneParams, WheelParams};
pub use transform::{Axis, Transform};
