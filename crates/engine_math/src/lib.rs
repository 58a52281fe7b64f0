//! # engine_math
//!
//! Math payload types for the ECS engine. Re-exports [`glam`] for linear
//! algebra and defines the spatial values that components wrap.

pub mod pose;
pub mod spherical;

// Re-export glam types for convenience.
pub use glam::{DQuat, DVec3};

pub use pose::Pose3;
pub use spherical::{CoordinateError, SphericalCoordinates, SurfaceType};
