//! 3D pose payload.
//!
//! [`Pose3`] is a rigid-body frame: position plus orientation, in double
//! precision. Several components wrap it (a local pose, a world pose), which
//! is why it lives here rather than next to any one component.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// A rigid 3D pose: translation followed by rotation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Pose3 {
    /// Position in the parent frame.
    pub position: DVec3,
    /// Orientation as a unit quaternion.
    pub rotation: DQuat,
}

impl Pose3 {
    /// The identity pose: origin, no rotation.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    /// Create a pose from position and rotation.
    #[must_use]
    pub const fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose at `position` with no rotation.
    #[must_use]
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create a pose from position and roll/pitch/yaw (radians, extrinsic XYZ).
    #[must_use]
    pub fn from_xyz_rpy(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            position: DVec3::new(x, y, z),
            rotation: DQuat::from_euler(glam::EulerRot::ZYX, yaw, pitch, roll),
        }
    }
}

impl Default for Pose3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
