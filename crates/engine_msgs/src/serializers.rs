//! Shared serializer strategies.
//!
//! One alias per (payload, message) pair. Components that wrap the same
//! payload use the same alias.

use engine_component::MsgSerializer;

use crate::messages as msgs;

/// [`engine_math::SphericalCoordinates`] ⇄ [`msgs::SphericalCoordinates`].
pub type SphericalCoordinatesSerializer = MsgSerializer<msgs::SphericalCoordinates>;

/// [`engine_math::Pose3`] ⇄ [`msgs::Pose`].
pub type PoseSerializer = MsgSerializer<msgs::Pose>;

/// [`engine_math::DVec3`] ⇄ [`msgs::Vector3d`].
pub type Vector3dSerializer = MsgSerializer<msgs::Vector3d>;

/// `String` ⇄ [`msgs::StringMsg`].
pub type StringSerializer = MsgSerializer<msgs::StringMsg>;

/// `bool` ⇄ [`msgs::Boolean`].
pub type BooleanSerializer = MsgSerializer<msgs::Boolean>;
