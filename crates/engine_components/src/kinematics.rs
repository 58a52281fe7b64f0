//! Pose and velocity components.
//!
//! `Pose` and `WorldPose` wrap the same payload and share one serializer; so
//! do the two velocities. Their tags keep them apart.

use engine_component::{Component, register_component};
use engine_math::{DVec3, Pose3};
use engine_msgs::serializers::{PoseSerializer, Vector3dSerializer};

use crate::names;

pub enum PoseTag {}
pub enum WorldPoseTag {}
pub enum LinearVelocityTag {}
pub enum AngularVelocityTag {}

/// Pose of an entity relative to its parent.
pub type Pose = Component<Pose3, PoseTag, PoseSerializer>;

/// Pose of an entity in the world frame.
pub type WorldPose = Component<Pose3, WorldPoseTag, PoseSerializer>;

/// Linear velocity in metres per second.
pub type LinearVelocity = Component<DVec3, LinearVelocityTag, Vector3dSerializer>;

/// Angular velocity in radians per second.
pub type AngularVelocity = Component<DVec3, AngularVelocityTag, Vector3dSerializer>;

register_component!(names::POSE, Pose);
register_component!(names::WORLD_POSE, WorldPose);
register_component!(names::LINEAR_VELOCITY, LinearVelocity);
register_component!(names::ANGULAR_VELOCITY, AngularVelocity);
