//! Geodetic origin of the world.

use engine_component::{Component, register_component};
use engine_msgs::serializers::SphericalCoordinatesSerializer;

use crate::names;

/// Marker for [`SphericalCoordinates`].
pub enum SphericalCoordinatesTag {}

/// The spherical coordinates of the world origin.
pub type SphericalCoordinates = Component<
    engine_math::SphericalCoordinates,
    SphericalCoordinatesTag,
    SphericalCoordinatesSerializer,
>;

register_component!(names::SPHERICAL_COORDINATES, SphericalCoordinates);
