//! Built-in component types.
//!
//! Each component is a [`Component`](engine_component::Component) alias
//! binding a payload, a tag, and a serializer, followed by a
//! [`register_component!`](engine_component::register_component) declaration
//! that makes it reachable by name through
//! [`ComponentFactory::global`](engine_component::ComponentFactory::global).
//!
//! Linking this crate is enough to populate the global factory.

pub mod kinematics;
pub mod metadata;
pub mod spherical_coordinates;

pub use kinematics::{AngularVelocity, LinearVelocity, Pose, WorldPose};
pub use metadata::{Name, ParentEntity, Static};
pub use spherical_coordinates::SphericalCoordinates;

/// Registered names of the built-in components.
pub mod names {
    pub const SPHERICAL_COORDINATES: &str = "SphericalCoordinates";
    pub const POSE: &str = "Pose";
    pub const WORLD_POSE: &str = "WorldPose";
    pub const LINEAR_VELOCITY: &str = "LinearVelocity";
    pub const ANGULAR_VELOCITY: &str = "AngularVelocity";
    pub const NAME: &str = "Name";
    pub const STATIC: &str = "Static";
    pub const PARENT_ENTITY: &str = "ParentEntity";

    /// Every built-in name.
    pub const ALL: [&str; 8] = [
        SPHERICAL_COORDINATES,
        POSE,
        WORLD_POSE,
        LINEAR_VELOCITY,
        ANGULAR_VELOCITY,
        NAME,
        STATIC,
        PARENT_ENTITY,
    ];
}
