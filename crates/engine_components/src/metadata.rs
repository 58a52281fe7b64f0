//! Descriptive components: names, flags, hierarchy.

use engine_component::{Component, DefaultSerializer, Entity, register_component};
use engine_msgs::serializers::{BooleanSerializer, StringSerializer};

use crate::names;

pub enum NameTag {}
pub enum StaticTag {}
pub enum ParentEntityTag {}

/// Human-readable entity name.
pub type Name = Component<String, NameTag, StringSerializer>;

/// Marks an entity that never moves.
pub type Static = Component<bool, StaticTag, BooleanSerializer>;

/// The entity's parent in the scene hierarchy.
pub type ParentEntity = Component<Entity, ParentEntityTag, DefaultSerializer>;

register_component!(names::NAME, Name);
register_component!(names::STATIC, Static);
register_component!(names::PARENT_ENTITY, ParentEntity);
