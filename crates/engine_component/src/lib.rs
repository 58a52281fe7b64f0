//! # engine_component
//!
//! The "C" in ECS: defines what a component kind is, how its payload is
//! converted to and from transport bytes, and how generic tooling finds a
//! component type by name.
//!
//! This crate provides:
//!
//! - [`Component`] — the typed wrapper binding payload, tag, and serializer.
//! - [`BaseComponent`] — the type-erased handle used by generic code.
//! - [`Serializer`], [`MessageConvert`], [`MsgSerializer`],
//!   [`DefaultSerializer`] — payload conversion strategies.
//! - [`ComponentFactory`] — the name-indexed registry of component types.
//! - [`register_component!`] — load-time registration into the global factory.
//! - [`Entity`] — lightweight `u64` entity identifiers.

pub mod component;
pub mod entity;
pub mod error;
pub mod factory;
pub mod registration;
pub mod serializer;

pub use component::{BaseComponent, Component, ComponentTypeId};
pub use entity::Entity;
pub use error::{FactoryError, SerializationError};
pub use factory::{ComponentDescriptor, ComponentFactory};
pub use serializer::{DefaultSerializer, MessageConvert, MsgSerializer, Serializer};
