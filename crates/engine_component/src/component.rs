//! The typed [`Component`] wrapper and its type-erased face, [`BaseComponent`].
//!
//! A component kind is the triple *(payload, tag, serializer)*. The payload is
//! the per-entity value, the tag is a zero-sized marker that keeps two
//! components wrapping the same payload apart, and the serializer decides how
//! the payload travels over the wire:
//!
//! ```rust
//! use engine_component::{Component, DefaultSerializer};
//!
//! pub enum HealthTag {}
//! pub enum ShieldTag {}
//!
//! pub type Health = Component<f32, HealthTag, DefaultSerializer>;
//! pub type Shield = Component<f32, ShieldTag, DefaultSerializer>;
//!
//! let hp = Health::new(80.0);
//! assert_eq!(*hp.data(), 80.0);
//! ```
//!
//! ## Polyglot Type Identity
//!
//! [`ComponentTypeId`] is derived from the component's registered **string
//! name** using the FNV-1a 64-bit hash algorithm. This is deterministic and
//! language-neutral, so any peer can compute the same ID for a given name.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::SerializationError;
use crate::serializer::{DefaultSerializer, Serializer};

/// A unique identifier for a component type, derived from its registered
/// name using the FNV-1a 64-bit hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] for a registered component name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// A typed component: payload `P`, uniqueness tag `Tag`, serializer `S`.
///
/// Equality compares payloads only. The wrapper is not synchronised; whoever
/// stores it decides who may touch it and when.
pub struct Component<P, Tag, S = DefaultSerializer> {
    data: P,
    _kind: PhantomData<fn() -> (Tag, S)>,
}

impl<P, Tag, S> Component<P, Tag, S> {
    /// Wrap a payload value.
    #[must_use]
    pub const fn new(data: P) -> Self {
        Self {
            data,
            _kind: PhantomData,
        }
    }

    /// The stored payload.
    #[must_use]
    pub fn data(&self) -> &P {
        &self.data
    }

    /// Mutable access to the stored payload.
    pub fn data_mut(&mut self) -> &mut P {
        &mut self.data
    }

    /// Replace the stored payload.
    pub fn set_data(&mut self, data: P) {
        self.data = data;
    }

    /// Unwrap the payload.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.data
    }
}

impl<P, Tag, S> Component<P, Tag, S>
where
    S: Serializer<P>,
{
    /// Encode the payload with the bound serializer.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::Encode`] if the encoder fails.
    pub fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        S::serialize(&self.data)
    }

    /// Replace the payload with one decoded from `bytes`.
    ///
    /// On error the current payload is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's [`SerializationError`].
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<(), SerializationError> {
        self.data = S::deserialize(bytes)?;
        Ok(())
    }

    /// Build a new component from `bytes`.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's [`SerializationError`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        S::deserialize(bytes).map(Self::new)
    }
}

impl<P: Default, Tag, S> Default for Component<P, Tag, S> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P: Clone, Tag, S> Clone for Component<P, Tag, S> {
    fn clone(&self) -> Self {
        Self::new(self.data.clone())
    }
}

impl<P: PartialEq, Tag, S> PartialEq for Component<P, Tag, S> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<P: fmt::Debug, Tag, S> fmt::Debug for Component<P, Tag, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("kind", &std::any::type_name::<Tag>())
            .field("data", &self.data)
            .finish()
    }
}

impl<P, Tag, S> From<P> for Component<P, Tag, S> {
    fn from(data: P) -> Self {
        Self::new(data)
    }
}

/// Type-erased view of a component instance.
///
/// Every [`Component`] whose payload is `Clone + PartialEq + Debug` and whose
/// serializer fits implements this trait, so generic tooling can compare,
/// copy, and (de)serialize components it only knows by name.
pub trait BaseComponent: Any + Send + Sync + fmt::Debug {
    /// The Rust type identity of the concrete component.
    fn component_type(&self) -> TypeId;

    /// The Rust type name of the concrete component, for diagnostics.
    fn component_type_name(&self) -> &'static str;

    /// Encode the payload with the component's serializer.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::Encode`] if the encoder fails.
    fn serialize_dyn(&self) -> Result<Vec<u8>, SerializationError>;

    /// Replace the payload with one decoded from `bytes`; on error the
    /// current payload is untouched.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's [`SerializationError`].
    fn deserialize_dyn(&mut self, bytes: &[u8]) -> Result<(), SerializationError>;

    /// Payload equality against another handle; `false` across types.
    fn eq_dyn(&self, other: &dyn BaseComponent) -> bool;

    /// Deep copy behind a fresh box.
    fn clone_box(&self) -> Box<dyn BaseComponent>;

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owning upcast for downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<P, Tag, S> BaseComponent for Component<P, Tag, S>
where
    P: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
    Tag: 'static,
    S: Serializer<P>,
{
    fn component_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn component_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn serialize_dyn(&self) -> Result<Vec<u8>, SerializationError> {
        self.serialize()
    }

    fn deserialize_dyn(&mut self, bytes: &[u8]) -> Result<(), SerializationError> {
        self.deserialize(bytes)
    }

    fn eq_dyn(&self, other: &dyn BaseComponent) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    fn clone_box(&self) -> Box<dyn BaseComponent> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn BaseComponent {
    /// Returns `true` if the handle holds a `C`.
    #[must_use]
    pub fn is<C: BaseComponent>(&self) -> bool {
        self.as_any().is::<C>()
    }

    /// Borrow the handle as a concrete component type.
    #[must_use]
    pub fn downcast_ref<C: BaseComponent>(&self) -> Option<&C> {
        self.as_any().downcast_ref::<C>()
    }

    /// Mutably borrow the handle as a concrete component type.
    pub fn downcast_mut<C: BaseComponent>(&mut self) -> Option<&mut C> {
        self.as_any_mut().downcast_mut::<C>()
    }

    /// Convert a boxed handle into a concrete component, handing the box back
    /// unchanged if the type does not match.
    ///
    /// # Errors
    ///
    /// Returns the original box when it does not hold a `C`.
    pub fn downcast<C: BaseComponent>(self: Box<Self>) -> Result<Box<C>, Box<Self>> {
        if self.is::<C>() {
            // The `is` check above guarantees this succeeds.
            Ok(self.into_any().downcast::<C>().unwrap_or_else(|_| unreachable!()))
        } else {
            Err(self)
        }
    }
}

impl PartialEq for dyn BaseComponent {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}

impl Clone for Box<dyn BaseComponent> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum HealthTag {}
    enum ShieldTag {}

    type Health = Component<f32, HealthTag>;
    type Shield = Component<f32, ShieldTag>;

    #[test]
    fn test_component_type_id_from_name_is_deterministic() {
        let id = ComponentTypeId::from_name("Health");
        assert_eq!(id, ComponentTypeId::from_name("Health"));
        assert_ne!(id, ComponentTypeId::from_name("Velocity"));
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of empty string is the offset basis itself.
        assert_eq!(
            ComponentTypeId::from_name(""),
            ComponentTypeId(0xcbf2_9ce4_8422_2325)
        );
        // Published FNV-1a 64 test vector for "a".
        assert_eq!(
            ComponentTypeId::from_name("a"),
            ComponentTypeId(0xaf63_dc4c_8601_ec8c)
        );
    }

    #[test]
    fn test_equal_payloads_compare_equal() {
        assert_eq!(Health::new(10.0), Health::new(10.0));
        assert_ne!(Health::new(10.0), Health::new(11.0));
    }

    #[test]
    fn test_set_data_replaces_payload() {
        let mut hp = Health::default();
        assert_eq!(*hp.data(), 0.0);
        hp.set_data(42.0);
        assert_eq!(*hp.data(), 42.0);
        *hp.data_mut() += 1.0;
        assert_eq!(hp.into_inner(), 43.0);
    }

    #[test]
    fn test_tags_make_distinct_types() {
        let hp = Health::new(5.0);
        let shield = Shield::new(5.0);
        assert_ne!(hp.component_type(), shield.component_type());
        assert!(!hp.eq_dyn(&shield));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let hp = Health::new(80.0);
        let bytes = hp.serialize().unwrap();
        let restored = Health::from_bytes(&bytes).unwrap();
        assert_eq!(hp, restored);
    }

    #[test]
    fn test_failed_deserialize_keeps_value() {
        let mut hp = Health::new(80.0);
        assert!(hp.deserialize(&[0xc1]).is_err());
        assert_eq!(*hp.data(), 80.0);
    }

    #[test]
    fn test_downcast_through_handle() {
        let handle: Box<dyn BaseComponent> = Box::new(Health::new(3.0));
        assert!(handle.is::<Health>());
        assert!(handle.downcast_ref::<Shield>().is_none());
        assert_eq!(*handle.downcast_ref::<Health>().unwrap().data(), 3.0);

        let handle = handle.downcast::<Shield>().unwrap_err();
        let hp = handle.downcast::<Health>().unwrap();
        assert_eq!(*hp.data(), 3.0);
    }

    #[test]
    fn test_boxed_handles_compare_and_clone() {
        let a: Box<dyn BaseComponent> = Box::new(Health::new(1.0));
        let b = a.clone();
        assert!(*a == *b);
        let c: Box<dyn BaseComponent> = Box::new(Health::new(2.0));
        assert!(*a != *c);
    }
}
