//! The name-indexed [`ComponentFactory`].
//!
//! The factory maps a stable string name to a [`ComponentDescriptor`]: the
//! set of type-erased operations (construct, identify, serialize,
//! deserialize) for one component type. Generic tooling such as scene
//! loaders or transport code goes through the factory when it only knows a
//! component by name; code that knows the concrete type uses
//! [`Component`](crate::Component) directly.
//!
//! ## Lifecycle
//!
//! The process-wide instance, [`ComponentFactory::global`], is created on
//! first touch and lives until the process exits. Entries are installed at
//! load time by [`register_component!`](crate::register_component) and are
//! never removed. Private instances from [`ComponentFactory::new`] behave the
//! same and are what tests use.
//!
//! ## Concurrency
//!
//! Three maps (name → descriptor, Rust type → name, wire id → name) sit behind
//! one [`RwLock`], so a registration updates all of them before any reader
//! can observe either direction. Lookups only take the read side and never
//! contend with one another.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::component::{BaseComponent, ComponentTypeId};
use crate::error::{FactoryError, SerializationError};

/// Builds a default-valued component.
pub type ConstructFn = fn() -> Box<dyn BaseComponent>;

/// Encodes a component through its serializer.
pub type SerializeFn = fn(&dyn BaseComponent) -> Result<Vec<u8>, SerializationError>;

/// Decodes bytes into an existing component, leaving it untouched on error.
pub type DeserializeFn = fn(&mut dyn BaseComponent, &[u8]) -> Result<(), SerializationError>;

/// One registry entry: everything the factory knows about a component type.
#[derive(Clone, Copy)]
pub struct ComponentDescriptor {
    name: &'static str,
    id: ComponentTypeId,
    type_id: TypeId,
    type_name: &'static str,
    construct: ConstructFn,
    serialize: SerializeFn,
    deserialize: DeserializeFn,
}

impl ComponentDescriptor {
    /// Assemble a descriptor from explicit operations.
    ///
    /// The wire id is always derived from `name`.
    #[must_use]
    pub fn new(
        name: &'static str,
        type_id: TypeId,
        type_name: &'static str,
        construct: ConstructFn,
        serialize: SerializeFn,
        deserialize: DeserializeFn,
    ) -> Self {
        Self {
            name,
            id: ComponentTypeId::from_name(name),
            type_id,
            type_name,
            construct,
            serialize,
            deserialize,
        }
    }

    /// The descriptor for component type `C` registered under `name`.
    #[must_use]
    pub fn of<C: BaseComponent + Default>(name: &'static str) -> Self {
        Self::new(
            name,
            TypeId::of::<C>(),
            std::any::type_name::<C>(),
            || Box::new(C::default()) as Box<dyn BaseComponent>,
            |component| component.serialize_dyn(),
            |component, bytes| component.deserialize_dyn(bytes),
        )
    }

    /// The registered name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The wire id, FNV-1a of [`name`](Self::name).
    #[must_use]
    pub fn id(&self) -> ComponentTypeId {
        self.id
    }

    /// The Rust type identity.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The Rust type name, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Build a default-valued instance.
    #[must_use]
    pub fn construct(&self) -> Box<dyn BaseComponent> {
        (self.construct)()
    }

    /// Serialize `component`, which must be of this descriptor's type.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TypeMismatch`] for a foreign handle, or the
    /// serializer's error.
    pub fn serialize(&self, component: &dyn BaseComponent) -> Result<Vec<u8>, FactoryError> {
        self.check_type(component)?;
        Ok((self.serialize)(component)?)
    }

    /// Deserialize `bytes` into `component`, which must be of this
    /// descriptor's type. On error the component keeps its value.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TypeMismatch`] for a foreign handle, or the
    /// serializer's error.
    pub fn deserialize(
        &self,
        component: &mut dyn BaseComponent,
        bytes: &[u8],
    ) -> Result<(), FactoryError> {
        self.check_type(component)?;
        Ok((self.deserialize)(component, bytes)?)
    }

    fn check_type(&self, component: &dyn BaseComponent) -> Result<(), FactoryError> {
        if component.component_type() == self.type_id {
            Ok(())
        } else {
            Err(FactoryError::TypeMismatch {
                name: self.name,
                expected: self.type_name,
                found: component.component_type_name(),
            })
        }
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct Registry {
    by_name: HashMap<&'static str, ComponentDescriptor>,
    by_type: HashMap<TypeId, &'static str>,
    by_id: HashMap<ComponentTypeId, &'static str>,
}

impl Registry {
    fn duplicate(
        &self,
        attempted: &ComponentDescriptor,
        existing_name: &'static str,
    ) -> FactoryError {
        FactoryError::DuplicateRegistration {
            name: attempted.name,
            attempted: attempted.type_name,
            existing_name,
            existing: self
                .by_name
                .get(existing_name)
                .map_or("<unknown>", |d| d.type_name),
        }
    }
}

static GLOBAL: LazyLock<ComponentFactory> = LazyLock::new(ComponentFactory::new);

/// Registry of component types, keyed by name, Rust type, and wire id.
#[derive(Debug, Default)]
pub struct ComponentFactory {
    registry: RwLock<Registry>,
}

impl ComponentFactory {
    /// Create an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide factory populated by
    /// [`register_component!`](crate::register_component).
    #[must_use]
    pub fn global() -> &'static ComponentFactory {
        &GLOBAL
    }

    /// Register component type `C` under `name`.
    ///
    /// Registering the same `(name, C)` pair again is a no-op that returns
    /// the existing id.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::DuplicateRegistration`] if `name` is bound to
    /// another type, `C` is bound to another name, or `name` hashes to the
    /// wire id of another name.
    pub fn register<C: BaseComponent + Default>(
        &self,
        name: &'static str,
    ) -> Result<ComponentTypeId, FactoryError> {
        self.register_descriptor(ComponentDescriptor::of::<C>(name))
    }

    /// Install a prepared descriptor. Same rules as [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TypeMismatch`] if the descriptor's constructor
    /// does not build its declared type, or
    /// [`FactoryError::DuplicateRegistration`] on any conflict.
    pub fn register_descriptor(
        &self,
        descriptor: ComponentDescriptor,
    ) -> Result<ComponentTypeId, FactoryError> {
        let constructed = descriptor.construct();
        if constructed.component_type() != descriptor.type_id {
            return Err(FactoryError::TypeMismatch {
                name: descriptor.name,
                expected: descriptor.type_name,
                found: constructed.component_type_name(),
            });
        }

        let mut registry = self.registry.write();

        if let Some(existing) = registry.by_name.get(descriptor.name) {
            if existing.type_id == descriptor.type_id {
                trace!(name = descriptor.name, "component already registered");
                return Ok(existing.id);
            }
            return Err(registry.duplicate(&descriptor, existing.name));
        }
        if let Some(&existing_name) = registry.by_type.get(&descriptor.type_id) {
            return Err(registry.duplicate(&descriptor, existing_name));
        }
        if let Some(&existing_name) = registry.by_id.get(&descriptor.id) {
            return Err(registry.duplicate(&descriptor, existing_name));
        }

        registry.by_type.insert(descriptor.type_id, descriptor.name);
        registry.by_id.insert(descriptor.id, descriptor.name);
        registry.by_name.insert(descriptor.name, descriptor);
        debug!(
            name = descriptor.name,
            id = %descriptor.id,
            ty = descriptor.type_name,
            "registered component"
        );
        Ok(descriptor.id)
    }

    /// The descriptor registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::NotFound`] for an unknown name.
    pub fn descriptor(&self, name: &str) -> Result<ComponentDescriptor, FactoryError> {
        self.registry
            .read()
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| FactoryError::NotFound(name.to_string()))
    }

    /// The descriptor registered for wire id `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::IdNotFound`] for an unknown id.
    pub fn descriptor_by_id(&self, id: ComponentTypeId) -> Result<ComponentDescriptor, FactoryError> {
        let registry = self.registry.read();
        registry
            .by_id
            .get(&id)
            .and_then(|name| registry.by_name.get(name))
            .copied()
            .ok_or(FactoryError::IdNotFound(id))
    }

    fn descriptor_by_type(&self, type_id: TypeId) -> Option<ComponentDescriptor> {
        let registry = self.registry.read();
        registry
            .by_type
            .get(&type_id)
            .and_then(|name| registry.by_name.get(name))
            .copied()
    }

    /// Construct a default-valued instance of the component named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::NotFound`] for an unknown name.
    pub fn construct(&self, name: &str) -> Result<Box<dyn BaseComponent>, FactoryError> {
        Ok(self.descriptor(name)?.construct())
    }

    /// Construct a default-valued instance of the component with wire id `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::IdNotFound`] for an unknown id.
    pub fn construct_by_id(&self, id: ComponentTypeId) -> Result<Box<dyn BaseComponent>, FactoryError> {
        Ok(self.descriptor_by_id(id)?.construct())
    }

    /// Returns `true` if a component is registered under `name`.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.registry.read().by_name.contains_key(name)
    }

    /// Returns `true` if a component is registered for wire id `id`.
    #[must_use]
    pub fn has_type_id(&self, id: ComponentTypeId) -> bool {
        self.registry.read().by_id.contains_key(&id)
    }

    /// The name registered for Rust type `type_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TypeNotFound`] if the type was never registered.
    pub fn name_of(&self, type_id: TypeId) -> Result<&'static str, FactoryError> {
        self.registry
            .read()
            .by_type
            .get(&type_id)
            .copied()
            .ok_or_else(|| FactoryError::TypeNotFound(format!("{type_id:?}")))
    }

    /// The name registered for the concrete type behind `component`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TypeNotFound`] if the type was never registered.
    pub fn name_of_component(&self, component: &dyn BaseComponent) -> Result<&'static str, FactoryError> {
        self.name_of(component.component_type()).map_err(|_| {
            FactoryError::TypeNotFound(component.component_type_name().to_string())
        })
    }

    /// The name registered for wire id `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::IdNotFound`] for an unknown id.
    pub fn name_of_id(&self, id: ComponentTypeId) -> Result<&'static str, FactoryError> {
        self.registry
            .read()
            .by_id
            .get(&id)
            .copied()
            .ok_or(FactoryError::IdNotFound(id))
    }

    /// The wire id of component type `C`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TypeNotFound`] if `C` was never registered.
    pub fn type_id_of<C: BaseComponent>(&self) -> Result<ComponentTypeId, FactoryError> {
        self.descriptor_by_type(TypeId::of::<C>())
            .map(|d| d.id)
            .ok_or_else(|| FactoryError::TypeNotFound(std::any::type_name::<C>().to_string()))
    }

    /// Serialize any registered component through its descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TypeNotFound`] for an unregistered type, or the
    /// serializer's error.
    pub fn serialize(&self, component: &dyn BaseComponent) -> Result<Vec<u8>, FactoryError> {
        let descriptor = self
            .descriptor_by_type(component.component_type())
            .ok_or_else(|| FactoryError::TypeNotFound(component.component_type_name().to_string()))?;
        descriptor.serialize(component)
    }

    /// Construct the component named `name` and fill it from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::NotFound`] for an unknown name, or the
    /// serializer's error.
    pub fn deserialize(&self, name: &str, bytes: &[u8]) -> Result<Box<dyn BaseComponent>, FactoryError> {
        let descriptor = self.descriptor(name)?;
        let mut component = descriptor.construct();
        descriptor.deserialize(component.as_mut(), bytes)?;
        Ok(component)
    }

    /// Deserialize `bytes` into an existing component registered as `name`.
    /// On error the component keeps its value.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::NotFound`], [`FactoryError::TypeMismatch`], or
    /// the serializer's error.
    pub fn deserialize_into(
        &self,
        name: &str,
        component: &mut dyn BaseComponent,
        bytes: &[u8],
    ) -> Result<(), FactoryError> {
        self.descriptor(name)?.deserialize(component, bytes)
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.registry.read().by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// All registered descriptors, sorted by name.
    #[must_use]
    pub fn descriptors(&self) -> Vec<ComponentDescriptor> {
        let mut descriptors: Vec<_> = self.registry.read().by_name.values().copied().collect();
        descriptors.sort_unstable_by_key(|d| d.name);
        descriptors
    }

    /// Number of registered component types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.read().by_name.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.read().by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::component::Component;
    use crate::serializer::{MessageConvert, MsgSerializer};

    enum HealthTag {}
    enum ShieldTag {}
    enum LabelTag {}

    type Health = Component<f32, HealthTag>;
    type Shield = Component<f32, ShieldTag>;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Label(String);

    #[derive(Serialize, Deserialize)]
    struct LabelMsg {
        #[serde(default)]
        text: Option<String>,
    }

    impl MessageConvert<LabelMsg> for Label {
        fn to_message(&self) -> LabelMsg {
            LabelMsg {
                text: Some(self.0.clone()),
            }
        }

        fn from_message(message: LabelMsg) -> Result<Self, SerializationError> {
            message
                .text
                .map(Label)
                .ok_or(SerializationError::MissingField("text"))
        }
    }

    type LabelComponent = Component<Label, LabelTag, MsgSerializer<LabelMsg>>;

    fn factory() -> ComponentFactory {
        let factory = ComponentFactory::new();
        factory.register::<Health>("Health").unwrap();
        factory.register::<Shield>("Shield").unwrap();
        factory.register::<LabelComponent>("Label").unwrap();
        factory
    }

    #[test]
    fn test_register_and_lookup() {
        let factory = factory();
        assert_eq!(factory.len(), 3);
        assert!(factory.has_type("Health"));
        assert!(!factory.has_type("Mana"));
        assert!(factory.has_type_id(ComponentTypeId::from_name("Shield")));
        assert_eq!(factory.names(), vec!["Health", "Label", "Shield"]);
    }

    #[test]
    fn test_register_same_pair_is_idempotent() {
        let factory = factory();
        let id = factory.register::<Health>("Health").unwrap();
        assert_eq!(id, ComponentTypeId::from_name("Health"));
        assert_eq!(factory.len(), 3);
    }

    #[test]
    fn test_register_name_with_different_type_fails() {
        let factory = factory();
        let err = factory.register::<Shield>("Health").unwrap_err();
        assert!(matches!(
            err,
            FactoryError::DuplicateRegistration {
                name: "Health",
                existing_name: "Health",
                ..
            }
        ));
        assert_eq!(factory.name_of(TypeId::of::<Health>()).unwrap(), "Health");
    }

    #[test]
    fn test_register_type_under_second_name_fails() {
        let factory = factory();
        let err = factory.register::<Health>("Hitpoints").unwrap_err();
        assert!(matches!(
            err,
            FactoryError::DuplicateRegistration {
                name: "Hitpoints",
                existing_name: "Health",
                ..
            }
        ));
        assert!(!factory.has_type("Hitpoints"));
    }

    #[test]
    fn test_register_descriptor_with_foreign_constructor_fails() {
        let factory = ComponentFactory::new();
        let health = ComponentDescriptor::of::<Health>("Health");
        let mismatched = ComponentDescriptor::new(
            "Health",
            TypeId::of::<Health>(),
            std::any::type_name::<Health>(),
            || Box::new(Shield::default()) as Box<dyn BaseComponent>,
            |component| component.serialize_dyn(),
            |component, bytes| component.deserialize_dyn(bytes),
        );
        assert!(matches!(
            factory.register_descriptor(mismatched),
            Err(FactoryError::TypeMismatch { name: "Health", .. })
        ));
        assert!(factory.is_empty());

        factory.register_descriptor(health).unwrap();
        let handle = factory.construct("Health").unwrap();
        assert_eq!(factory.name_of(handle.component_type()).unwrap(), "Health");
    }

    #[test]
    fn test_construct_unknown_name() {
        let factory = factory();
        assert!(matches!(
            factory.construct("unknown-name"),
            Err(FactoryError::NotFound(name)) if name == "unknown-name"
        ));
        assert!(matches!(
            factory.construct_by_id(ComponentTypeId(7)),
            Err(FactoryError::IdNotFound(ComponentTypeId(7)))
        ));
    }

    #[test]
    fn test_construct_yields_default_value() {
        let factory = factory();
        let handle = factory.construct("Health").unwrap();
        let health = handle.downcast_ref::<Health>().unwrap();
        assert_eq!(*health.data(), 0.0);

        let handle = factory.construct_by_id(ComponentTypeId::from_name("Label")).unwrap();
        assert_eq!(handle.downcast_ref::<LabelComponent>().unwrap().data(), &Label::default());
    }

    #[test]
    fn test_name_of_constructed_instance_roundtrips() {
        let factory = factory();
        for name in factory.names() {
            let handle = factory.construct(name).unwrap();
            assert_eq!(factory.name_of(handle.component_type()).unwrap(), name);
            assert_eq!(factory.name_of_component(handle.as_ref()).unwrap(), name);
            assert_eq!(
                factory.name_of_id(ComponentTypeId::from_name(name)).unwrap(),
                name
            );
        }
    }

    #[test]
    fn test_name_of_unregistered_type() {
        enum ManaTag {}
        type Mana = Component<f32, ManaTag>;

        let factory = factory();
        assert!(matches!(
            factory.name_of(TypeId::of::<Mana>()),
            Err(FactoryError::TypeNotFound(_))
        ));
        assert!(matches!(
            factory.type_id_of::<Mana>(),
            Err(FactoryError::TypeNotFound(_))
        ));
        assert!(matches!(
            factory.serialize(&Mana::new(1.0)),
            Err(FactoryError::TypeNotFound(_))
        ));
    }

    #[test]
    fn test_type_id_of_registered_type() {
        let factory = factory();
        assert_eq!(
            factory.type_id_of::<Shield>().unwrap(),
            ComponentTypeId::from_name("Shield")
        );
    }

    #[test]
    fn test_generic_serialize_deserialize() {
        let factory = factory();
        let label = LabelComponent::new(Label("crate".into()));
        let bytes = factory.serialize(&label).unwrap();

        let handle = factory.deserialize("Label", &bytes).unwrap();
        assert!(handle.eq_dyn(&label));
    }

    #[test]
    fn test_failed_deserialize_leaves_value() {
        let factory = factory();
        let mut handle: Box<dyn BaseComponent> = Box::new(LabelComponent::new(Label("keep".into())));
        let missing = rmp_serde::to_vec_named(&LabelMsg { text: None }).unwrap();

        let err = factory
            .deserialize_into("Label", handle.as_mut(), &missing)
            .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Serialization(SerializationError::MissingField("text"))
        ));
        assert_eq!(
            handle.downcast_ref::<LabelComponent>().unwrap().data(),
            &Label("keep".into())
        );
    }

    #[test]
    fn test_deserialize_into_wrong_type() {
        let factory = factory();
        let mut shield = Shield::new(1.0);
        let bytes = Health::new(2.0).serialize().unwrap();
        assert!(matches!(
            factory.deserialize_into("Health", &mut shield, &bytes),
            Err(FactoryError::TypeMismatch { name: "Health", .. })
        ));
        assert_eq!(*shield.data(), 1.0);
    }

    #[test]
    fn test_concurrent_readers() {
        let factory = factory();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        let handle = factory.construct("Shield").unwrap();
                        assert_eq!(factory.name_of_component(handle.as_ref()).unwrap(), "Shield");
                        assert!(factory.has_type("Health"));
                    }
                });
            }
        });
    }
}
