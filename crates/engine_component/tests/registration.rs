//! Load-time registration through the global factory.

use engine_component::{Component, ComponentFactory, ComponentTypeId, register_component};

enum MassTag {}
enum ChargeTag {}

type Mass = Component<f64, MassTag>;
type Charge = Component<f64, ChargeTag>;

register_component!("test.Mass", Mass);
register_component!("test.Charge", Charge);
// Repeating a declaration is harmless.
register_component!("test.Mass", Mass);

#[test]
fn test_declarations_run_before_main() {
    let factory = ComponentFactory::global();
    assert!(factory.has_type("test.Mass"));
    assert!(factory.has_type("test.Charge"));
    assert!(factory.has_type_id(ComponentTypeId::from_name("test.Mass")));
}

#[test]
fn test_global_construct_and_name_of() {
    let factory = ComponentFactory::global();
    let handle = factory.construct("test.Charge").unwrap();
    assert!(handle.is::<Charge>());
    assert_eq!(factory.name_of(handle.component_type()).unwrap(), "test.Charge");
    assert_eq!(
        factory.type_id_of::<Mass>().unwrap(),
        ComponentTypeId::from_name("test.Mass")
    );
}

#[test]
fn test_global_rejects_conflicting_runtime_registration() {
    let factory = ComponentFactory::global();
    assert!(factory.register::<Charge>("test.Mass").is_err());
    assert!(factory.register::<Mass>("test.Mass").is_ok());
}

#[test]
fn test_global_generic_roundtrip() {
    let factory = ComponentFactory::global();
    let mass = Mass::new(12.5);
    let bytes = factory.serialize(&mass).unwrap();
    let handle = factory.deserialize("test.Mass", &bytes).unwrap();
    assert_eq!(*handle.downcast_ref::<Mass>().unwrap().data(), 12.5);
}
