//! Load-time registration of component types.
//!
//! [`register_component!`](crate::register_component) installs a component
//! type into [`ComponentFactory::global`] from a static constructor that runs
//! before `main`. The factory is created lazily by whichever constructor gets
//! there first, so declarations never depend on one another's order.

use crate::component::BaseComponent;
use crate::factory::ComponentFactory;

#[doc(hidden)]
pub use ctor;

/// Register `C` under `name` in the global factory, aborting on conflict.
///
/// Called from the static constructor generated by
/// [`register_component!`](crate::register_component). A conflicting name is
/// a build configuration defect, so it panics rather than returning.
#[doc(hidden)]
pub fn register_static<C: BaseComponent + Default>(name: &'static str) {
    if let Err(err) = ComponentFactory::global().register::<C>(name) {
        panic!("component registration failed: {err}");
    }
}

/// Register a component type in the global factory at load time.
///
/// ```rust
/// use engine_component::{Component, ComponentFactory, register_component};
///
/// pub enum MassTag {}
/// pub type Mass = Component<f64, MassTag>;
///
/// register_component!("Mass", Mass);
///
/// fn main() {
///     assert!(ComponentFactory::global().has_type("Mass"));
/// }
/// ```
///
/// Declaring the same `(name, type)` pair twice is harmless. Declaring one
/// name for two types aborts the process during start-up.
#[macro_export]
macro_rules! register_component {
    ($name:expr, $component:ty) => {
        const _: () = {
            #[$crate::registration::ctor::ctor]
            fn register() {
                $crate::registration::register_static::<$component>($name);
            }
        };
    };
}
