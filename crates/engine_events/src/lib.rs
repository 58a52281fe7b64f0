//! Editor notifications and the channel that carries them.

pub mod channel;
pub mod error;
pub mod events;

pub use channel::{EventChannel, EventChannelConfig, EventSubscriber};
pub use error::EventError;
pub use events::{
    DeselectAllEntities, EntitiesSelected, EventKind, GuiEvent, ModelEditorAddEntity,
    NewRemovedEntities, TransformControlModeActive, VisualPlugin, USER_EVENT_BASE,
};
