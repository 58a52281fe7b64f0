//! Notification payloads.
//!
//! Plain data carriers for what the editor UI tells the simulation (and vice
//! versa): selection changes, entity creation and removal, transform-tool
//! state, and editor requests. They carry no behaviour and assume nothing
//! about any toolkit's event loop.
//!
//! Each kind keeps the numeric code the editor protocol assigns it, an offset
//! from [`USER_EVENT_BASE`].

use std::collections::{BTreeMap, BTreeSet};

use engine_component::Entity;
use serde::{Deserialize, Serialize};

/// First code available to application-defined events.
pub const USER_EVENT_BASE: u16 = 1000;

/// Discriminant of a [`GuiEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum EventKind {
    EntitiesSelected = 1,
    DeselectAllEntities = 2,
    GuiNewRemovedEntities = 3,
    NewRemovedEntities = 4,
    TransformControlModeActive = 6,
    ModelEditorAddEntity = 7,
    VisualPlugin = 8,
}

impl EventKind {
    /// The protocol code of this kind.
    #[must_use]
    pub const fn code(self) -> u16 {
        USER_EVENT_BASE + self as u16
    }

    /// Look a kind up by protocol code.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code.checked_sub(USER_EVENT_BASE) {
            Some(1) => Some(Self::EntitiesSelected),
            Some(2) => Some(Self::DeselectAllEntities),
            Some(3) => Some(Self::GuiNewRemovedEntities),
            Some(4) => Some(Self::NewRemovedEntities),
            Some(6) => Some(Self::TransformControlModeActive),
            Some(7) => Some(Self::ModelEditorAddEntity),
            Some(8) => Some(Self::VisualPlugin),
            _ => None,
        }
    }
}

/// Entities were selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitiesSelected {
    entities: Vec<Entity>,
    from_user: bool,
}

impl EntitiesSelected {
    #[must_use]
    pub fn new(entities: Vec<Entity>, from_user: bool) -> Self {
        Self {
            entities,
            from_user,
        }
    }

    /// The selected entities, in selection order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// `true` if a user action caused the selection, `false` if code did.
    #[must_use]
    pub fn from_user(&self) -> bool {
        self.from_user
    }
}

/// Every entity was deselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeselectAllEntities {
    from_user: bool,
}

impl DeselectAllEntities {
    #[must_use]
    pub fn new(from_user: bool) -> Self {
        Self { from_user }
    }

    #[must_use]
    pub fn from_user(&self) -> bool {
        self.from_user
    }
}

/// Entities created and removed since the last notification.
///
/// Used both for changes requested by the GUI and for changes the
/// simulation reports back; [`GuiEvent`] keeps the two directions apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRemovedEntities {
    new_entities: BTreeSet<Entity>,
    removed_entities: BTreeSet<Entity>,
}

impl NewRemovedEntities {
    #[must_use]
    pub fn new(new_entities: BTreeSet<Entity>, removed_entities: BTreeSet<Entity>) -> Self {
        Self {
            new_entities,
            removed_entities,
        }
    }

    #[must_use]
    pub fn new_entities(&self) -> &BTreeSet<Entity> {
        &self.new_entities
    }

    #[must_use]
    pub fn removed_entities(&self) -> &BTreeSet<Entity> {
        &self.removed_entities
    }
}

/// The transform tool (translate, rotate, scale) was switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformControlModeActive {
    active: bool,
}

impl TransformControlModeActive {
    #[must_use]
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    /// `true` while a transform tool is active, `false` in selection mode.
    #[must_use]
    pub fn active(&self) -> bool {
        self.active
    }
}

/// Request to add an entity to the model being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEditorAddEntity {
    entity: String,
    entity_type: String,
    parent: Entity,
    data: BTreeMap<String, String>,
}

impl ModelEditorAddEntity {
    #[must_use]
    pub fn new(entity: impl Into<String>, entity_type: impl Into<String>, parent: Entity) -> Self {
        Self {
            entity: entity.into(),
            entity_type: entity_type.into(),
            parent,
            data: BTreeMap::new(),
        }
    }

    /// What to add, e.g. `"box"` or `"sensor"`.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Subtype of [`entity`](Self::entity), e.g. `"camera"`.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// The entity to attach the new one to.
    #[must_use]
    pub fn parent(&self) -> Entity {
        self.parent
    }

    /// Free-form key/value data for the added entity.
    #[must_use]
    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.data
    }
}

/// Request to load a visual plugin for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualPlugin {
    entity: Entity,
    element: String,
}

impl VisualPlugin {
    #[must_use]
    pub fn new(entity: Entity, element: impl Into<String>) -> Self {
        Self {
            entity,
            element: element.into(),
        }
    }

    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The plugin's description element, as raw markup.
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }
}

/// Any notification that travels over an [`EventChannel`](crate::EventChannel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuiEvent {
    EntitiesSelected(EntitiesSelected),
    DeselectAllEntities(DeselectAllEntities),
    /// Creation/removal requested by the GUI.
    GuiNewRemovedEntities(NewRemovedEntities),
    /// Creation/removal reported by the simulation.
    NewRemovedEntities(NewRemovedEntities),
    TransformControlModeActive(TransformControlModeActive),
    ModelEditorAddEntity(ModelEditorAddEntity),
    VisualPlugin(VisualPlugin),
}

impl GuiEvent {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GuiEvent::EntitiesSelected(_) => EventKind::EntitiesSelected,
            GuiEvent::DeselectAllEntities(_) => EventKind::DeselectAllEntities,
            GuiEvent::GuiNewRemovedEntities(_) => EventKind::GuiNewRemovedEntities,
            GuiEvent::NewRemovedEntities(_) => EventKind::NewRemovedEntities,
            GuiEvent::TransformControlModeActive(_) => EventKind::TransformControlModeActive,
            GuiEvent::ModelEditorAddEntity(_) => EventKind::ModelEditorAddEntity,
            GuiEvent::VisualPlugin(_) => EventKind::VisualPlugin,
        }
    }
}

impl From<EntitiesSelected> for GuiEvent {
    fn from(event: EntitiesSelected) -> Self {
        GuiEvent::EntitiesSelected(event)
    }
}

impl From<DeselectAllEntities> for GuiEvent {
    fn from(event: DeselectAllEntities) -> Self {
        GuiEvent::DeselectAllEntities(event)
    }
}

impl From<TransformControlModeActive> for GuiEvent {
    fn from(event: TransformControlModeActive) -> Self {
        GuiEvent::TransformControlModeActive(event)
    }
}

impl From<ModelEditorAddEntity> for GuiEvent {
    fn from(event: ModelEditorAddEntity) -> Self {
        GuiEvent::ModelEditorAddEntity(event)
    }
}

impl From<VisualPlugin> for GuiEvent {
    fn from(event: VisualPlugin) -> Self {
        GuiEvent::VisualPlugin(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(EventKind::EntitiesSelected.code(), 1001);
        assert_eq!(EventKind::VisualPlugin.code(), 1008);
        assert_eq!(EventKind::from_code(1006), Some(EventKind::TransformControlModeActive));
        assert_eq!(EventKind::from_code(1005), None);
        assert_eq!(EventKind::from_code(3), None);
    }

    #[test]
    fn test_kind_matches_variant() {
        let sets = NewRemovedEntities::new(BTreeSet::from([Entity(1)]), BTreeSet::new());
        assert_eq!(
            GuiEvent::GuiNewRemovedEntities(sets.clone()).kind(),
            EventKind::GuiNewRemovedEntities
        );
        assert_eq!(
            GuiEvent::NewRemovedEntities(sets).kind(),
            EventKind::NewRemovedEntities
        );
        let event: GuiEvent = DeselectAllEntities::new(true).into();
        assert_eq!(event.kind(), EventKind::DeselectAllEntities);
    }

    #[test]
    fn test_model_editor_data() {
        let mut add = ModelEditorAddEntity::new("sensor", "camera", Entity(4));
        add.data_mut().insert("uri".into(), "model://cam".into());
        assert_eq!(add.entity(), "sensor");
        assert_eq!(add.entity_type(), "camera");
        assert_eq!(add.parent(), Entity(4));
        assert_eq!(add.data().get("uri").map(String::as_str), Some("model://cam"));
    }

    #[test]
    fn test_selection_serialization_roundtrip() {
        let event: GuiEvent = EntitiesSelected::new(vec![Entity(2), Entity(9)], true).into();
        let bytes = rmp_serde::to_vec_named(&event).unwrap();
        let restored: GuiEvent = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(restored, event);
    }
}
