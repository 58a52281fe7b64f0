//! JSON scene files.
//!
//! ```json
//! {
//!   "entities": [
//!     { "id": 1, "components": { "Name": { "data": "box" } } }
//!   ]
//! }
//! ```
//!
//! Each component value is the JSON form of that component's wire message.
//! It is re-encoded as MessagePack and handed to the factory by name.

use std::collections::BTreeMap;

use engine_component::{BaseComponent, ComponentFactory, Entity, FactoryError};
use engine_msgs::ComponentRecord;
use serde::Deserialize;
use tracing::debug;

/// Errors raised while loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid scene JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{entity}: component {component}: cannot encode value: {source}")]
    Encode {
        entity: Entity,
        component: String,
        source: rmp_serde::encode::Error,
    },

    #[error("{entity}: component {component}: {source}")]
    Component {
        entity: Entity,
        component: String,
        source: FactoryError,
    },
}

/// Scene file as written on disk.
#[derive(Debug, Deserialize)]
pub struct SceneFile {
    pub entities: Vec<EntityEntry>,
}

#[derive(Debug, Deserialize)]
pub struct EntityEntry {
    pub id: u64,
    #[serde(default)]
    pub components: BTreeMap<String, serde_json::Value>,
}

/// An entity with its decoded components.
#[derive(Debug)]
pub struct SceneEntity {
    pub entity: Entity,
    pub components: Vec<Box<dyn BaseComponent>>,
}

/// A fully decoded scene.
#[derive(Debug, Default)]
pub struct Scene {
    pub entities: Vec<SceneEntity>,
}

impl Scene {
    /// Parse `json` and decode every component through `factory`.
    pub fn load(factory: &ComponentFactory, json: &str) -> Result<Self, SceneError> {
        let file: SceneFile = serde_json::from_str(json)?;
        let mut scene = Scene::default();

        for entry in file.entities {
            let entity = Entity::from_raw(entry.id);
            let mut components = Vec::with_capacity(entry.components.len());
            for (name, value) in entry.components {
                let bytes = rmp_serde::to_vec_named(&value).map_err(|source| SceneError::Encode {
                    entity,
                    component: name.clone(),
                    source,
                })?;
                let component =
                    factory
                        .deserialize(&name, &bytes)
                        .map_err(|source| SceneError::Component {
                            entity,
                            component: name.clone(),
                            source,
                        })?;
                debug!(%entity, component = %name, "decoded component");
                components.push(component);
            }
            scene.entities.push(SceneEntity { entity, components });
        }

        Ok(scene)
    }

    /// Total number of components across all entities.
    pub fn component_count(&self) -> usize {
        self.entities.iter().map(|e| e.components.len()).sum()
    }

    /// Serialize every component into a transport record.
    pub fn records(&self, factory: &ComponentFactory) -> Result<Vec<ComponentRecord>, SceneError> {
        let mut records = Vec::with_capacity(self.component_count());
        for scene_entity in &self.entities {
            for component in &scene_entity.components {
                let wrap = |source| SceneError::Component {
                    entity: scene_entity.entity,
                    component: component.component_type_name().to_string(),
                    source,
                };
                let descriptor = factory
                    .name_of_component(component.as_ref())
                    .and_then(|name| factory.descriptor(name))
                    .map_err(wrap)?;
                let data = descriptor.serialize(component.as_ref()).map_err(wrap)?;
                records.push(ComponentRecord {
                    entity: scene_entity.entity,
                    component: descriptor.id(),
                    data,
                });
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use engine_component::SerializationError;
    use engine_components::{Name, SphericalCoordinates};

    use super::*;

    const SCENE: &str = r#"{
        "entities": [
            { "id": 1, "components": {
                "Name": { "data": "origin" },
                "SphericalCoordinates": { "latitude": 37.4, "longitude": -122.1, "elevation": 0.0 }
            } },
            { "id": 2 }
        ]
    }"#;

    #[test]
    fn test_load_scene() {
        let scene = Scene::load(ComponentFactory::global(), SCENE).unwrap();
        assert_eq!(scene.entities.len(), 2);
        assert_eq!(scene.component_count(), 2);

        let first = &scene.entities[0];
        assert_eq!(first.entity, Entity::from_raw(1));
        let name = first
            .components
            .iter()
            .find_map(|c| c.downcast_ref::<Name>())
            .unwrap();
        assert_eq!(name.data(), "origin");
        let coords = first
            .components
            .iter()
            .find_map(|c| c.downcast_ref::<SphericalCoordinates>())
            .unwrap();
        assert_eq!(coords.data().latitude_deg(), 37.4);
        assert_eq!(coords.data().longitude_deg(), -122.1);

        assert!(scene.entities[1].components.is_empty());
    }

    #[test]
    fn test_unknown_component_names_entity() {
        let json = r#"{ "entities": [ { "id": 7, "components": { "Nope": {} } } ] }"#;
        let err = Scene::load(ComponentFactory::global(), json).unwrap_err();
        match err {
            SceneError::Component {
                entity,
                component,
                source: FactoryError::NotFound(_),
            } => {
                assert_eq!(entity, Entity::from_raw(7));
                assert_eq!(component, "Nope");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_field_reported() {
        let json = r#"{ "entities": [ { "id": 3, "components": {
            "SphericalCoordinates": { "latitude": 1.0 }
        } } ] }"#;
        let err = Scene::load(ComponentFactory::global(), json).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Component {
                source: FactoryError::Serialization(SerializationError::MissingField("longitude")),
                ..
            }
        ));
        assert!(err.to_string().starts_with("Entity(3): component SphericalCoordinates"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Scene::load(ComponentFactory::global(), "{"),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_records_use_wire_ids() {
        let factory = ComponentFactory::global();
        let scene = Scene::load(factory, SCENE).unwrap();
        let records = scene.records(factory).unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.entity, Entity::from_raw(1));
            let restored = factory
                .deserialize(factory.name_of_id(record.component).unwrap(), &record.data)
                .unwrap();
            assert!(
                scene.entities[0]
                    .components
                    .iter()
                    .any(|c| c.eq_dyn(restored.as_ref()))
            );
        }
    }
}
