//! Transport message types.
//!
//! These are the wire shapes of component payloads. Every field that a peer
//! may legitimately omit is an `Option` (or carries a serde default), and is
//! skipped when absent so older and newer peers can talk to each other.

use engine_component::{ComponentTypeId, Entity};
use serde::{Deserialize, Serialize};

// ── Geometry ────────────────────────────────────────────────────────────────

/// A 3D vector of doubles. Absent components read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3d {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

fn one() -> f64 {
    1.0
}

/// A quaternion. Absent components read as the identity rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "one")]
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

/// A pose. A missing position is the origin; a missing orientation is the
/// identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Optional frame name; not part of any payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vector3d>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Quaternion>,
}

// ── Geodesy ─────────────────────────────────────────────────────────────────

/// Reference surface on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceModel {
    #[default]
    EarthWgs84,
    MoonScs,
}

/// Geodetic origin of a world.
///
/// `latitude` and `longitude` are required. `elevation` and `heading`
/// default to zero and `surface_model` to [`SurfaceModel::EarthWgs84`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SphericalCoordinates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_model: Option<SurfaceModel>,
    /// Degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Metres above the reference surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    /// Degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
}

// ── Scalars ─────────────────────────────────────────────────────────────────

/// A single string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringMsg {
    pub data: String,
}

/// A single boolean. Absent reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Boolean {
    #[serde(default)]
    pub data: bool,
}

// ── Generic component transport ─────────────────────────────────────────────

/// One serialized component of one entity, addressed by wire id.
///
/// Used when shipping components generically, e.g. dumping a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// The entity this component belongs to.
    pub entity: Entity,
    /// Wire id of the component type.
    pub component: ComponentTypeId,
    /// Bytes produced by the component's serializer.
    pub data: Vec<u8>,
}
