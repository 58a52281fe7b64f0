//! Entity identifiers.
//!
//! An [`Entity`] is a lightweight `u64` identifier with no inherent data. The
//! storage engine hands them out; this crate only needs them so components
//! and events can refer to other entities.

use serde::{Deserialize, Serialize};

/// A unique entity identifier.
///
/// Entities are pure identifiers. Components attached to them give them
/// meaning.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Entity(pub u64);

impl Entity {
    /// The null / invalid entity sentinel.
    pub const INVALID: Entity = Entity(0);

    /// Create an entity from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) entity.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let e = Entity::from_raw(42);
        assert_eq!(e.id(), 42);
        assert!(e.is_valid());
    }

    #[test]
    fn test_default_entity_is_invalid() {
        assert_eq!(Entity::default(), Entity::INVALID);
        assert!(!Entity::INVALID.is_valid());
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::from_raw(7).to_string(), "Entity(7)");
    }
}
