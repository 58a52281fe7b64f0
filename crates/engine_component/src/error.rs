//! Component-layer error types.

use crate::component::ComponentTypeId;

/// Errors produced while converting a payload to or from its transport
/// message.
///
/// A failed conversion never yields a partially constructed payload.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// Failed to encode a message to MessagePack.
    #[error("failed to encode message: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a message from MessagePack.
    #[error("failed to decode message: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// A field the payload cannot be built without was absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field was present but outside the payload's valid domain.
    #[error("field `{field}` out of domain: {reason}")]
    OutOfDomain {
        /// Name of the offending message field.
        field: &'static str,
        /// Human-readable description of the violated constraint.
        reason: String,
    },
}

impl SerializationError {
    /// Shorthand for [`SerializationError::OutOfDomain`].
    #[must_use]
    pub fn out_of_domain(field: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfDomain {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors returned by the [`ComponentFactory`](crate::ComponentFactory).
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// A name, Rust type, or wire id is already bound to something else.
    ///
    /// Raised at load time; a registration declaration treats it as fatal.
    #[error(
        "duplicate registration of `{name}` ({attempted}): already bound to `{existing_name}` ({existing})"
    )]
    DuplicateRegistration {
        /// The name being registered.
        name: &'static str,
        /// Rust type name of the component being registered.
        attempted: &'static str,
        /// The name of the conflicting entry.
        existing_name: &'static str,
        /// Rust type name of the conflicting entry.
        existing: &'static str,
    },

    /// No component is registered under the requested name.
    #[error("no component registered under name `{0}`")]
    NotFound(String),

    /// No component is registered for the requested wire id.
    #[error("no component registered for {0:?}")]
    IdNotFound(ComponentTypeId),

    /// The requested Rust type was never registered.
    #[error("component type `{0}` is not registered")]
    TypeNotFound(String),

    /// A type-erased handle is not the type registered under `name`.
    #[error("component `{name}` expects `{expected}`, got `{found}`")]
    TypeMismatch {
        /// The registered name.
        name: &'static str,
        /// Rust type name registered under `name`.
        expected: &'static str,
        /// Rust type name of the handle that was passed in.
        found: &'static str,
    },

    /// Payload conversion failed.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}
