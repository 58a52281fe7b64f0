//! Serializer strategies.
//!
//! A [`Serializer`] turns a component payload into transport bytes and back.
//! Strategies are zero-sized types chosen per component at the type level, so
//! one strategy is written per (payload, message) pair and shared by every
//! component that wraps that payload.
//!
//! All strategies produce MessagePack with named fields, so message fields
//! that are optional may simply be absent on the wire.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SerializationError;

/// Conversion contract between a payload `P` and its transport bytes.
pub trait Serializer<P>: 'static {
    /// Encode `value` to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::Encode`] if the encoder fails.
    fn serialize(value: &P) -> Result<Vec<u8>, SerializationError>;

    /// Decode a payload from bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`SerializationError`] if the bytes are malformed, a
    /// required field is missing, or a value is out of the payload's domain.
    fn deserialize(bytes: &[u8]) -> Result<P, SerializationError>;
}

/// Conversion between a native payload and a transport message `M`.
///
/// Implementations must satisfy `from_message(to_message(p)) == p` for every
/// valid payload. Any lossy field must say so in its docs.
pub trait MessageConvert<M>: Sized {
    /// Build the transport message for this payload. Never fails.
    fn to_message(&self) -> M;

    /// Rebuild a payload from a transport message.
    ///
    /// Absent optional fields map to the payload's documented defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::MissingField`] or
    /// [`SerializationError::OutOfDomain`].
    fn from_message(message: M) -> Result<Self, SerializationError>;
}

/// Serializer that converts the payload through message type `M`.
pub struct MsgSerializer<M>(PhantomData<fn() -> M>);

impl<P, M> Serializer<P> for MsgSerializer<M>
where
    P: MessageConvert<M>,
    M: Serialize + DeserializeOwned + 'static,
{
    fn serialize(value: &P) -> Result<Vec<u8>, SerializationError> {
        Ok(rmp_serde::to_vec_named(&value.to_message())?)
    }

    fn deserialize(bytes: &[u8]) -> Result<P, SerializationError> {
        let message: M = rmp_serde::from_slice(bytes)?;
        P::from_message(message)
    }
}

/// Serializer that encodes the payload's own serde representation.
///
/// Suitable for payloads whose serde shape already is the wire shape.
pub struct DefaultSerializer;

impl<P> Serializer<P> for DefaultSerializer
where
    P: Serialize + DeserializeOwned,
{
    fn serialize(value: &P) -> Result<Vec<u8>, SerializationError> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    fn deserialize(bytes: &[u8]) -> Result<P, SerializationError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}
