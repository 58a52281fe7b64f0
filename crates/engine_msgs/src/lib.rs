//! # engine_msgs
//!
//! Transport side of the component layer.
//!
//! This crate provides:
//!
//! - [`messages`] — wire shapes of component payloads.
//! - [`convert`] — [`MessageConvert`](engine_component::MessageConvert)
//!   impls between payloads and messages.
//! - [`serializers`] — the serializer strategy shared by each payload kind.
//! - [`codec`] — MessagePack serialisation/deserialisation helpers.
//! - [`error`] — codec error types.

pub mod codec;
pub mod convert;
pub mod error;
pub mod messages;
pub mod serializers;

pub use codec::{decode, encode};
pub use error::CodecError;
pub use messages::ComponentRecord;
