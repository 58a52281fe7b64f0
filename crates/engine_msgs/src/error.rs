//! Codec error types.

/// Errors that can occur while encoding or decoding a message.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Failed to encode a message to MessagePack.
    #[error("failed to encode message: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a message from MessagePack.
    #[error("failed to decode message: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}
