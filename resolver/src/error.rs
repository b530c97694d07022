//! Error types for request and reply handling.

use thiserror::Error;

use wire::MessageTag;

/// Result type for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Errors surfaced by the world map client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolverError {
    /// Inbound frame or body failed to decode.
    #[error("decode failed: {0}")]
    Decode(#[from] wire::DecodeError),

    /// Outbound request failed to encode.
    #[error("encode failed: {0}")]
    Encode(#[from] wire::EncodeError),

    /// A block reply carried a layer this client never requests.
    /// The whole reply was discarded.
    #[error("invalid map layer in block reply: 0x{flags:08X}")]
    UnexpectedLayer { flags: u32 },

    /// An inbound frame carried a message a client never receives.
    #[error("unexpected inbound message: {tag}")]
    UnexpectedMessage { tag: MessageTag },
}
