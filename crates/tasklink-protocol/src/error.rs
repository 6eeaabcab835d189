//! Error types for the tasklink channel.

use crate::keys::MessageKey;
use thiserror::Error;

/// Failures decoding or encoding a single message.
///
/// These are always scoped to one message: the channel keeps serving
/// subsequent traffic after reporting one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("missing field: {0}")]
    MissingField(MessageKey),
    #[error("invalid type for {key}: expected {expected}")]
    InvalidType {
        key: MessageKey,
        expected: &'static str,
    },
    #[error("value out of range for {key}: {value}")]
    OutOfRange { key: MessageKey, value: i64 },
    #[error("message of {size} bytes exceeds outbox of {limit} bytes")]
    Oversized { size: usize, limit: usize },
}

/// Host transport failures, reported either synchronously by `Transport`
/// calls or later through the delivery notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("companion not connected")]
    NotConnected,
    #[error("transport busy")]
    Busy,
    #[error("buffer overflow")]
    BufferOverflow,
    #[error("send timed out")]
    Timeout,
    #[error("send rejected by companion")]
    Rejected,
    #[error("channel closed")]
    Closed,
    #[error("transport error code {0}")]
    Other(i32),
}

/// Errors surfaced by the channel runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Convenience result type for codec operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Convenience result type for channel operations.
pub type CommResult<T> = Result<T, CommError>;
