//! Error types for message framing.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while building, encoding, or decoding messages.
///
/// Every variant is terminal for the call that produced it. Codecs never
/// return a partially decoded message alongside an error, and a failed
/// serialize leaves the destination buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Frame bytes do not follow the header/body grammar
    #[error("malformed frame: {reason}")]
    MalformedFrame {
        /// What was wrong with the frame
        reason: &'static str,
    },

    /// Header key already present in the header map
    #[error("duplicate header key: {0}")]
    DuplicateHeaderKey(String),

    /// A header required by an accessor is absent
    #[error("missing required header: {0}")]
    MissingRequiredHeader(&'static str),

    /// `X-RequestId` is not 32 lowercase hex digits
    #[error("invalid request id format: {0:?}")]
    InvalidRequestIdFormat(String),

    /// Destination buffer cannot hold the encoded frame
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required for the complete frame
        needed: usize,
        /// Capacity of the destination buffer
        available: usize,
    },

    /// Binary header block does not fit the 16-bit length prefix
    #[error("header block too large: {size} bytes (max {max})")]
    HeaderBlockTooLarge {
        /// Encoded header block size
        size: usize,
        /// Largest header block the length prefix can describe
        max: usize,
    },

    /// Binary message serialized without a body
    #[error("binary message has no body")]
    MissingBody,
}

impl ProtocolError {
    pub(crate) const fn malformed(reason: &'static str) -> Self {
        Self::MalformedFrame { reason }
    }
}
