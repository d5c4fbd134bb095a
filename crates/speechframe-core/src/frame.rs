//! Transport-level frames.
//!
//! The transport (WebSocket or otherwise) moves opaque byte frames tagged as
//! text or binary. The tag picks the codec.

use bytes::Bytes;
use speechframe_proto::{BinaryCodec, FrameCodec, Message, TextCodec};

/// Frame kind as tagged by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Text frame, decoded with [`TextCodec`]
    Text,
    /// Binary frame, decoded with [`BinaryCodec`]
    Binary,
}

/// Encoded message ready for, or received from, the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFrame {
    /// Text frame bytes
    Text(Bytes),
    /// Binary frame bytes
    Binary(Bytes),
}

impl WireFrame {
    /// Transport tag
    pub const fn kind(&self) -> FrameKind {
        match self {
            Self::Text(_) => FrameKind::Text,
            Self::Binary(_) => FrameKind::Binary,
        }
    }

    /// Frame bytes
    pub const fn payload(&self) -> &Bytes {
        match self {
            Self::Text(bytes) | Self::Binary(bytes) => bytes,
        }
    }

    /// Frame size in bytes
    pub fn len(&self) -> usize {
        self.payload().len()
    }

    /// Whether the frame has no bytes
    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }

    /// Decode with the codec matching the frame kind
    pub fn decode(&self) -> speechframe_proto::Result<Message> {
        match self {
            Self::Text(bytes) => TextCodec.deserialize(bytes).map(Message::Text),
            Self::Binary(bytes) => BinaryCodec.deserialize(bytes).map(Message::Binary),
        }
    }
}
