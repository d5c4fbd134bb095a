//! Wire format for speech service messages.
//!
//! A message is an ordered set of string headers plus a body. Messages travel
//! in one of two frame kinds, matching the text and binary frames of the
//! underlying duplex transport:
//!
//! - **Text frames** carry `key:value\r\n` header lines, a blank line, and a
//!   UTF-8 body (JSON configuration, recognition results).
//! - **Binary frames** carry a 16-bit big-endian header block length, the
//!   ASCII header lines, and a raw body (audio).
//!
//! Both codecs are pure functions over caller-owned buffers. They keep no
//! state between calls and never retain a buffer after returning, so one codec
//! value can be shared freely across threads.
//!
//! # Validation
//!
//! Decoding rejects anything outside the grammar rather than guessing:
//! duplicate header keys, header lines without a colon, truncated length
//! prefixes, and non-ASCII binary header blocks are all errors. Encoding
//! checks capacity before the first byte is written, so a failed serialize
//! never leaves a frame-shaped prefix in the destination.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod binary;
pub mod codec;
pub mod errors;
pub mod headers;
pub mod message;
pub mod text;

pub use binary::BinaryCodec;
pub use codec::FrameCodec;
pub use errors::{ProtocolError, Result};
pub use headers::Headers;
pub use message::{BinaryMessage, HeaderAccess, Message, RequestId, TextMessage};
pub use text::TextCodec;
