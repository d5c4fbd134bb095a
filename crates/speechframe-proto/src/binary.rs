//! Binary frame codec.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┬──────────────────┐
//! │ u16 BE len L │ L bytes ASCII header lines   │ body (remaining) │
//! └──────────────┴──────────────────────────────┴──────────────────┘
//! ```
//!
//! Header lines use the text grammar (`key:value\r\n`) but there is no blank
//! line after them: the length prefix says where the body starts. The prefix
//! is 16 bits, which caps the header block at 65535 bytes.

use bytes::Bytes;
use zerocopy::{FromBytes, IntoBytes, byteorder::network_endian::U16};

use crate::{
    codec::{FrameCodec, FrameWriter, header_block_len, parse_header_block},
    errors::{ProtocolError, Result},
    headers::Headers,
    message::{BinaryMessage, HeaderAccess},
};

/// Size of the header block length prefix
pub const LENGTH_PREFIX_LEN: usize = 2;

/// Largest header block the length prefix can describe
pub const MAX_HEADER_BLOCK_LEN: usize = u16::MAX as usize;

/// Codec for length-prefixed binary frames
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl BinaryCodec {
    /// Read the header block length from the start of a frame.
    ///
    /// # Errors
    ///
    /// Returns `MalformedFrame` if `src` is shorter than the prefix.
    pub fn header_block_len(src: &[u8]) -> Result<usize> {
        split_length_prefix(src).map(|(len, _)| len)
    }
}

impl FrameCodec for BinaryCodec {
    type Message = BinaryMessage;

    fn encoded_len(&self, message: &BinaryMessage) -> Result<usize> {
        let block_len = checked_block_len(message.headers())?;
        let body = message.body().ok_or(ProtocolError::MissingBody)?;
        Ok(LENGTH_PREFIX_LEN + block_len + body.len())
    }

    fn serialize(&self, message: &BinaryMessage, dst: &mut [u8]) -> Result<usize> {
        let block_len = checked_block_len(message.headers())?;
        let prefix = u16::try_from(block_len).map_err(|_| ProtocolError::HeaderBlockTooLarge {
            size: block_len,
            max: MAX_HEADER_BLOCK_LEN,
        })?;
        let body = message.body().ok_or(ProtocolError::MissingBody)?;

        let mut writer = FrameWriter::new(dst, LENGTH_PREFIX_LEN + block_len + body.len())?;

        writer.skip(LENGTH_PREFIX_LEN)?;
        for (key, value) in message.headers().iter() {
            writer.put_header(key, value)?;
        }
        debug_assert_eq!(writer.position() - LENGTH_PREFIX_LEN, block_len);

        writer.patch(0, U16::new(prefix).as_bytes())?;
        writer.put(body)?;

        Ok(writer.position())
    }

    fn deserialize(&self, src: &[u8]) -> Result<BinaryMessage> {
        let (block_len, rest) = split_length_prefix(src)?;
        let (block, body) = rest
            .split_at_checked(block_len)
            .ok_or(ProtocolError::malformed("binary frame shorter than its header block"))?;

        if !block.is_ascii() {
            return Err(ProtocolError::malformed("binary header block is not ASCII"));
        }
        let block = std::str::from_utf8(block)
            .map_err(|_| ProtocolError::malformed("binary header block is not ASCII"))?;

        let headers = parse_header_block(block)?;

        Ok(BinaryMessage::from_parts(headers, Some(Bytes::copy_from_slice(body))))
    }
}

fn split_length_prefix(src: &[u8]) -> Result<(usize, &[u8])> {
    let (prefix, rest) = U16::read_from_prefix(src)
        .map_err(|_| ProtocolError::malformed("binary frame shorter than length prefix"))?;
    Ok((usize::from(prefix.get()), rest))
}

/// Header block size, checked against what the binary format can carry
fn checked_block_len(headers: &Headers) -> Result<usize> {
    if !headers.iter().all(|(k, v)| k.is_ascii() && v.is_ascii()) {
        return Err(ProtocolError::malformed("binary header block is not ASCII"));
    }

    let size = header_block_len(headers);
    if size > MAX_HEADER_BLOCK_LEN {
        return Err(ProtocolError::HeaderBlockTooLarge { size, max: MAX_HEADER_BLOCK_LEN });
    }

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio_message(body: &'static [u8]) -> BinaryMessage {
        let mut message = BinaryMessage::new();
        message.set_path("audio");
        message.set_body(body);
        message
    }

    #[test]
    fn serialize_prefixes_header_block_length() {
        let bytes = BinaryCodec.to_vec(&audio_message(&[0xde, 0xad])).unwrap();

        // "Path:audio\r\n" is 12 bytes
        assert_eq!(&bytes[..2], &[0x00, 0x0c]);
        assert_eq!(&bytes[2..14], b"Path:audio\r\n");
        assert_eq!(&bytes[14..], &[0xde, 0xad]);
    }

    #[test]
    fn missing_body_is_rejected() {
        let mut message = BinaryMessage::new();
        message.set_path("audio");

        let mut buf = [0u8; 64];
        assert_eq!(BinaryCodec.serialize(&message, &mut buf), Err(ProtocolError::MissingBody));
        assert_eq!(BinaryCodec.encoded_len(&message), Err(ProtocolError::MissingBody));
    }

    #[test]
    fn empty_body_is_allowed() {
        let bytes = BinaryCodec.to_vec(&audio_message(&[])).unwrap();
        let decoded = BinaryCodec.deserialize(&bytes).unwrap();

        assert_eq!(decoded.body().map(Bytes::len), Some(0));
    }

    #[test]
    fn non_ascii_header_is_rejected() {
        let mut message = audio_message(&[1]);
        message.set_content_type("audio/wäv");

        let result = BinaryCodec.to_vec(&message);
        assert!(matches!(result, Err(ProtocolError::MalformedFrame { .. })));
    }

    #[test]
    fn truncated_frames_are_malformed() {
        let frames: [&[u8]; 3] = [b"", &[0x00], &[0x00, 0x05, b'P', b':']];
        for frame in frames {
            let result = BinaryCodec.deserialize(frame);
            assert!(
                matches!(result, Err(ProtocolError::MalformedFrame { .. })),
                "accepted {frame:?}"
            );
        }
    }

    #[test]
    fn non_ascii_header_block_is_malformed() {
        let result = BinaryCodec.deserialize(&[0x00, 0x04, b'A', b':', 0xc3, 0xa4]);
        assert!(matches!(result, Err(ProtocolError::MalformedFrame { .. })));
    }

    #[test]
    fn zero_length_block_has_no_headers() {
        let decoded = BinaryCodec.deserialize(&[0x00, 0x00, 0x01, 0x02]).unwrap();

        assert!(decoded.headers().is_empty());
        assert_eq!(decoded.body().map(|b| b.to_vec()), Some(vec![1, 2]));
    }
}
