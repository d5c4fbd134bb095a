//! Text frame codec.
//!
//! ```text
//! Path:speech.config\r\n
//! X-RequestId:0123456789abcdef0123456789abcdef\r\n
//! \r\n
//! {"context":{...}}
//! ```
//!
//! The header block ends at the first blank line. Everything after it is the
//! body, taken verbatim, so bodies may contain CRLF sequences of their own.
//!
//! A message with no headers encodes as a lone CRLF followed by the body. That
//! frame has no blank line unless the body supplies one, so it decodes back
//! only when the body neither starts with CRLF nor contains a blank line.

use crate::{
    codec::{FrameCodec, FrameWriter, LINE_END, header_block_len, parse_header_block},
    errors::{ProtocolError, Result},
    message::{HeaderAccess, TextMessage},
};

/// Separator between the header block and the body
const HEADER_TERMINATOR: &str = "\r\n\r\n";

/// Codec for CRLF-delimited text frames
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl FrameCodec for TextCodec {
    type Message = TextMessage;

    fn encoded_len(&self, message: &TextMessage) -> Result<usize> {
        let body = message.body().map_or(0, str::len);
        Ok(header_block_len(message.headers()) + LINE_END.len() + body)
    }

    fn serialize(&self, message: &TextMessage, dst: &mut [u8]) -> Result<usize> {
        let mut writer = FrameWriter::new(dst, self.encoded_len(message)?)?;

        for (key, value) in message.headers().iter() {
            writer.put_header(key, value)?;
        }
        writer.put(LINE_END.as_bytes())?;
        writer.put(message.body().unwrap_or_default().as_bytes())?;

        Ok(writer.position())
    }

    fn deserialize(&self, src: &[u8]) -> Result<TextMessage> {
        let text = std::str::from_utf8(src)
            .map_err(|_| ProtocolError::malformed("text frame is not valid UTF-8"))?;

        let (block, body) = split_frame(text)?;
        let headers = parse_header_block(block)?;

        Ok(TextMessage::from_parts(headers, Some(body.to_string())))
    }
}

/// Split a frame into header block and body at the first blank line.
///
/// Without a blank line, a frame that starts with CRLF has an empty header
/// block.
fn split_frame(text: &str) -> Result<(&str, &str)> {
    if let Some(parts) = text.split_once(HEADER_TERMINATOR) {
        return Ok(parts);
    }

    text.strip_prefix(LINE_END)
        .map(|body| ("", body))
        .ok_or(ProtocolError::malformed("text frame has no blank line after headers"))
}
