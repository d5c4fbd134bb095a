//! Shared codec plumbing.
//!
//! Both frame kinds use the same `key:value\r\n` header line grammar and the
//! same bounded writer, so they live here rather than in either codec.

use crate::{
    errors::{ProtocolError, Result},
    headers::Headers,
};

/// Line terminator for header lines
pub const LINE_END: &str = "\r\n";

/// Separator between a header key and its value
pub const KEY_VALUE_DELIMITER: char = ':';

/// Encode and decode one kind of frame.
///
/// Implementations are stateless. `serialize` either writes a complete frame
/// into `dst` or returns an error without touching it.
pub trait FrameCodec {
    /// Message type carried by this frame kind
    type Message;

    /// Exact size of the frame `message` encodes to
    fn encoded_len(&self, message: &Self::Message) -> Result<usize>;

    /// Write `message` into `dst`, returning the number of bytes written
    fn serialize(&self, message: &Self::Message, dst: &mut [u8]) -> Result<usize>;

    /// Decode a complete frame
    fn deserialize(&self, src: &[u8]) -> Result<Self::Message>;

    /// Encode `message` into a freshly allocated, exactly sized buffer
    fn to_vec(&self, message: &Self::Message) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.encoded_len(message)?];
        let written = self.serialize(message, &mut buf)?;
        buf.truncate(written);
        Ok(buf)
    }
}

/// Encoded size of one `key:value\r\n` line
pub(crate) fn header_line_len(key: &str, value: &str) -> usize {
    key.len() + KEY_VALUE_DELIMITER.len_utf8() + value.len() + LINE_END.len()
}

/// Encoded size of all header lines, excluding any block terminator
pub(crate) fn header_block_len(headers: &Headers) -> usize {
    headers.iter().map(|(k, v)| header_line_len(k, v)).sum()
}

/// Parse a header block into an ordered header map.
///
/// Blank lines are skipped. Each remaining line splits at its first colon, so
/// values may themselves contain colons or be empty.
pub(crate) fn parse_header_block(block: &str) -> Result<Headers> {
    let mut headers = Headers::new();

    for line in block.split(LINE_END).filter(|line| !line.is_empty()) {
        let (key, value) = line
            .split_once(KEY_VALUE_DELIMITER)
            .ok_or(ProtocolError::malformed("header line has no ':' delimiter"))?;
        headers.insert(key, value)?;
    }

    Ok(headers)
}

/// Bounded cursor over a caller-supplied destination buffer.
///
/// Capacity for the whole frame is checked up front in [`FrameWriter::new`],
/// and every write is bounds-checked again, so a writer can never index past
/// the end of `buf`.
pub(crate) struct FrameWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FrameWriter<'a> {
    /// Wrap `buf`, failing unless it can hold a `frame_len` byte frame
    pub(crate) fn new(buf: &'a mut [u8], frame_len: usize) -> Result<Self> {
        if buf.len() < frame_len {
            return Err(ProtocolError::BufferTooSmall { needed: frame_len, available: buf.len() });
        }

        Ok(Self { buf, pos: 0 })
    }

    /// Bytes written (or skipped) so far
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_at(self.pos, bytes)?;
        self.pos += bytes.len();
        Ok(())
    }

    /// Reserve `len` bytes to be filled later with [`FrameWriter::patch`]
    pub(crate) fn skip(&mut self, len: usize) -> Result<()> {
        let end = self.pos + len;
        if end > self.buf.len() {
            return Err(self.overflow(end));
        }

        self.pos = end;
        Ok(())
    }

    /// Overwrite previously reserved bytes at `offset`
    pub(crate) fn patch(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.write_at(offset, bytes)
    }

    pub(crate) fn put_header(&mut self, key: &str, value: &str) -> Result<()> {
        self.put(key.as_bytes())?;
        self.put(&[KEY_VALUE_DELIMITER as u8])?;
        self.put(value.as_bytes())?;
        self.put(LINE_END.as_bytes())
    }

    fn write_at(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let end = offset + bytes.len();
        let available = self.buf.len();
        let dst = self
            .buf
            .get_mut(offset..end)
            .ok_or(ProtocolError::BufferTooSmall { needed: end, available })?;
        dst.copy_from_slice(bytes);
        Ok(())
    }

    fn overflow(&self, needed: usize) -> ProtocolError {
        ProtocolError::BufferTooSmall { needed, available: self.buf.len() }
    }
}
