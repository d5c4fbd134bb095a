//! PCM WAV header writer.
//!
//! Writes the canonical 44-byte RIFF/WAVE header (RIFF chunk, 16-byte `fmt `
//! chunk, `data` chunk header). All multi-byte fields are little-endian.
//!
//! ```text
//!  0  "RIFF"            4  data_size + 36     8  "WAVE"
//! 12  "fmt "           16  16 (fmt size)     20  1 (PCM)
//! 22  channels         24  sample rate       28  byte rate
//! 32  block align      34  bits per sample   36  "data"
//! 40  data_size
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of the header written by [`write_pcm_header`]
pub const WAV_HEADER_LEN: usize = 44;

const FMT_CHUNK_LEN: u32 = 16;
const PCM_FORMAT_TAG: u16 = 1;

/// Bytes of the RIFF chunk that follow the size field, excluding sample data
const RIFF_OVERHEAD: u32 = (WAV_HEADER_LEN - 8) as u32;

/// Errors from [`write_pcm_header`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WavError {
    /// Destination shorter than a WAV header
    #[error("buffer too small for wav header: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Header size
        needed: usize,
        /// Destination size
        available: usize,
    },

    /// Format cannot be described by a PCM header
    #[error("invalid pcm format: {reason}")]
    InvalidFormat {
        /// Which field is out of range
        reason: &'static str,
    },
}

/// Sample layout of uncompressed PCM audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmFormat {
    /// Interleaved channel count
    pub channels: u16,
    /// Samples per second per channel
    pub sample_rate: u32,
    /// Bits per sample; a multiple of 8
    pub bits_per_sample: u16,
}

impl Default for PcmFormat {
    /// Mono, 16 kHz, 16-bit: what speech services expect
    fn default() -> Self {
        Self { channels: 1, sample_rate: 16_000, bits_per_sample: 16 }
    }
}

impl PcmFormat {
    /// Bytes per sample frame (all channels)
    pub fn block_align(&self) -> Result<u16, WavError> {
        u16::try_from(u32::from(self.channels) * u32::from(self.bits_per_sample / 8))
            .map_err(|_| WavError::InvalidFormat { reason: "block align overflows u16" })
    }

    /// Bytes per second
    pub fn byte_rate(&self) -> Result<u32, WavError> {
        self.sample_rate
            .checked_mul(u32::from(self.block_align()?))
            .ok_or(WavError::InvalidFormat { reason: "byte rate overflows u32" })
    }

    fn validate(&self) -> Result<(), WavError> {
        if self.channels == 0 {
            return Err(WavError::InvalidFormat { reason: "zero channels" });
        }
        if self.bits_per_sample == 0 || !self.bits_per_sample.is_multiple_of(8) {
            return Err(WavError::InvalidFormat { reason: "bits per sample not a multiple of 8" });
        }
        Ok(())
    }
}

/// Write a PCM WAV header into the first 44 bytes of `dst`.
///
/// `data_size` is the length of the sample data that follows. Streaming
/// producers that do not know it yet pass 0. Returns the header length.
///
/// # Errors
///
/// `BufferTooSmall` if `dst` is shorter than [`WAV_HEADER_LEN`];
/// `InvalidFormat` if the format or size cannot be represented.
pub fn write_pcm_header(
    dst: &mut [u8],
    format: &PcmFormat,
    data_size: u32,
) -> Result<usize, WavError> {
    let available = dst.len();
    let dst = dst
        .get_mut(..WAV_HEADER_LEN)
        .ok_or(WavError::BufferTooSmall { needed: WAV_HEADER_LEN, available })?;

    format.validate()?;
    let riff_size = data_size
        .checked_add(RIFF_OVERHEAD)
        .ok_or(WavError::InvalidFormat { reason: "data size overflows riff chunk" })?;

    let fields: [&[u8]; 13] = [
        b"RIFF",
        &riff_size.to_le_bytes(),
        b"WAVE",
        b"fmt ",
        &FMT_CHUNK_LEN.to_le_bytes(),
        &PCM_FORMAT_TAG.to_le_bytes(),
        &format.channels.to_le_bytes(),
        &format.sample_rate.to_le_bytes(),
        &format.byte_rate()?.to_le_bytes(),
        &format.block_align()?.to_le_bytes(),
        &format.bits_per_sample.to_le_bytes(),
        b"data",
        &data_size.to_le_bytes(),
    ];

    let mut offset = 0;
    for field in fields {
        dst[offset..offset + field.len()].copy_from_slice(field);
        offset += field.len();
    }
    debug_assert_eq!(offset, WAV_HEADER_LEN);

    Ok(WAV_HEADER_LEN)
}
