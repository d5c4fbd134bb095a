//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SessionError},
    session::{SPEECH_END_DETECTED_PATH, TURN_END_PATH},
    wav::PcmFormat,
};

/// Session configuration
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Scratch buffer for outbound frames; larger messages fail to encode
    pub send_buffer_size: usize,
    /// Largest inbound frame accepted by `handle_frame`
    pub max_inbound_frame: usize,
    /// Overwrite the first 44 bytes of the first audio chunk with a PCM header
    pub rewrite_wav_header: bool,
    /// Format written into the rewritten WAV header
    pub audio_format: PcmFormat,
    /// Inbound paths answered with a telemetry acknowledgement
    pub turn_end_paths: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 1024 * 1024,
            max_inbound_frame: 4 * 1024,
            rewrite_wav_header: true,
            audio_format: PcmFormat::default(),
            turn_end_paths: vec![TURN_END_PATH.to_string(), SPEECH_END_DETECTED_PATH.to_string()],
        }
    }
}

impl SessionConfig {
    /// Parse a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SessionError::Config)
    }

    /// Whether `path` ends a turn (or detected speech)
    pub fn is_turn_end(&self, path: &str) -> bool {
        self.turn_end_paths.iter().any(|p| p == path)
    }
}
