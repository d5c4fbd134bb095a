//! Session error types.

use speechframe_proto::ProtocolError;
use thiserror::Error;

use crate::{session::SessionState, wav::WavError};

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors from session operations.
///
/// The session state is unchanged when an operation fails. The driver decides
/// whether an error ends the connection.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Encoding or decoding a frame failed
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Writing the WAV header into the audio body failed
    #[error(transparent)]
    Wav(#[from] WavError),

    /// Operation not valid in the current state
    #[error("cannot {operation} in state {state:?}")]
    InvalidState {
        /// Current state
        state: SessionState,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Speech config body is not well-formed JSON
    #[error("speech config is not valid JSON: {0}")]
    InvalidSpeechConfig(#[source] serde_json::Error),

    /// Session configuration could not be parsed
    #[error("invalid session config: {0}")]
    Config(#[source] serde_json::Error),

    /// Inbound frame exceeds the configured receive limit
    #[error("inbound frame of {size} bytes exceeds limit of {max}")]
    FrameTooLarge {
        /// Frame size
        size: usize,
        /// Configured limit
        max: usize,
    },
}
