//! Speech session state machine.
//!
//! One [`Session`] drives a single recognition turn. It owns no transport:
//! outbound operations return the [`WireFrame`] to send, and inbound frames go
//! through [`Session::handle_frame`], which returns [`SessionAction`]s for the
//! driver to execute.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐ speech.config ┌────────────┐  audio  ┌───────────┐ turn.end ┌──────────────┐
//! │ Init │──────────────>│ Configured │────────>│ Streaming │─────────>│ TurnComplete │
//! └──────┘               └────────────┘         └───────────┘          └──────────────┘
//!                                                  │     ↑
//!                                                  └─────┘ audio
//! ```
//!
//! Inbound frames are accepted in every state, and turn-end paths are
//! acknowledged in every state. Only a `turn.end` received while `Streaming`
//! completes the turn. Operations attempted in the wrong state fail with
//! `InvalidState` and leave the session untouched.

use bytes::Bytes;
use serde::de::IgnoredAny;
use speechframe_proto::{
    BinaryCodec, BinaryMessage, FrameCodec, HeaderAccess, Message, TextCodec, TextMessage,
};

use crate::{
    config::SessionConfig,
    env::Environment,
    error::{Result, SessionError},
    frame::{FrameKind, WireFrame},
    wav::{WAV_HEADER_LEN, write_pcm_header},
};

/// Path of the speech configuration message
pub const SPEECH_CONFIG_PATH: &str = "speech.config";
/// Path of audio messages
pub const AUDIO_PATH: &str = "audio";
/// Path of telemetry acknowledgements
pub const TELEMETRY_PATH: &str = "telemetry";
/// Inbound path marking the end of a turn
pub const TURN_END_PATH: &str = "turn.end";
/// Inbound path marking the end of detected speech
pub const SPEECH_END_DETECTED_PATH: &str = "speech.endDetected";

/// Content type of the speech configuration body
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";
/// Content type of audio bodies
pub const WAV_CONTENT_TYPE: &str = "audio/x-wav";

/// Actions returned by [`Session::handle_frame`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Send this frame to the service
    Send(WireFrame),
    /// Hand this decoded message to the application
    Deliver(Message),
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing sent yet
    Init,
    /// Speech config sent, no audio yet
    Configured,
    /// At least one audio chunk sent
    Streaming,
    /// Service reported the end of the turn
    TurnComplete,
}

/// Speech session state machine
///
/// Pure state machine: no I/O. Randomness for request ids comes from the
/// [`Environment`].
#[derive(Debug)]
pub struct Session<E> {
    env: E,
    config: SessionConfig,
    state: SessionState,
    /// Outbound frames are serialized here before being copied out
    send_buffer: Vec<u8>,
}

impl<E: Environment> Session<E> {
    /// Create a session in `Init` state
    pub fn new(env: E, config: SessionConfig) -> Self {
        let send_buffer = vec![0; config.send_buffer_size];
        Self { env, config, state: SessionState::Init, send_buffer }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Build the `speech.config` frame and move to `Configured`.
    ///
    /// `json` is sent verbatim once it parses as JSON.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless in `Init`
    /// - `InvalidSpeechConfig` if `json` is not well-formed
    /// - `Protocol` if the frame does not fit the send buffer
    pub fn send_speech_config(&mut self, json: &str) -> Result<WireFrame> {
        self.expect_state(&[SessionState::Init], "send speech config")?;
        serde_json::from_str::<IgnoredAny>(json).map_err(SessionError::InvalidSpeechConfig)?;

        let mut message = TextMessage::new();
        message.set_path(SPEECH_CONFIG_PATH);
        message.set_request_id(self.env.request_id());
        message.set_content_type(JSON_CONTENT_TYPE);
        message.set_body(json);

        let frame = WireFrame::Text(self.encode(TextCodec, &message)?);
        tracing::debug!(path = SPEECH_CONFIG_PATH, size = frame.len(), "sending speech config");

        self.transition(SessionState::Configured);
        Ok(frame)
    }

    /// Build an `audio` frame carrying `pcm` and move to `Streaming`.
    ///
    /// With `rewrite_wav_header` enabled, the first chunk's leading 44 bytes
    /// are replaced by a streaming PCM header for the configured format.
    /// Chunks shorter than a header are sent as-is.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless in `Configured` or `Streaming`
    /// - `Wav` if the configured audio format is invalid
    /// - `Protocol` if the frame does not fit the send buffer
    pub fn send_audio(&mut self, mut pcm: Vec<u8>) -> Result<WireFrame> {
        self.expect_state(&[SessionState::Configured, SessionState::Streaming], "send audio")?;

        let first_chunk = self.state == SessionState::Configured;
        if first_chunk && self.config.rewrite_wav_header && pcm.len() >= WAV_HEADER_LEN {
            write_pcm_header(&mut pcm, &self.config.audio_format, 0)?;
        }

        let mut message = BinaryMessage::new();
        message.set_path(AUDIO_PATH);
        message.set_request_id(self.env.request_id());
        message.set_content_type(WAV_CONTENT_TYPE);
        message.set_body(pcm);

        let frame = WireFrame::Binary(self.encode(BinaryCodec, &message)?);
        tracing::debug!(path = AUDIO_PATH, size = frame.len(), first_chunk, "sending audio");

        if first_chunk {
            self.transition(SessionState::Streaming);
        }
        Ok(frame)
    }

    /// Process a frame received from the service.
    ///
    /// Delivers the decoded message. Turn-end paths are acknowledged with a
    /// telemetry frame; `turn.end` while `Streaming` also completes the turn.
    ///
    /// On error no actions are produced and the state is unchanged. The caller
    /// still owns `frame` and can [`WireFrame::decode`] it directly.
    ///
    /// # Errors
    ///
    /// - `FrameTooLarge` if the frame exceeds `max_inbound_frame`
    /// - `Protocol` if the frame does not decode, or the acknowledgement does
    ///   not fit the send buffer
    pub fn handle_frame(&mut self, frame: &WireFrame) -> Result<Vec<SessionAction>> {
        let kind = frame.kind();
        let size = frame.len();

        if size > self.config.max_inbound_frame {
            tracing::warn!(?kind, size, max = self.config.max_inbound_frame, "inbound frame too large");
            return Err(SessionError::FrameTooLarge { size, max: self.config.max_inbound_frame });
        }

        let message = frame.decode().inspect_err(|error| {
            tracing::warn!(?kind, size, %error, "rejected inbound frame");
        })?;

        let path = message.path().ok().map(str::to_owned);
        tracing::debug!(?kind, size, path = path.as_deref(), "received frame");

        let turn_end =
            kind == FrameKind::Text && path.as_deref().is_some_and(|p| self.config.is_turn_end(p));

        let ack = if turn_end { Some(self.telemetry_ack()?) } else { None };

        if self.state == SessionState::Streaming && path.as_deref() == Some(TURN_END_PATH) {
            self.transition(SessionState::TurnComplete);
        }

        let mut actions = vec![SessionAction::Deliver(message)];
        actions.extend(ack.map(SessionAction::Send));
        Ok(actions)
    }

    fn telemetry_ack(&mut self) -> Result<WireFrame> {
        let mut message = TextMessage::new();
        message.set_path(TELEMETRY_PATH);
        message.set_request_id(self.env.request_id());

        let frame = WireFrame::Text(self.encode(TextCodec, &message)?);
        tracing::debug!(path = TELEMETRY_PATH, size = frame.len(), "sending telemetry ack");
        Ok(frame)
    }

    fn encode<C: FrameCodec>(&mut self, codec: C, message: &C::Message) -> Result<Bytes> {
        let len = codec.serialize(message, &mut self.send_buffer)?;
        Ok(Bytes::copy_from_slice(&self.send_buffer[..len]))
    }

    fn expect_state(&self, allowed: &[SessionState], operation: &'static str) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidState { state: self.state, operation })
        }
    }

    fn transition(&mut self, to: SessionState) {
        if self.state != to {
            tracing::debug!(from = ?self.state, ?to, "session state change");
            self.state = to;
        }
    }
}
