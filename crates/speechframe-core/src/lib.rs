//! Speech session core logic
//!
//! Pure session logic for talking to a speech service over the speechframe
//! wire format, decoupled from I/O. Randomness is supplied through an
//! [`Environment`]; the transport belongs to the caller.
//!
//! # Architecture
//!
//! [`Session`] is a deterministic state machine. Outbound operations return
//! the encoded [`WireFrame`] to send. Inbound frames produce
//! [`SessionAction`]s that describe what the driver should do (deliver a
//! message, send an acknowledgement) rather than doing it.
//!
//! # Components
//!
//! - [`session`]: Session state machine (speech config, audio, turn end)
//! - [`frame`]: Text/binary transport frames
//! - [`config`]: Session configuration
//! - [`mod@env`]: Environment abstraction (RNG)
//! - [`wav`]: PCM WAV header writer
//! - [`error`]: Session error types

pub mod config;
pub mod env;
pub mod error;
pub mod frame;
pub mod session;
pub mod wav;

pub use config::SessionConfig;
pub use env::{Environment, SystemEnv};
pub use error::{Result, SessionError};
pub use frame::{FrameKind, WireFrame};
pub use session::{Session, SessionAction, SessionState};
pub use wav::{PcmFormat, WavError, write_pcm_header};
