//! Environment abstraction.
//!
//! The session never reaches for ambient randomness. Request ids come from an
//! [`Environment`] supplied by the caller, so tests can make them
//! deterministic.

use rand::RngCore;
use speechframe_proto::RequestId;

/// Source of randomness for protocol logic.
pub trait Environment {
    /// Fill `buffer` with random bytes
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Fresh version 4 request id
    fn request_id(&self) -> RequestId {
        let mut bytes = [0u8; 16];
        self.random_bytes(&mut bytes);
        RequestId::from_random_bytes(bytes)
    }
}

/// Production environment backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        rand::thread_rng().fill_bytes(buffer);
    }
}
