//! Text frame decoding must never panic, and anything it accepts must
//! re-encode to a frame that decodes to the same message.

#![no_main]

use libfuzzer_sys::fuzz_target;
use speechframe_proto::{FrameCodec, HeaderAccess, TextCodec};

fuzz_target!(|data: &[u8]| {
    let Ok(message) = TextCodec.deserialize(data) else {
        return;
    };

    // A header-less frame cannot carry a body that starts a blank line
    let body = message.body().unwrap_or_default();
    if message.headers().is_empty() && (body.starts_with("\r\n") || body.contains("\r\n\r\n")) {
        return;
    }

    let encoded = TextCodec.to_vec(&message).expect("decoded message must re-encode");
    let decoded = TextCodec.deserialize(&encoded).expect("re-encoded frame must decode");
    assert_eq!(decoded, message);
});
