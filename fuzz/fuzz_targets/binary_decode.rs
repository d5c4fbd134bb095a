//! Binary frame decoding must never panic, and anything it accepts must
//! re-encode to a frame that decodes to the same message.

#![no_main]

use libfuzzer_sys::fuzz_target;
use speechframe_proto::{BinaryCodec, FrameCodec, ProtocolError};

fuzz_target!(|data: &[u8]| {
    let Ok(message) = BinaryCodec.deserialize(data) else {
        return;
    };

    // A final header line without CRLF gains two bytes on re-encode
    let encoded = match BinaryCodec.to_vec(&message) {
        Ok(encoded) => encoded,
        Err(ProtocolError::HeaderBlockTooLarge { .. }) => return,
        Err(e) => panic!("decoded message failed to re-encode: {e}"),
    };

    let decoded = BinaryCodec.deserialize(&encoded).expect("re-encoded frame must decode");
    assert_eq!(decoded, message);
});
