//! Codec integration tests.
//!
//! Exact wire bytes for representative speech messages, plus the boundary
//! and rejection cases both codecs must agree on.

use bytes::Bytes;
use hex_literal::hex;
use speechframe_proto::{
    BinaryCodec, BinaryMessage, FrameCodec, HeaderAccess, ProtocolError, RequestId, TextCodec,
    TextMessage, binary::MAX_HEADER_BLOCK_LEN,
};

const REQUEST_ID: RequestId = RequestId::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);

#[test]
fn text_scenario_speech_config() {
    let frame = b"Path:speech.config\r\nX-RequestId:0123456789abcdef0123456789abcdef\r\n\r\n{}";

    let message = TextCodec.deserialize(frame).unwrap();

    assert_eq!(message.path(), Ok("speech.config"));
    assert_eq!(message.request_id(), Ok(REQUEST_ID));
    assert_eq!(message.body(), Some("{}"));
}

#[test]
fn binary_scenario_audio_chunk() {
    let frame = hex!(
        "0026"
        "506174683a617564696f0d0a"
        "436f6e74656e742d547970653a617564696f2f782d7761760d0a"
        "010203"
    );

    let message = BinaryCodec.deserialize(&frame).unwrap();

    assert_eq!(message.path(), Ok("audio"));
    assert_eq!(message.content_type(), Some("audio/x-wav"));
    assert_eq!(message.body(), Some(&Bytes::from_static(&[1, 2, 3])));
    assert_eq!(BinaryCodec::header_block_len(&frame), Ok(38));
}

#[test]
fn text_wire_bytes() {
    let mut message = TextMessage::new();
    message.set_path("speech.config");
    message.set_request_id(REQUEST_ID);
    message.set_content_type("application/json;charset=utf-8");
    message.set_body(r#"{"context":{}}"#);

    let bytes = TextCodec.to_vec(&message).unwrap();

    insta::assert_snapshot!(hex::encode(&bytes), @"506174683a7370656563682e636f6e6669670d0a582d5265717565737449643a30313233343536373839616263646566303132333435363738396162636465660d0a436f6e74656e742d547970653a6170706c69636174696f6e2f6a736f6e3b636861727365743d7574662d380d0a0d0a7b22636f6e74657874223a7b7d7d");
}

#[test]
fn binary_wire_bytes() {
    let mut message = BinaryMessage::new();
    message.set_path("audio");
    message.set_request_id(REQUEST_ID);
    message.set_content_type("audio/x-wav");
    message.set_body(vec![1u8, 2, 3]);

    let bytes = BinaryCodec.to_vec(&message).unwrap();

    insta::assert_snapshot!(hex::encode(&bytes), @"0054506174683a617564696f0d0a582d5265717565737449643a30313233343536373839616263646566303132333435363738396162636465660d0a436f6e74656e742d547970653a617564696f2f782d7761760d0a010203");
}

/// Binary message whose header block is exactly `block_len` bytes
fn message_with_block_len(block_len: usize) -> BinaryMessage {
    // "K:" + value + "\r\n"
    let mut message = BinaryMessage::new();
    message.headers_mut().insert("K", "v".repeat(block_len - 4)).unwrap();
    message.set_body(Bytes::from_static(b"body"));
    message
}

#[test]
fn header_block_at_limit_serializes() {
    let message = message_with_block_len(MAX_HEADER_BLOCK_LEN);

    let bytes = BinaryCodec.to_vec(&message).unwrap();

    assert_eq!(&bytes[..2], &[0xff, 0xff]);
    assert_eq!(bytes.len(), 2 + MAX_HEADER_BLOCK_LEN + 4);
    assert_eq!(BinaryCodec.deserialize(&bytes).unwrap(), message);
}

#[test]
fn header_block_over_limit_is_rejected() {
    let message = message_with_block_len(MAX_HEADER_BLOCK_LEN + 1);
    let mut buf = vec![0u8; 2 * MAX_HEADER_BLOCK_LEN];

    let result = BinaryCodec.serialize(&message, &mut buf);

    assert_eq!(
        result,
        Err(ProtocolError::HeaderBlockTooLarge {
            size: MAX_HEADER_BLOCK_LEN + 1,
            max: MAX_HEADER_BLOCK_LEN,
        })
    );
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn binary_one_byte_short_leaves_no_frame() {
    let mut message = BinaryMessage::new();
    message.set_path("audio");
    message.set_body(vec![0xaa; 16]);

    let needed = BinaryCodec.encoded_len(&message).unwrap();
    let mut buf = vec![0u8; needed - 1];

    let result = BinaryCodec.serialize(&message, &mut buf);

    assert_eq!(result, Err(ProtocolError::BufferTooSmall { needed, available: needed - 1 }));
    assert!(buf.iter().all(|&b| b == 0));

    let mut exact = vec![0u8; needed];
    assert_eq!(BinaryCodec.serialize(&message, &mut exact), Ok(needed));
}

#[test]
fn text_serialize_reports_bytes_written() {
    let mut message = TextMessage::new();
    message.set_path("telemetry");

    // Larger than needed: only the prefix is the frame
    let mut buf = [0u8; 64];
    let written = TextCodec.serialize(&message, &mut buf).unwrap();

    assert_eq!(&buf[..written], b"Path:telemetry\r\n\r\n");
}

#[test]
fn duplicate_header_fails_text_decode() {
    let result = TextCodec.deserialize(b"Path:turn.end\r\nPath:turn.start\r\n\r\n");
    assert_eq!(result, Err(ProtocolError::DuplicateHeaderKey("Path".to_string())));
}

#[test]
fn duplicate_header_fails_binary_decode() {
    let block = b"Path:audio\r\nPath:audio\r\n";
    let mut frame = (block.len() as u16).to_be_bytes().to_vec();
    frame.extend_from_slice(block);

    let result = BinaryCodec.deserialize(&frame);
    assert_eq!(result, Err(ProtocolError::DuplicateHeaderKey("Path".to_string())));
}

#[test]
fn header_values_keep_colons() {
    let frame = b"Path:speech.hypothesis\r\nX-Timestamp:2024-01-01T10:20:30Z\r\n\r\n";

    let message = TextCodec.deserialize(frame).unwrap();

    assert_eq!(message.headers().get("X-Timestamp"), Some("2024-01-01T10:20:30Z"));
}

#[test]
fn malformed_request_id_is_reported_on_read() {
    let message = TextCodec.deserialize(b"Path:turn.end\r\nX-RequestId:1234\r\n\r\n").unwrap();

    assert_eq!(message.request_id(), Err(ProtocolError::InvalidRequestIdFormat("1234".into())));
}
