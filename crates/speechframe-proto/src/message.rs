//! Message model.
//!
//! A message is a header map plus a payload. Text and binary messages share
//! the header map type and the [`HeaderAccess`] accessors but keep distinct
//! body types, so each codec only ever sees the variant it can encode.

use std::{fmt, str::FromStr};

use bytes::Bytes;
use uuid::Uuid;

use crate::{
    errors::{ProtocolError, Result},
    headers::{CONTENT_TYPE, Headers, PATH, REQUEST_ID},
};

/// 128-bit request identifier.
///
/// On the wire this is exactly 32 lowercase hex digits with no separators.
/// Parsing is strict: hyphenated or uppercase forms are rejected so that every
/// accepted value re-encodes to the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Length of the canonical encoding
    pub const ENCODED_LEN: usize = 32;

    /// Build from a raw 128-bit value
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Build a version 4 identifier from 16 random bytes
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Raw 128-bit value
    pub const fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// Underlying UUID
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.simple(), f)
    }
}

impl FromStr for RequestId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        let canonical = s.len() == Self::ENCODED_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !canonical {
            return Err(ProtocolError::InvalidRequestIdFormat(s.to_string()));
        }

        Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| ProtocolError::InvalidRequestIdFormat(s.to_string()))
    }
}

/// Typed accessors for the conventional headers.
///
/// Setters go through [`Headers::replace`], so calling one twice updates the
/// value rather than failing on the duplicate key.
pub trait HeaderAccess {
    /// Header map
    fn headers(&self) -> &Headers;

    /// Mutable header map
    fn headers_mut(&mut self) -> &mut Headers;

    /// Value of the `Path` header.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredHeader` if the header is absent.
    fn path(&self) -> Result<&str> {
        self.headers().get(PATH).ok_or(ProtocolError::MissingRequiredHeader(PATH))
    }

    /// Set the `Path` header
    fn set_path(&mut self, path: impl Into<String>) {
        self.headers_mut().replace(PATH, path);
    }

    /// Parsed `X-RequestId` header.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredHeader` if the header is absent and
    /// `InvalidRequestIdFormat` if it is not in canonical form.
    fn request_id(&self) -> Result<RequestId> {
        self.headers()
            .get(REQUEST_ID)
            .ok_or(ProtocolError::MissingRequiredHeader(REQUEST_ID))?
            .parse()
    }

    /// Set the `X-RequestId` header in canonical form
    fn set_request_id(&mut self, id: RequestId) {
        self.headers_mut().replace(REQUEST_ID, id.to_string());
    }

    /// Value of the `Content-Type` header, if present
    fn content_type(&self) -> Option<&str> {
        self.headers().get(CONTENT_TYPE)
    }

    /// Set the `Content-Type` header
    fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.headers_mut().replace(CONTENT_TYPE, content_type);
    }
}

/// Message with an optional UTF-8 body.
///
/// An absent body encodes the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMessage {
    headers: Headers,
    body: Option<String>,
}

impl TextMessage {
    /// Create a message with no headers and no body
    pub const fn new() -> Self {
        Self { headers: Headers::new(), body: None }
    }

    /// Assemble a message from decoded parts
    pub const fn from_parts(headers: Headers, body: Option<String>) -> Self {
        Self { headers, body }
    }

    /// Body text, if set
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Replace the body
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    /// Remove and return the body
    pub fn take_body(&mut self) -> Option<String> {
        self.body.take()
    }

    /// Split into headers and body
    pub fn into_parts(self) -> (Headers, Option<String>) {
        (self.headers, self.body)
    }
}

impl HeaderAccess for TextMessage {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

/// Message with a raw byte body.
///
/// The body is required on the wire; serializing a message whose body was
/// never set fails with `MissingBody`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryMessage {
    headers: Headers,
    body: Option<Bytes>,
}

impl BinaryMessage {
    /// Create a message with no headers and no body
    pub const fn new() -> Self {
        Self { headers: Headers::new(), body: None }
    }

    /// Assemble a message from decoded parts
    pub const fn from_parts(headers: Headers, body: Option<Bytes>) -> Self {
        Self { headers, body }
    }

    /// Body bytes, if set
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Replace the body
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    /// Remove and return the body
    pub fn take_body(&mut self) -> Option<Bytes> {
        self.body.take()
    }

    /// Split into headers and body
    pub fn into_parts(self) -> (Headers, Option<Bytes>) {
        (self.headers, self.body)
    }
}

impl HeaderAccess for BinaryMessage {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

/// Either kind of message, as received from a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Carried in a text frame
    Text(TextMessage),
    /// Carried in a binary frame
    Binary(BinaryMessage),
}

impl HeaderAccess for Message {
    fn headers(&self) -> &Headers {
        match self {
            Self::Text(m) => m.headers(),
            Self::Binary(m) => m.headers(),
        }
    }

    fn headers_mut(&mut self) -> &mut Headers {
        match self {
            Self::Text(m) => m.headers_mut(),
            Self::Binary(m) => m.headers_mut(),
        }
    }
}

impl From<TextMessage> for Message {
    fn from(message: TextMessage) -> Self {
        Self::Text(message)
    }
}

impl From<BinaryMessage> for Message {
    fn from(message: BinaryMessage) -> Self {
        Self::Binary(message)
    }
}
