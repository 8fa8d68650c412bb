//! In-memory representation of one wire exchange.

use std::collections::BTreeMap;

use tracing::error;

use crate::socket::Connection;

use super::wire;

/// Largest payload the decoder will accept, in bytes.
pub const MAX_SEGMENT_LENGTH: usize = 32767;

/// Width of the fixed header-length prefix, in bytes.
pub(super) const HEADER_LENGTH_PREFIX_WIDTH: usize = 10;

/// Reserved header key carrying the request name.
pub const KEY_REQUEST_NAME: &str = "request";
/// Reserved header key carrying the payload type.
pub const KEY_PAYLOAD_TYPE: &str = "payload_type";
/// Reserved header key carrying the payload byte length.
pub const KEY_PAYLOAD_LENGTH: &str = "payload_length";
/// Reserved header key marking a fire-and-forget message.
pub const KEY_ONE_WAY: &str = "one_way";

pub(super) const PAYLOAD_TYPE_TEXT: &str = "text";
pub(super) const PAYLOAD_TYPE_KVP: &str = "kvp";
pub(super) const PAYLOAD_TYPE_UNKNOWN: &str = "unknown";
pub(super) const VALUE_TRUE: &str = "true";

/// Message payload, tagged by wire payload type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    /// No payload type set; such a message cannot be sent.
    #[default]
    Unknown,
    /// Free-form textual payload.
    Text(String),
    /// Key/value payload.
    KeyValues(BTreeMap<String, String>),
}

impl Payload {
    /// Wire label used in the `payload_type` header.
    pub fn type_label(&self) -> &'static str {
        match self {
            Payload::Unknown => PAYLOAD_TYPE_UNKNOWN,
            Payload::Text(_) => PAYLOAD_TYPE_TEXT,
            Payload::KeyValues(_) => PAYLOAD_TYPE_KVP,
        }
    }
}

/// One wire exchange: headers, payload, and the one-way flag.
///
/// A message is either built by a caller for sending, or reconstituted
/// field-by-field from bytes read off a connection. Each instance is used
/// for exactly one exchange.
#[derive(Debug, Clone, Default)]
pub struct Message {
    headers: BTreeMap<String, String>,
    payload: Payload,
    one_way: bool,
}

impl Message {
    /// Create a message with the given request name and payload.
    pub fn new(request_name: impl Into<String>, payload: Payload) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(KEY_REQUEST_NAME.to_string(), request_name.into());

        Self {
            headers,
            payload,
            one_way: false,
        }
    }

    /// Create a text message.
    pub fn text(request_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(request_name, Payload::Text(text.into()))
    }

    /// Create a key/values message.
    pub fn key_values(request_name: impl Into<String>, pairs: BTreeMap<String, String>) -> Self {
        Self::new(request_name, Payload::KeyValues(pairs))
    }

    /// Reconstruct a message by reading from an open connection.
    ///
    /// Returns `None` when the connection is closed or reconstitution fails.
    pub fn reconstruct(connection: &mut Connection) -> Option<Message> {
        if !connection.is_open() {
            error!("No open connection to reconstruct from");
            return None;
        }

        match wire::read_message(connection) {
            Ok(message) => Some(message),
            Err(e) => {
                error!(error = %e, "Message reconstruction failed");
                None
            }
        }
    }

    /// The name of the message request, empty string when unset.
    pub fn request_name(&self) -> &str {
        self.header(KEY_REQUEST_NAME).unwrap_or_default()
    }

    /// The message payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Replace the message payload.
    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = payload;
    }

    /// Whether the message is fire-and-forget.
    pub fn is_one_way(&self) -> bool {
        self.one_way
    }

    /// Mark or unmark the message as fire-and-forget.
    pub fn set_one_way(&mut self, one_way: bool) {
        self.one_way = one_way;
    }

    /// All headers of the message.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Look up a single header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Set a header value.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }
}
