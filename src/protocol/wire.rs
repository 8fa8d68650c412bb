//! Wire framing: message encode and stream decode.

use std::collections::BTreeMap;
use std::io::Read;

use tracing::{debug, error};

use crate::error::{FramingErrorKind, MessagingError, MessagingResult};

use super::kvp;
use super::message::{
    Message, Payload, HEADER_LENGTH_PREFIX_WIDTH, KEY_ONE_WAY, KEY_PAYLOAD_LENGTH,
    KEY_PAYLOAD_TYPE, KEY_REQUEST_NAME, MAX_SEGMENT_LENGTH, PAYLOAD_TYPE_KVP, PAYLOAD_TYPE_TEXT,
    VALUE_TRUE,
};

/// Largest representable header block: the prefix holds ten decimal digits.
const MAX_HEADER_LENGTH: u64 = 9_999_999_999;

/// Encode a message into its wire bytes.
///
/// Produces one contiguous buffer: the 10-byte header-length prefix, the
/// key/value header block, and the payload.
pub fn encode_message(message: &Message) -> MessagingResult<Vec<u8>> {
    let mut headers = message.headers().clone();
    headers.entry(KEY_REQUEST_NAME.to_string()).or_default();
    headers.insert(
        KEY_PAYLOAD_TYPE.to_string(),
        message.payload().type_label().to_string(),
    );

    let payload: Vec<u8> = match message.payload() {
        Payload::Unknown => Vec::new(),
        Payload::Text(text) => text.clone().into_bytes(),
        Payload::KeyValues(pairs) => kvp::encode(pairs)?.into_bytes(),
    };

    if message.is_one_way() {
        headers.insert(KEY_ONE_WAY.to_string(), VALUE_TRUE.to_string());
    }
    headers.insert(KEY_PAYLOAD_LENGTH.to_string(), payload.len().to_string());

    let header_block = kvp::encode(&headers)?;
    let prefix = encode_length(header_block.len())?;

    let mut wire =
        Vec::with_capacity(HEADER_LENGTH_PREFIX_WIDTH + header_block.len() + payload.len());
    wire.extend_from_slice(prefix.as_bytes());
    wire.extend_from_slice(header_block.as_bytes());
    wire.extend_from_slice(&payload);

    Ok(wire)
}

/// Read one complete message off a byte stream.
///
/// Returns a fully populated message or an error, never a partial message.
pub fn read_message<R: Read>(reader: &mut R) -> MessagingResult<Message> {
    let prefix = read_exact(reader, HEADER_LENGTH_PREFIX_WIDTH)?;
    let header_length = decode_length(&prefix)?;

    if header_length == 0 {
        error!("Header length is zero");
        return Err(MessagingError::Framing {
            kind: FramingErrorKind::EmptyHeader,
        });
    }

    let header_bytes = read_exact(reader, header_length)?;
    let header_block = String::from_utf8_lossy(&header_bytes);
    let headers = kvp::decode(&header_block);

    if headers.is_empty() {
        error!("Unable to parse header block");
        return Err(MessagingError::Parse {
            message: "no parseable pairs in header block".to_string(),
        });
    }

    let is_text = match headers.get(KEY_PAYLOAD_TYPE).map(String::as_str) {
        Some(PAYLOAD_TYPE_TEXT) => true,
        Some(PAYLOAD_TYPE_KVP) => false,
        other => {
            error!(payload_type = ?other, "Unable to identify message type from header");
            return Err(MessagingError::Protocol {
                message: "unable to identify message type from header".to_string(),
            });
        }
    };

    let payload_length = match headers.get(KEY_PAYLOAD_LENGTH) {
        Some(value) if !value.is_empty() => {
            value
                .parse::<usize>()
                .map_err(|_| MessagingError::Framing {
                    kind: FramingErrorKind::InvalidPayloadLength {
                        value: value.clone(),
                    },
                })?
        }
        _ => 0,
    };

    if payload_length > MAX_SEGMENT_LENGTH {
        error!(size = payload_length, "Declared payload exceeds segment limit");
        return Err(MessagingError::Framing {
            kind: FramingErrorKind::PayloadTooLarge {
                size: payload_length,
                max: MAX_SEGMENT_LENGTH,
            },
        });
    }

    let payload = if payload_length > 0 {
        let payload_bytes = read_exact(reader, payload_length)?;
        let payload_text = String::from_utf8_lossy(&payload_bytes);
        if is_text {
            Payload::Text(payload_text.into_owned())
        } else {
            // Unparseable pairs are dropped; an empty map is acceptable here.
            Payload::KeyValues(kvp::decode(&payload_text))
        }
    } else if is_text {
        Payload::Text(String::new())
    } else {
        Payload::KeyValues(BTreeMap::new())
    };

    let mut message = Message::default();
    for (key, value) in &headers {
        message.set_header(key.clone(), value.clone());
    }
    message.set_payload(payload);
    if headers.get(KEY_ONE_WAY).map(String::as_str) == Some(VALUE_TRUE) {
        message.set_one_way(true);
    }

    debug!(
        payload_type = message.payload().type_label(),
        request = message.request_name(),
        "Message reconstituted"
    );

    Ok(message)
}

/// Encode a header length as its decimal string, right-padded with spaces
/// to the fixed prefix width.
fn encode_length(length: usize) -> MessagingResult<String> {
    if length as u64 > MAX_HEADER_LENGTH {
        return Err(MessagingError::Framing {
            kind: FramingErrorKind::HeaderTooLarge { size: length },
        });
    }

    Ok(format!("{:<width$}", length, width = HEADER_LENGTH_PREFIX_WIDTH))
}

/// Parse the fixed-width length prefix: strip trailing spaces, parse as an
/// unsigned decimal integer.
fn decode_length(prefix: &[u8]) -> MessagingResult<usize> {
    let text = String::from_utf8_lossy(prefix);
    let trimmed = text.trim_end_matches(' ');

    trimmed.parse::<usize>().map_err(|_| MessagingError::Framing {
        kind: FramingErrorKind::InvalidLengthPrefix {
            text: trimmed.to_string(),
        },
    })
}

/// Read exactly `wanted` bytes, failing with a framing error on a short
/// read.
fn read_exact<R: Read>(reader: &mut R, wanted: usize) -> MessagingResult<Vec<u8>> {
    let mut buf = vec![0u8; wanted];
    let mut got = 0;

    while got < wanted {
        match reader.read(&mut buf[got..]) {
            Ok(0) => {
                error!(wanted, got, "Short read from peer");
                return Err(MessagingError::Framing {
                    kind: FramingErrorKind::ShortRead { wanted, got },
                });
            }
            Ok(n) => got += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(MessagingError::Io(e)),
        }
    }

    Ok(buf)
}
