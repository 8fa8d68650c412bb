//! Wire protocol module.
//!
//! Defines the message type, the key/value codec, and message framing.
//!
//! ## Wire Format
//!
//! ```text
//! [10 bytes: ASCII decimal header length, space-padded right]
//! [header-length bytes: "k1=v1;k2=v2;..."]
//! [payload-length bytes: raw text or "k=v;..." pairs]
//! ```
//!
//! Reserved header keys: `request`, `payload_type`, `payload_length`,
//! `one_way`. Delimiters (`=`, `;`) are not escaped anywhere in the format;
//! keys and values must not contain them.

mod kvp;
mod message;
mod wire;

pub use message::{
    Message, Payload, KEY_ONE_WAY, KEY_PAYLOAD_LENGTH, KEY_PAYLOAD_TYPE, KEY_REQUEST_NAME,
    MAX_SEGMENT_LENGTH,
};
pub use wire::{encode_message, read_message};
