//! Key/value pair codec: `k=v` entries joined by `;`.
//!
//! The format has no escaping. Encoding rejects keys and values that contain
//! a delimiter; decoding skips pairs that do not split into a key and a
//! value.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{MessagingError, MessagingResult};

pub(super) const DELIMITER_KEY_VALUE: char = '=';
pub(super) const DELIMITER_PAIR: char = ';';

/// Encode pairs as `k1=v1;k2=v2`.
pub(super) fn encode(pairs: &BTreeMap<String, String>) -> MessagingResult<String> {
    let mut encoded = String::new();

    for (i, (key, value)) in pairs.iter().enumerate() {
        validate_token(key)?;
        validate_token(value)?;

        if i > 0 {
            encoded.push(DELIMITER_PAIR);
        }
        encoded.push_str(key);
        encoded.push(DELIMITER_KEY_VALUE);
        encoded.push_str(value);
    }

    Ok(encoded)
}

fn validate_token(token: &str) -> MessagingResult<()> {
    if token.contains(DELIMITER_KEY_VALUE) || token.contains(DELIMITER_PAIR) {
        return Err(MessagingError::InvalidMessage {
            message: format!("key or value contains a reserved delimiter: '{}'", token),
        });
    }
    Ok(())
}

/// Decode `k1=v1;k2=v2` into a map.
///
/// Pairs that do not yield a non-empty key and value are skipped; the
/// returned map is empty when nothing parsed.
pub(super) fn decode(encoded: &str) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();

    if encoded.is_empty() {
        return pairs;
    }

    for pair in encoded.split(DELIMITER_PAIR) {
        match pair.split_once(DELIMITER_KEY_VALUE) {
            Some((key, value)) if !key.is_empty() && !value.is_empty() => {
                pairs.insert(key.to_string(), value.to_string());
            }
            _ => {
                debug!(pair = %pair, "Skipping unparseable key/value pair");
            }
        }
    }

    pairs
}
