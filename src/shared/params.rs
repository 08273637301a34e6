//! Helpers for query parameters.
//!
//! The delete and update endpoints percent-decode the identifier twice on top
//! of the decoding already done by the query extractor, so clients that
//! double-encode ids keep working.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};

/// Percent-decode `raw` twice. Invalid UTF-8 is replaced, never rejected.
pub fn decode_id_param(raw: &str) -> String {
    let once = decode_lossy(raw);
    decode_lossy(&once).into_owned()
}

fn decode_lossy(raw: &str) -> Cow<'_, str> {
    if !raw.contains('%') {
        return Cow::Borrowed(raw);
    }
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse a row identifier. Anything that isn't an integer matches no row.
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok()
}

/// Parse a boolean flag the way HTML forms and query strings spell it.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" | "y" | "t" => Some(true),
        "false" | "0" | "off" | "no" | "n" | "f" => Some(false),
        _ => None,
    }
}

/// `deserialize_with` target for boolean query params (`completed=1`, `completed=on`, ...)
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean '{}'", raw)))
}
