//! Reserved character escaping for field values

use super::constants::{ESCAPE_CHAR, RESERVED_CHARS};
use crate::{Error, Result};

/// Prefix every reserved character with a backslash.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if RESERVED_CHARS.contains(&c) {
            out.push(ESCAPE_CHAR);
        }
        out.push(c);
    }
    out
}

/// Reverse [`escape`]. A backslash makes the following character literal.
pub fn unescape(value: &str) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHAR {
            let escaped = chars
                .next()
                .ok_or_else(|| Error::InvalidPayload("dangling escape character".to_string()))?;
            out.push(escaped);
        } else {
            out.push(c);
        }
    }
    Ok(out)
}
