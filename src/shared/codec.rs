//! Percent encoding for store fields.
//!
//! ASCII letters, digits, `-`, `_` and `.` pass through; every other byte is
//! written as `%XX` with uppercase hex. The encoded form never contains `|`
//! or a newline, so a field always fits on one line of the store.

use crate::error::{Error, Result};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn is_literal(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.')
}

fn push_unit(out: &mut String, b: u8) {
    if is_literal(b) {
        out.push(b as char);
    } else {
        out.push('%');
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
}

fn unit_len(b: u8) -> usize {
    if is_literal(b) { 1 } else { 3 }
}

pub fn encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input {
        push_unit(&mut out, b);
    }
    out
}

/// Like [`encode`], but stops before the output would exceed `limit` bytes.
/// An escape is either emitted whole or not at all.
pub fn encode_limited(input: &[u8], limit: usize) -> String {
    let mut out = String::new();
    for &b in input {
        if out.len() + unit_len(b) > limit {
            break;
        }
        push_unit(&mut out, b);
    }
    out
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Reverse [`encode`]. A `%` that is not followed by two hex digits is
/// rejected rather than guessed at.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    decode_limited(input, usize::MAX)
}

/// Like [`decode`], but stops once `limit` bytes have been produced.
pub fn decode_limited(bytes: &[u8], limit: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(bytes.len().min(limit));
    let mut i = 0;
    while i < bytes.len() && out.len() < limit {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        if i + 2 >= bytes.len() {
            return Err(Error::Decode {
                offset: i,
                reason: "truncated escape",
            });
        }
        match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
            (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
            _ => {
                return Err(Error::Decode {
                    offset: i,
                    reason: "expected two hex digits after '%'",
                });
            }
        }
        i += 3;
    }
    Ok(out)
}
