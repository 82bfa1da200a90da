//! ANSI-aware text helpers used by the renderer.
//! Recovers the literal filename from `ls --color=always` output so it can be
//! used as a store key and measured for alignment. Works on raw bytes, since
//! filenames need not be UTF-8.

const ESC: u8 = 0x1b;
const SGR_END: u8 = b'm';

/// Remove color/style escape runs from `input`.
///
/// An escape run starts at ESC and ends at (and includes) the next `m`. This
/// covers SGR sequences only; other VT sequences are not understood. An
/// unterminated run swallows the rest of the input.
pub fn strip(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.iter().copied();
    while let Some(b) = bytes.next() {
        if b == ESC {
            for next in bytes.by_ref() {
                if next == SGR_END {
                    break;
                }
            }
            continue;
        }
        out.push(b);
    }
    out
}

/// Terminal columns taken by already stripped text. Each invalid UTF-8
/// sequence counts as one replacement character.
pub fn text_width(plain: &[u8]) -> usize {
    String::from_utf8_lossy(plain).chars().count()
}

/// Visible length of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &[u8]) -> usize {
    text_width(&strip(s))
}
