// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Clean free-text input typed into either front end before it reaches the models.

use unicode_normalization::UnicodeNormalization;

/// Normalize a line of user input.
///
/// # Steps
/// - Drop control characters (tabs and line breaks count as whitespace first).
/// - Drop zero-width characters and the byte-order mark.
/// - Collapse whitespace runs to a single space and trim both ends.
/// - Compose to NFC, so `e` + combining grave and a precomposed `è` compare equal.
pub fn normalize_input(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;

    for ch in value.nfc() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if ch.is_control() || is_zero_width(ch) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    out
}

fn is_zero_width(ch: char) -> bool {
    matches!(
        ch,
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
    )
}
