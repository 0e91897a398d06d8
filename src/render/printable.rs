//! Printable rendering of strings and byte slices.
//!
//! Control and other non-printable characters are replaced with visible escapes so that a
//! failure shows exactly what differs. Printable characters, multi-byte text and the backslash
//! itself are left alone, which makes the rendering idempotent on strings without control
//! characters.

use std::fmt::Write;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Escapes every non-printable character in `s`.
///
/// `\n`, `\r` and `\t` keep their familiar form; everything else uses the shortest of
/// `\xHH`, `\uHHHH` and `\UHHHHHHHH` that fits the code point.
///
/// ```rust
/// use verdict::render::printable;
/// assert_eq!(printable("a\tb\n"), "a\\tb\\n");
/// assert_eq!(printable("\u{7f}"), "\\x7F");
/// assert_eq!(printable("héllo"), "héllo");
/// ```
pub fn printable(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        push_char(&mut out, c);
    }
    out
}

/// Like [`printable`], but for arbitrary bytes: invalid UTF-8 is escaped byte by byte.
pub fn printable_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            push_char(&mut out, c);
        }
        for b in chunk.invalid() {
            let _ = write!(out, "\\x{:02X}", b);
        }
    }
    out
}

fn push_char(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if is_printable(c) => out.push(c),
        c => {
            let code = c as u32;
            let _ = if code < 0x80 {
                write!(out, "\\x{:02X}", code)
            } else if code < 0x1_0000 {
                write!(out, "\\u{:04X}", code)
            } else {
                write!(out, "\\U{:08X}", code)
            };
        }
    }
}

/// Whether a character can be shown as-is in a terminal.
///
/// Letters, marks, numbers, punctuation, symbols and the plain space are printable. Every other
/// general category is not: controls, separators, format characters, private use code points,
/// surrogates and unassigned code points (noncharacters included).
pub fn is_printable(c: char) -> bool {
    use GeneralCategory::*;

    c == ' '
        || matches!(
            get_general_category(c),
            UppercaseLetter
                | LowercaseLetter
                | TitlecaseLetter
                | ModifierLetter
                | OtherLetter
                | NonspacingMark
                | SpacingMark
                | EnclosingMark
                | DecimalNumber
                | LetterNumber
                | OtherNumber
                | ConnectorPunctuation
                | DashPunctuation
                | OpenPunctuation
                | ClosePunctuation
                | InitialPunctuation
                | FinalPunctuation
                | OtherPunctuation
                | MathSymbol
                | CurrencySymbol
                | ModifierSymbol
                | OtherSymbol
        )
}
