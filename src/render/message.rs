//! Context message formatting.
//!
//! Callers pass context already formatted (`format!` at the call site); these helpers only
//! normalize it into the `": context"` suffix that follows the call site in a failure.

/// Renders a context string as a failure-message suffix.
///
/// Empty context renders as nothing. Otherwise the result is `": "` followed by the context,
/// with one trailing line terminator removed and any remaining line breaks turned into spaces.
///
/// ```rust
/// use verdict::render::message;
/// assert_eq!(message(""), "");
/// assert_eq!(message("decoding header\n"), ": decoding header");
/// ```
pub fn message(context: &str) -> String {
    if context.is_empty() {
        return String::new();
    }
    let trimmed = strip_one_terminator(context);
    let mut out = String::with_capacity(trimmed.len() + 2);
    out.push_str(": ");
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Space-joins several context parts, skipping empty ones.
pub fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_one_terminator(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}
