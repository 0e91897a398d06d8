//! Diff rendering for text mismatches.
//!
//! Single-line values are diffed character by character and shown inline, with text only in
//! the expected value as `[-...-]` and text only in the actual value as `{+...+}`. Multi-line
//! values are diffed line by line using the usual ` `/`-`/`+` prefixes. Every fragment goes
//! through [`printable`](super::printable) first.

use difference::{Changeset, Difference};

use super::color::{Painter, Tone};
use super::printable::printable;

/// Renders the difference between `actual` and `expected`.
///
/// Returns an empty string when the two are equal.
pub fn diff(actual: &str, expected: &str, painter: &Painter) -> String {
    if actual == expected {
        return String::new();
    }
    if actual.contains('\n') || expected.contains('\n') {
        line_diff(actual, expected, painter)
    } else {
        inline_diff(actual, expected, painter)
    }
}

fn inline_diff(actual: &str, expected: &str, painter: &Painter) -> String {
    let changeset = Changeset::new(expected, actual, "");
    let mut out = String::new();
    for d in &changeset.diffs {
        match d {
            Difference::Same(x) => out.push_str(&printable(x)),
            Difference::Rem(x) => {
                let fragment = format!("[-{}-]", printable(x));
                out.push_str(&painter.paint(&fragment, Tone::Expected));
            }
            Difference::Add(x) => {
                let fragment = format!("{{+{}+}}", printable(x));
                out.push_str(&painter.paint(&fragment, Tone::Actual));
            }
        }
    }
    out
}

fn line_diff(actual: &str, expected: &str, painter: &Painter) -> String {
    let changeset = Changeset::new(expected, actual, "\n");
    let mut lines = Vec::new();
    for d in &changeset.diffs {
        match d {
            Difference::Same(x) => {
                lines.extend(x.split('\n').map(|line| format!(" {}", printable(line))));
            }
            Difference::Rem(x) => {
                lines.extend(
                    x.split('\n')
                        .map(|line| painter.paint(&format!("-{}", printable(line)), Tone::Expected)),
                );
            }
            Difference::Add(x) => {
                lines.extend(
                    x.split('\n')
                        .map(|line| painter.paint(&format!("+{}", printable(line)), Tone::Actual)),
                );
            }
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_text_has_no_diff() {
        assert_eq!(diff("same", "same", &Painter::plain()), "");
    }

    #[test]
    fn inline_diff_marks_both_sides() {
        let rendered = diff("abd", "abc", &Painter::plain());
        assert_eq!(rendered, "ab[-c-]{+d+}");
    }

    #[test]
    fn inline_diff_escapes_fragments() {
        let rendered = diff("a\tb", "ab", &Painter::plain());
        assert_eq!(rendered, "a{+\\t+}b");
    }

    #[test]
    fn multi_line_values_diff_by_line() {
        let rendered = diff("one\ntwo\nthree", "one\n2\nthree", &Painter::plain());
        assert!(rendered.contains(" one"));
        assert!(rendered.contains("-2"));
        assert!(rendered.contains("+two"));
        assert!(rendered.contains(" three"));
    }
}
