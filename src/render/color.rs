//! Color decoration for failure messages.
//!
//! Colors are produced with `termcolor` into an in-memory buffer, so the decorated text can
//! travel inside a panic message or be written to stderr later.

use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// The roles text plays in a failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// The value produced by the code under test.
    Actual,
    /// The value the test expected.
    Expected,
    /// Markers pointing at differences.
    Marker,
    /// Labels and other secondary text.
    Dim,
}

impl Tone {
    fn spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Tone::Actual => spec.set_fg(Some(Color::Red)),
            Tone::Expected => spec.set_fg(Some(Color::Green)),
            Tone::Marker => spec.set_fg(Some(Color::Yellow)).set_bold(true),
            Tone::Dim => spec.set_dimmed(true),
        };
        spec
    }
}

/// Decorates text with ANSI colors, or passes it through untouched when colors are off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wraps `text` in the color for `tone`.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        let mut buffer = Buffer::ansi();
        // Writes into an in-memory buffer cannot fail.
        let _ = buffer.set_color(&tone.spec());
        let _ = buffer.write_all(text.as_bytes());
        let _ = buffer.reset();
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::plain()
    }
}
