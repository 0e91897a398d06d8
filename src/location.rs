//! Call-site capture for diagnostics.
//!
//! Every public check is `#[track_caller]`, so the location recorded here is the assertion
//! in the test function rather than a frame inside this crate.

use std::fmt;
use std::panic::Location;
use std::path::Path;

/// File basename and line of an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    /// Captures the site of the outermost `#[track_caller]` caller.
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: basename(location.file()),
            line: location.line(),
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // An unresolvable file renders as nothing rather than a bare line number.
        if self.file.is_empty() {
            return Ok(());
        }
        write!(f, "{}:{}", self.file, self.line)
    }
}

fn basename(path: &'static str) -> &'static str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
}
