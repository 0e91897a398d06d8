//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::panic::{self, AssertUnwindSafe};

use verdict::{Checker, ColorMode, Config};

/// Configuration with colors off, so messages can be matched as plain text.
pub fn plain_config() -> Config {
    Config::default().with_color(ColorMode::Never)
}

pub fn plain_checker() -> Checker {
    Checker::with_config(plain_config())
}

/// Runs `f` and returns the message it panicked with, or `None` if it returned normally.
pub fn panic_message<F: FnOnce()>(f: F) -> Option<String> {
    let payload = panic::catch_unwind(AssertUnwindSafe(f)).err()?;
    if let Some(s) = payload.downcast_ref::<String>() {
        return Some(s.clone());
    }
    if let Some(s) = payload.downcast_ref::<&str>() {
        return Some(s.to_string());
    }
    Some("<non-string panic payload>".to_string())
}
