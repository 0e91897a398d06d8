//! # Fault Injectors
//!
//! Bounded-success stand-ins for a byte source and a byte sink. Each one serves a fixed
//! number of successful operations and then fails forever with the [`PlainError`] sentinel,
//! which lets a consumer's error handling be driven through a deterministic sequence of
//! successes followed by a deterministic failure.
//!
//! ## Types Provided
//!
//! - **Bounded source**: [`ErrorReader`] (`std::io::Read`)
//! - **Bounded sink**: [`ErrorWriter`] (`std::io::Write`)
//! - **Sentinel**: [`PlainError`], matched with [`is_plain`]
//!
//! Both injectors take `&mut self` for every operation and carry no synchronization. They are
//! single-owner objects: use one instance per sequential test and build a new one to reset it.

use std::io::{self, Read, Write};

use thiserror::Error;

/// Filler byte produced by every successful [`ErrorReader`] read.
pub const FILLER: u8 = b'.';

/// The sentinel returned by the injectors once their budget is spent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[error("error")]
pub struct PlainError;

/// Builds the `io::Error` the injectors return, carrying [`PlainError`] as its payload.
pub fn plain_error() -> io::Error {
    io::Error::new(io::ErrorKind::Other, PlainError)
}

/// Returns true if `err` is the injected sentinel rather than some other I/O failure.
pub fn is_plain(err: &io::Error) -> bool {
    err.get_ref()
        .map(|inner| inner.is::<PlainError>())
        .unwrap_or(false)
}

// ============================================================================
// BOUNDED SOURCE
// ============================================================================

/// A reader that serves `n` single-byte reads before returning [`PlainError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReader {
    remaining: usize,
}

impl ErrorReader {
    /// Creates a reader that succeeds `n` times.
    pub fn new(n: usize) -> Self {
        Self { remaining: n }
    }

    /// Number of successful reads left before the reader starts failing.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl Read for ErrorReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(first) = buf.first_mut() else {
            return Ok(0);
        };
        if self.remaining == 0 {
            return Err(plain_error());
        }
        self.remaining -= 1;
        *first = FILLER;
        Ok(1)
    }
}

// ============================================================================
// BOUNDED SINK
// ============================================================================

/// A writer that accepts `n` whole writes before returning [`PlainError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorWriter {
    remaining: usize,
}

impl ErrorWriter {
    /// Creates a writer that succeeds `n` times.
    pub fn new(n: usize) -> Self {
        Self { remaining: n }
    }

    /// Number of successful writes left before the writer starts failing.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl Write for ErrorWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(plain_error());
        }
        self.remaining -= 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
