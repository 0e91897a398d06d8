//! Verdict: comparison helpers and fault-injecting I/O doubles for tests.
//!
//! - [`Checker`] runs checks against the current test and reports failures with the call site,
//!   the caller's context and printable, colorized values.
//! - [`check`] holds the same checks as pure functions returning [`Failure`]s.
//! - [`compare`] holds the typed equality dispatcher and the float tolerance rule.
//! - [`fault`] holds [`ErrorReader`] and [`ErrorWriter`], which succeed a fixed number of
//!   times and then fail with [`PlainError`].

pub use crate::checker::Checker;
pub use crate::compare::{Equatable, Verdict, DEFAULT_EPSILON};
pub use crate::config::{ColorMode, Config};
pub use crate::diagnostics::{Failure, FailureKind};
pub use crate::fault::{is_plain, ErrorReader, ErrorWriter, PlainError};

pub mod check;
pub mod checker;
pub mod compare;
pub mod config;
pub mod diagnostics;
pub mod fault;
pub mod location;
pub mod render;
