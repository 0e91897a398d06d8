//! # Failure Diagnostics
//!
//! Every failed check produces a [`Failure`]: the call site of the assertion, the caller's
//! context string, and a [`FailureKind`] describing what went wrong. Values inside a
//! `FailureKind` are already rendered (printable, and colored when colors are on), so the
//! `Display` output is the final message shown to the user.
//!
//! Both types implement `miette::Diagnostic`; each kind carries a stable `verdict::*` code.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::location::CallSite;
use crate::render::message;

/// What a failed check found.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum FailureKind {
    #[error("condition is false")]
    #[diagnostic(code(verdict::condition))]
    Condition,

    #[error("unexpected error: {error}")]
    #[diagnostic(code(verdict::unexpected_error))]
    UnexpectedError { error: String },

    #[error("error mismatch\n    actual: {actual}\n  expected: {expected}")]
    #[diagnostic(code(verdict::error_mismatch))]
    ErrorMismatch { actual: String, expected: String },

    #[error("type mismatch: {actual} != {expected}")]
    #[diagnostic(
        code(verdict::type_mismatch),
        help("values of different types never compare equal; convert one side first")
    )]
    TypeMismatch { actual: String, expected: String },

    #[error("value mismatch\n    actual: {actual}\n  expected: {expected}")]
    #[diagnostic(code(verdict::value_mismatch))]
    ValueMismatch { actual: String, expected: String },

    #[error("text mismatch\n    actual: {actual}\n  expected: {expected}\n      diff: {diff}")]
    #[diagnostic(code(verdict::text_mismatch))]
    TextMismatch {
        actual: String,
        expected: String,
        diff: String,
    },

    #[error("float mismatch: {actual} != {expected} (epsilon {epsilon:e})")]
    #[diagnostic(code(verdict::float_mismatch))]
    FloatMismatch {
        actual: String,
        expected: String,
        epsilon: f64,
    },

    #[error("length mismatch: {actual} != {expected}")]
    #[diagnostic(code(verdict::length_mismatch))]
    LengthMismatch { actual: usize, expected: usize },

    #[error("element {index} mismatch: {actual} != {expected} (epsilon {epsilon:e})")]
    #[diagnostic(code(verdict::element_mismatch))]
    ElementMismatch {
        index: usize,
        actual: String,
        expected: String,
        epsilon: f64,
    },

    #[error("unexpected error for input {input}: {error}")]
    #[diagnostic(code(verdict::upstream_error))]
    UpstreamError { input: String, error: String },

    #[error("output mismatch for input {input}\n    actual: {actual}\n  expected: {expected}")]
    #[diagnostic(code(verdict::output_mismatch))]
    OutputMismatch {
        input: String,
        actual: String,
        expected: String,
    },
}

/// A failed check, ready to be reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    site: CallSite,
    context: String,
    kind: FailureKind,
}

impl Failure {
    pub fn new(site: CallSite, context: &str, kind: FailureKind) -> Self {
        Self {
            site,
            context: context.to_string(),
            kind,
        }
    }

    pub fn site(&self) -> CallSite {
        self.site
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = format!("{}{}", self.site, message(&self.context));
        let head = head.strip_prefix(": ").unwrap_or(&head);
        if head.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", head, self.kind)
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl Diagnostic for Failure {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.help()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_leads_with_site_and_context() {
        let site = CallSite::here();
        let failure = Failure::new(site, "parsing header", FailureKind::Condition);
        assert_eq!(
            failure.to_string(),
            format!("{}: parsing header: condition is false", site)
        );
    }

    #[test]
    fn empty_context_is_omitted() {
        let site = CallSite::here();
        let failure = Failure::new(site, "", FailureKind::Condition);
        assert_eq!(failure.to_string(), format!("{}: condition is false", site));
    }

    #[test]
    fn kinds_carry_codes() {
        let failure = Failure::new(
            CallSite::here(),
            "",
            FailureKind::LengthMismatch {
                actual: 2,
                expected: 3,
            },
        );
        let code = failure.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("verdict::length_mismatch"));
        assert!(failure.to_string().ends_with("length mismatch: 2 != 3"));
    }

    #[test]
    fn float_epsilon_uses_scientific_notation() {
        let kind = FailureKind::FloatMismatch {
            actual: "1.1".into(),
            expected: "1".into(),
            epsilon: 1e-10,
        };
        assert_eq!(kind.to_string(), "float mismatch: 1.1 != 1 (epsilon 1e-10)");
    }
}
