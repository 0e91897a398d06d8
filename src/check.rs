//! # Checks
//!
//! Pure check functions: each evaluates one predicate and returns the rendered [`Failure`]
//! instead of reporting it. [`Checker`](crate::Checker) decides what a failure does to the
//! running test; these functions only decide whether there is one.
//!
//! ## Checks Provided
//!
//! - **Conditions and errors**: [`that`], [`no_error`], [`error_is`]
//! - **Typed equality**: [`equal`]
//! - **Text**: [`bytes`], [`string`]
//! - **Floats**: [`float`], [`floats`]
//! - **Transforms**: [`transform`]
//!
//! Every function is `#[track_caller]`, so a failure points at the assertion that called it.

use std::any::Any;
use std::error::Error;
use std::fmt::{Debug, Display};
use std::io;

use crate::compare::{self, float_equal, Equatable, Verdict};
use crate::config::Config;
use crate::diagnostics::{Failure, FailureKind};
use crate::location::CallSite;
use crate::render::{diff, printable, printable_bytes, Painter, Tone};

pub type CheckResult = Result<(), Failure>;

// ============================================================================
// CONDITIONS AND ERRORS
// ============================================================================

/// Fails when `condition` is false.
#[track_caller]
pub fn that(condition: bool, context: &str) -> CheckResult {
    if condition {
        return Ok(());
    }
    Err(Failure::new(CallSite::here(), context, FailureKind::Condition))
}

/// Fails when `error` is present, reporting its text verbatim.
#[track_caller]
pub fn no_error<E>(config: &Config, error: Option<&E>, context: &str) -> CheckResult
where
    E: Display + ?Sized,
{
    match error {
        Some(error) => Err(unexpected_error(config, error, context)),
        None => Ok(()),
    }
}

#[track_caller]
pub(crate) fn unexpected_error<E>(config: &Config, error: &E, context: &str) -> Failure
where
    E: Display + ?Sized,
{
    let painter = config.painter();
    Failure::new(
        CallSite::here(),
        context,
        FailureKind::UnexpectedError {
            error: painter.paint(&printable(&error.to_string()), Tone::Actual),
        },
    )
}

/// Fails unless `actual` matches `expected` by identity.
///
/// `None` only matches `None`. Otherwise the `source()` chain of `actual` is walked, looking
/// inside `io::Error` payloads as well, and the check passes if any link is an `E` equal to
/// `expected`.
#[track_caller]
pub fn error_is<E>(
    config: &Config,
    actual: Option<&(dyn Error + 'static)>,
    expected: Option<&E>,
    context: &str,
) -> CheckResult
where
    E: Error + PartialEq + 'static,
{
    let matched = match (actual, expected) {
        (None, None) => true,
        (Some(actual), Some(expected)) => chain_contains(actual, expected),
        _ => false,
    };
    if matched {
        return Ok(());
    }
    let painter = config.painter();
    Err(Failure::new(
        CallSite::here(),
        context,
        FailureKind::ErrorMismatch {
            actual: painter.paint(&describe_error(actual), Tone::Actual),
            expected: painter.paint(
                &describe_error(expected.map(|e| e as &(dyn Error + 'static))),
                Tone::Expected,
            ),
        },
    ))
}

fn chain_contains<E>(error: &(dyn Error + 'static), expected: &E) -> bool
where
    E: Error + PartialEq + 'static,
{
    let mut current = Some(error);
    while let Some(link) = current {
        if link.downcast_ref::<E>() == Some(expected) {
            return true;
        }
        // io::Error::source skips its own payload, so look at the payload directly.
        if let Some(inner) = link.downcast_ref::<io::Error>().and_then(|e| e.get_ref()) {
            if chain_contains(inner, expected) {
                return true;
            }
        }
        current = link.source();
    }
    false
}

fn describe_error(error: Option<&(dyn Error + 'static)>) -> String {
    match error {
        Some(error) => printable(&error.to_string()),
        None => "no error".to_string(),
    }
}

// ============================================================================
// TYPED EQUALITY
// ============================================================================

/// Fails unless `actual` and `expected` have the same type and compare equal.
///
/// See [`compare::compare`] for the comparison order.
#[track_caller]
pub fn equal<A, E>(config: &Config, actual: &A, expected: &E, context: &str) -> CheckResult
where
    A: Any + Debug,
    E: Equatable + Any + Debug,
{
    let painter = config.painter();
    let kind = match compare::compare(actual, expected) {
        Verdict::Equal => return Ok(()),
        Verdict::TypeMismatch { actual, expected } => FailureKind::TypeMismatch {
            actual: painter.paint(actual, Tone::Actual),
            expected: painter.paint(expected, Tone::Expected),
        },
        Verdict::Unequal => FailureKind::ValueMismatch {
            actual: painter.paint(&printable(&format!("{:?}", actual)), Tone::Actual),
            expected: painter.paint(&printable(&format!("{:?}", expected)), Tone::Expected),
        },
    };
    Err(Failure::new(CallSite::here(), context, kind))
}

// ============================================================================
// TEXT
// ============================================================================

/// Fails unless the byte slices are equal; both sides are shown printable.
#[track_caller]
pub fn bytes(config: &Config, actual: &[u8], expected: &[u8], context: &str) -> CheckResult {
    if actual == expected {
        return Ok(());
    }
    let painter = config.painter();
    let actual_text = String::from_utf8_lossy(actual);
    let expected_text = String::from_utf8_lossy(expected);
    Err(Failure::new(
        CallSite::here(),
        context,
        FailureKind::TextMismatch {
            actual: painter.paint(&printable_bytes(actual), Tone::Actual),
            expected: painter.paint(&printable_bytes(expected), Tone::Expected),
            diff: text_diff(&actual_text, &expected_text, &painter),
        },
    ))
}

/// Fails unless the strings are equal; both sides are shown printable.
#[track_caller]
pub fn string(config: &Config, actual: &str, expected: &str, context: &str) -> CheckResult {
    if actual == expected {
        return Ok(());
    }
    let painter = config.painter();
    Err(Failure::new(
        CallSite::here(),
        context,
        FailureKind::TextMismatch {
            actual: painter.paint(&printable(actual), Tone::Actual),
            expected: painter.paint(&printable(expected), Tone::Expected),
            diff: text_diff(actual, expected, &painter),
        },
    ))
}

fn text_diff(actual: &str, expected: &str, painter: &Painter) -> String {
    let rendered = diff(actual, expected, painter);
    if rendered.contains('\n') {
        format!("\n{}", indent(&rendered, "    "))
    } else {
        rendered
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// FLOATS
// ============================================================================

/// Fails unless `actual` is within `epsilon` of `expected`.
///
/// See [`compare::float_equal`] for the tolerance rule.
#[track_caller]
pub fn float(
    config: &Config,
    actual: f64,
    expected: f64,
    epsilon: f64,
    context: &str,
) -> CheckResult {
    if float_equal(actual, expected, epsilon) {
        return Ok(());
    }
    let painter = config.painter();
    Err(Failure::new(
        CallSite::here(),
        context,
        FailureKind::FloatMismatch {
            actual: painter.paint(&actual.to_string(), Tone::Actual),
            expected: painter.paint(&expected.to_string(), Tone::Expected),
            epsilon,
        },
    ))
}

/// Fails unless the sequences have equal length and every pair passes [`float`].
#[track_caller]
pub fn floats(
    config: &Config,
    actual: &[f64],
    expected: &[f64],
    epsilon: f64,
    context: &str,
) -> CheckResult {
    if actual.len() != expected.len() {
        return Err(Failure::new(
            CallSite::here(),
            context,
            FailureKind::LengthMismatch {
                actual: actual.len(),
                expected: expected.len(),
            },
        ));
    }
    let Some(index) = compare::float::first_difference(actual, expected, epsilon) else {
        return Ok(());
    };
    let painter = config.painter();
    Err(Failure::new(
        CallSite::here(),
        context,
        FailureKind::ElementMismatch {
            index,
            actual: painter.paint(&actual[index].to_string(), Tone::Actual),
            expected: painter.paint(&expected[index].to_string(), Tone::Expected),
            epsilon,
        },
    ))
}

// ============================================================================
// TRANSFORMS
// ============================================================================

/// Checks the result of running a transformation on `input`.
///
/// An upstream error and an output mismatch are independent: each produces its own failure,
/// so the returned list holds zero, one or two entries.
#[track_caller]
pub fn transform(
    config: &Config,
    input: &str,
    error: Option<&(dyn Error + 'static)>,
    output: &str,
    expected: &str,
    context: &str,
) -> Vec<Failure> {
    let site = CallSite::here();
    let painter = config.painter();
    let shown_input = painter.paint(&printable(input), Tone::Dim);
    let mut failures = Vec::new();
    if let Some(error) = error {
        failures.push(Failure::new(
            site,
            context,
            FailureKind::UpstreamError {
                input: shown_input.clone(),
                error: painter.paint(&printable(&error.to_string()), Tone::Actual),
            },
        ));
    }
    if output != expected {
        failures.push(Failure::new(
            site,
            context,
            FailureKind::OutputMismatch {
                input: shown_input,
                actual: painter.paint(&printable(output), Tone::Actual),
                expected: painter.paint(&printable(expected), Tone::Expected),
            },
        ));
    }
    failures
}
