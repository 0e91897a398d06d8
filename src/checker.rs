//! # Checker
//!
//! The test-outcome object. A [`Checker`] runs the checks from [`crate::check`] and applies a
//! failure discipline chosen per check family:
//!
//! - **Fail-fast** ([`that`](Checker::that), [`no_error`](Checker::no_error),
//!   [`error_is`](Checker::error_is), [`equal`](Checker::equal), [`bytes`](Checker::bytes),
//!   [`string`](Checker::string), the float checks): the first failure panics at the
//!   assertion's call site and the test stops. These methods take `&self`.
//! - **Accumulate-and-continue** ([`transform`](Checker::transform)): failures are written to
//!   stderr and recorded, and the test keeps running. When the `Checker` is dropped (or
//!   [`finish`](Checker::finish)ed) with recorded failures it panics, so the test still ends
//!   failed. These methods take `&mut self`.
//!
//! ```rust
//! use verdict::Checker;
//!
//! let mut check = Checker::new();
//! check.equal(&vec![1, 2, 3], &vec![1, 2, 3], "");
//! check.float(0.1 + 0.2, 0.3, "sum");
//! check.transform("a  b", None, "a b", "a b", "collapse spaces");
//! check.finish();
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt::{Debug, Display};

use crate::check::{self, CheckResult};
use crate::compare::Equatable;
use crate::config::Config;
use crate::diagnostics::Failure;
use crate::render::Tone;

/// Runs checks for one test and reports their failures.
///
/// A `Checker` belongs to a single test; it is not meant to be shared between threads.
#[derive(Debug)]
pub struct Checker {
    config: Config,
    failures: Vec<Failure>,
}

impl Checker {
    /// A checker using the process-wide [`Config::global`].
    pub fn new() -> Self {
        Self::with_config(*Config::global())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            failures: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Fail-fast checks
    // ------------------------------------------------------------------------

    /// Stops the test if `condition` is false.
    #[track_caller]
    pub fn that(&self, condition: bool, context: &str) {
        self.enforce(check::that(condition, context));
    }

    /// Stops the test if `result` is an error; otherwise returns the success value.
    #[track_caller]
    pub fn no_error<T, E: Display>(&self, result: Result<T, E>, context: &str) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.fail_now(check::unexpected_error(&self.config, &error, context)),
        }
    }

    /// Stops the test unless `actual` is (or wraps) an error equal to `expected`.
    #[track_caller]
    pub fn error_is<E>(
        &self,
        actual: Option<&(dyn Error + 'static)>,
        expected: Option<&E>,
        context: &str,
    ) where
        E: Error + PartialEq + 'static,
    {
        self.enforce(check::error_is(&self.config, actual, expected, context));
    }

    /// Stops the test unless `actual` and `expected` have the same type and compare equal.
    #[track_caller]
    pub fn equal<A, E>(&self, actual: &A, expected: &E, context: &str)
    where
        A: Any + Debug,
        E: Equatable + Any + Debug,
    {
        self.enforce(check::equal(&self.config, actual, expected, context));
    }

    #[track_caller]
    pub fn bytes(&self, actual: &[u8], expected: &[u8], context: &str) {
        self.enforce(check::bytes(&self.config, actual, expected, context));
    }

    #[track_caller]
    pub fn string(&self, actual: &str, expected: &str, context: &str) {
        self.enforce(check::string(&self.config, actual, expected, context));
    }

    /// Float equality with the configured epsilon.
    #[track_caller]
    pub fn float(&self, actual: f64, expected: f64, context: &str) {
        self.float_eps(actual, expected, self.config.epsilon, context);
    }

    #[track_caller]
    pub fn float_eps(&self, actual: f64, expected: f64, epsilon: f64, context: &str) {
        self.enforce(check::float(&self.config, actual, expected, epsilon, context));
    }

    /// Pairwise float equality with the configured epsilon.
    #[track_caller]
    pub fn floats(&self, actual: &[f64], expected: &[f64], context: &str) {
        self.floats_eps(actual, expected, self.config.epsilon, context);
    }

    #[track_caller]
    pub fn floats_eps(&self, actual: &[f64], expected: &[f64], epsilon: f64, context: &str) {
        self.enforce(check::floats(&self.config, actual, expected, epsilon, context));
    }

    // ------------------------------------------------------------------------
    // Accumulate-and-continue checks
    // ------------------------------------------------------------------------

    /// Records an upstream error and an output mismatch as separate failures.
    #[track_caller]
    pub fn transform(
        &mut self,
        input: &str,
        error: Option<&(dyn Error + 'static)>,
        output: &str,
        expected: &str,
        context: &str,
    ) {
        for failure in check::transform(&self.config, input, error, output, expected, context) {
            self.record(failure);
        }
    }

    // ------------------------------------------------------------------------
    // Outcome
    // ------------------------------------------------------------------------

    /// Failures recorded so far by continue-on-failure checks.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn has_failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Removes and returns the recorded failures, clearing the test's failed state.
    pub fn take_failures(&mut self) -> Vec<Failure> {
        std::mem::take(&mut self.failures)
    }

    /// Ends the test, panicking if any failure was recorded.
    #[track_caller]
    pub fn finish(mut self) {
        let failures = self.take_failures();
        if !failures.is_empty() {
            panic!("{}", summary(&failures));
        }
    }

    #[track_caller]
    fn enforce(&self, result: CheckResult) {
        if let Err(failure) = result {
            self.fail_now(failure);
        }
    }

    #[track_caller]
    fn fail_now(&self, failure: Failure) -> ! {
        if self.failures.is_empty() {
            panic!("{}", failure);
        }
        panic!(
            "{}\n\nrecorded earlier:\n{}",
            failure,
            summary(&self.failures)
        );
    }

    fn record(&mut self, failure: Failure) {
        let fail = self.config.painter().paint("FAIL", Tone::Actual);
        eprintln!("{}: {}", fail, failure);
        self.failures.push(failure);
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Checker {
    fn drop(&mut self) {
        if self.failures.is_empty() || std::thread::panicking() {
            return;
        }
        let failures = self.take_failures();
        panic!("{}", summary(&failures));
    }
}

fn summary(failures: &[Failure]) -> String {
    let mut out = format!("{} check(s) failed:", failures.len());
    for failure in failures {
        out.push_str("\n  ");
        out.push_str(&failure.to_string().replace('\n', "\n  "));
    }
    out
}
