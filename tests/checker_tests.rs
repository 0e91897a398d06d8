//! Failure disciplines of the `Checker`: fail-fast panics at the assertion site, and
//! transform checks accumulate until the test ends.

mod common;

use std::error::Error;
use std::io::Write;

use verdict::fault::plain_error;
use verdict::{ColorMode, Config, ErrorWriter, FailureKind};

use common::{panic_message, plain_checker};

/// A toy transformation that collapses runs of spaces, writing into `out`.
fn collapse_spaces<W: Write>(input: &str, out: &mut W) -> std::io::Result<()> {
    let mut last_space = false;
    for c in input.chars() {
        if c == ' ' && last_space {
            continue;
        }
        last_space = c == ' ';
        let mut buf = [0u8; 4];
        out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod fail_fast_tests {
    use super::*;

    #[test]
    fn failure_points_at_the_assertion_line() {
        let line = line!() + 1;
        let message = panic_message(|| plain_checker().that(false, "ready")).unwrap();
        assert!(message.starts_with(&format!("checker_tests.rs:{}: ready", line)));
    }

    #[test]
    fn passing_checks_do_not_panic() {
        let message = panic_message(|| {
            let check = plain_checker();
            check.that(true, "");
            check.equal(&"abc", &"abc", "");
            check.bytes(b"abc", b"abc", "");
            check.float(0.1 + 0.2, 0.3, "");
            check.floats(&[1.0, f64::NAN], &[1.0, f64::NAN], "");
            check.error_is::<verdict::PlainError>(None, None, "");
        });
        assert_eq!(message, None);
    }

    #[test]
    fn first_failure_stops_the_test() {
        let mut reached = false;
        let message = panic_message(|| {
            let check = plain_checker();
            check.string("abc", "abd", "first");
            reached = true;
        })
        .unwrap();
        assert!(!reached);
        assert!(message.contains("first: text mismatch"));
    }

    #[test]
    fn no_error_passes_values_through_and_stops_on_errors() {
        let check = plain_checker();
        let mut sink = Vec::new();
        check.no_error(collapse_spaces("a  b", &mut sink), "collapse");
        check.bytes(&sink, b"a b", "");

        let message = panic_message(|| {
            let mut sink = ErrorWriter::new(1);
            plain_checker().no_error(collapse_spaces("ab", &mut sink), "collapse");
        })
        .unwrap();
        assert!(message.contains("collapse: unexpected error: error"));
    }

    #[test]
    fn configured_epsilon_applies_to_float_checks() {
        let loose = Config::default()
            .with_color(ColorMode::Never)
            .with_epsilon(1e-3);
        let check = verdict::Checker::with_config(loose);
        check.float(1.0001, 1.0, "");
        check.float_eps(1.0, 1.0, 0.0, "");

        let message = panic_message(|| plain_checker().float(1.0001, 1.0, "")).unwrap();
        assert!(message.contains("epsilon 1e-10"));
    }

    #[test]
    fn colors_decorate_values_when_enabled() {
        let colored = Config::default().with_color(ColorMode::Always);
        let message =
            panic_message(|| verdict::Checker::with_config(colored).string("a", "b", "")).unwrap();
        assert!(message.contains("\x1b["));
    }
}

#[cfg(test)]
mod accumulate_tests {
    use super::*;

    #[test]
    fn transform_keeps_going_after_failures() {
        let mut check = plain_checker();
        let cases = [("a  b", "a b"), ("x   y", "x  y"), ("  ", " ")];
        for (input, expected) in cases {
            let mut out = Vec::new();
            let result = collapse_spaces(input, &mut out);
            let err = result.as_ref().err().map(|e| e as &(dyn Error + 'static));
            check.transform(input, err, &String::from_utf8_lossy(&out), expected, "");
        }
        let failures = check.take_failures();
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0].kind(), FailureKind::OutputMismatch { .. }));
    }

    #[test]
    fn error_and_mismatch_are_separate_failures() {
        let mut check = plain_checker();
        let err = plain_error();
        check.transform("in", Some(&err as &(dyn Error + 'static)), "", "out", "");
        let failures = check.take_failures();
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn unfinished_failures_fail_the_test_on_drop() {
        let message = panic_message(|| {
            let mut check = plain_checker();
            check.transform("in", None, "a", "b", "one");
            check.transform("in", None, "c", "d", "two");
        })
        .unwrap();
        assert!(message.starts_with("2 check(s) failed:"));
        assert!(message.contains("one: output mismatch"));
        assert!(message.contains("two: output mismatch"));
    }

    #[test]
    fn finish_panics_with_the_same_summary() {
        let message = panic_message(|| {
            let mut check = plain_checker();
            check.transform("in", None, "a", "b", "");
            check.finish();
        })
        .unwrap();
        assert!(message.starts_with("1 check(s) failed:"));
    }
}
