//! Numeric tolerance comparison.
//!
//! The tolerance is absolute near zero and relative for large magnitudes: two values are equal
//! when `|a - b| <= epsilon * max(1, min(|a| + |b|, f64::MAX))`. The cap keeps the scale finite
//! when `|a| + |b|` overflows.

/// Epsilon used when a check does not name one and no configuration overrides it.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Whether `actual` is within `epsilon` of `expected`.
///
/// NaN only equals NaN. Exactly equal values always pass, which covers infinities and zeros.
///
/// ```rust
/// use verdict::compare::{float_equal, DEFAULT_EPSILON};
/// assert!(float_equal(1.0000000001, 1.0, DEFAULT_EPSILON));
/// assert!(!float_equal(1.1, 1.0, DEFAULT_EPSILON));
/// assert!(float_equal(f64::NAN, f64::NAN, 0.0));
/// ```
pub fn float_equal(actual: f64, expected: f64, epsilon: f64) -> bool {
    match (actual.is_nan(), expected.is_nan()) {
        (true, true) => return true,
        (true, false) | (false, true) => return false,
        (false, false) => {}
    }
    if actual == expected {
        return true;
    }
    let scale = (actual.abs() + expected.abs()).min(f64::MAX).max(1.0);
    (actual - expected).abs() <= epsilon * scale
}

/// Pairwise [`float_equal`]; sequences of different lengths are never equal.
pub fn floats_equal(actual: &[f64], expected: &[f64], epsilon: f64) -> bool {
    first_difference(actual, expected, epsilon).is_none()
}

/// Index of the first pair outside tolerance, or `None` if every pair passes.
///
/// When the lengths differ the index is the length of the shorter slice.
pub fn first_difference(actual: &[f64], expected: &[f64], epsilon: f64) -> Option<usize> {
    if actual.len() != expected.len() {
        return Some(actual.len().min(expected.len()));
    }
    actual
        .iter()
        .zip(expected)
        .position(|(a, e)| !float_equal(*a, *e, epsilon))
}
