//! # Value Comparison
//!
//! The typed equality dispatcher and the numeric tolerance comparator.
//!
//! ## Comparison Order
//!
//! [`compare`] decides in a fixed order:
//!
//! 1. **Type**: actual and expected must be the same type, otherwise the verdict is
//!    [`Verdict::TypeMismatch`], even if the two values happen to have the same bits.
//! 2. **Deep equality**: the type's `PartialEq`, structural for derived impls.
//! 3. **Custom equality**: [`Equatable::equals`] called as `expected.equals(actual)`.
//! 4. **Sequences**: `Vec<T>`, `[T; N]` and `Option<T>` implement `equals` element-wise, so
//!    sequences of custom-equality values compare by their elements' `equals`.

pub mod float;

use std::any::{type_name, Any};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

pub use float::{float_equal, floats_equal, DEFAULT_EPSILON};

/// Outcome of comparing two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Equal,
    Unequal,
    TypeMismatch {
        actual: &'static str,
        expected: &'static str,
    },
}

impl Verdict {
    pub fn is_equal(&self) -> bool {
        matches!(self, Verdict::Equal)
    }
}

/// Semantic equality that a type opts into for [`compare`].
///
/// The default `equals` is plain `==`, so a `PartialEq` type opts in with an empty impl.
/// Override it when two structurally different values should still count as equal.
///
/// ```rust
/// use verdict::compare::{compare, Equatable, Verdict};
///
/// #[derive(Debug, PartialEq)]
/// struct Path(String);
///
/// impl Equatable for Path {
///     fn equals(&self, other: &Self) -> bool {
///         self.0.trim_end_matches('/') == other.0.trim_end_matches('/')
///     }
/// }
///
/// let verdict = compare(&Path("a/b/".into()), &Path("a/b".into()));
/// assert_eq!(verdict, Verdict::Equal);
/// ```
pub trait Equatable: PartialEq {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

/// Compares `actual` against `expected`.
pub fn compare<A, E>(actual: &A, expected: &E) -> Verdict
where
    A: Any,
    E: Equatable + Any,
{
    let Some(actual) = (actual as &dyn Any).downcast_ref::<E>() else {
        return Verdict::TypeMismatch {
            actual: type_name::<A>(),
            expected: type_name::<E>(),
        };
    };
    if actual == expected || expected.equals(actual) {
        Verdict::Equal
    } else {
        Verdict::Unequal
    }
}

/// Element-wise equality over [`Equatable`] elements; lengths must match.
pub fn elements_equal<T: Equatable>(actual: &[T], expected: &[T]) -> bool {
    actual.len() == expected.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(expected, actual)| expected.equals(actual))
}

// ============================================================================
// OPT-INS
// ============================================================================

macro_rules! equatable_by_eq {
    ($($ty:ty),* $(,)?) => {
        $(impl Equatable for $ty {})*
    };
}

equatable_by_eq!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    str, String,
);

impl Equatable for Cow<'_, str> {}
impl Equatable for std::path::Path {}
impl Equatable for std::path::PathBuf {}
impl Equatable for std::time::Duration {}

impl<K: Eq + Hash, V: PartialEq> Equatable for HashMap<K, V> {}
impl<T: Eq + Hash> Equatable for HashSet<T> {}
impl<K: Ord, V: PartialEq> Equatable for BTreeMap<K, V> {}
impl<T: Ord> Equatable for BTreeSet<T> {}

impl<T: Equatable> Equatable for [T] {
    fn equals(&self, other: &Self) -> bool {
        elements_equal(other, self)
    }
}

impl<T: Equatable> Equatable for Vec<T> {
    fn equals(&self, other: &Self) -> bool {
        elements_equal(other, self)
    }
}

impl<T: Equatable, const N: usize> Equatable for [T; N] {
    fn equals(&self, other: &Self) -> bool {
        elements_equal(other, self)
    }
}

impl<T: Equatable> Equatable for Option<T> {
    fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(expected), Some(actual)) => expected.equals(actual),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Equatable + ?Sized> Equatable for Box<T> {
    fn equals(&self, other: &Self) -> bool {
        (**self).equals(other)
    }
}

impl<T: Equatable + ?Sized> Equatable for &T {
    fn equals(&self, other: &Self) -> bool {
        (**self).equals(*other)
    }
}

impl<A: Equatable, B: Equatable> Equatable for (A, B) {
    fn equals(&self, other: &Self) -> bool {
        self.0.equals(&other.0) && self.1.equals(&other.1)
    }
}

impl<A: Equatable, B: Equatable, C: Equatable> Equatable for (A, B, C) {
    fn equals(&self, other: &Self) -> bool {
        self.0.equals(&other.0) && self.1.equals(&other.1) && self.2.equals(&other.2)
    }
}
