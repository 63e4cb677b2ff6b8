//! Keys stored in a [`Treap`][crate::Treap].
//!
//! A treap holds keys of a single _kind_: either all numeric or all textual.
//! For statically typed keys this is guaranteed by the type system, since a
//! `Treap<u64>` cannot hold a `String`. The [`Key`] trait nonetheless reports
//! the kind of every key so that keys whose kind is only known at run time,
//! such as [`Scalar`], can be rejected when they would mix kinds.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

// ////////////////////////////////////////////////////////////////////////////
// Scalar Kind
// ////////////////////////////////////////////////////////////////////////////

/// The kind of a key.
///
/// All keys within one treap share the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Integers and floating point numbers.
    Numeric,
    /// Characters and strings.
    Textual,
}

impl fmt::Display for ScalarKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ScalarKind::Numeric => f.write_str("numeric"),
            ScalarKind::Textual => f.write_str("textual"),
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Key
// ////////////////////////////////////////////////////////////////////////////

/// A totally ordered value which can be stored in a treap.
///
/// Keys are compared with their [`Ord`] implementation, which must be
/// consistent with [`Eq`]. Two keys comparing as [`Ordering::Equal`] are
/// considered duplicates.
pub trait Key: Ord {
    /// The kind of this key.
    ///
    /// For most types this is a constant. It must not change for a given key
    /// while that key is held in a treap.
    fn kind(&self) -> ScalarKind;
}

/// Implements [`Key`] for types of a fixed kind.
macro_rules! impl_key {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Key for $ty {
                #[inline]
                fn kind(&self) -> ScalarKind {
                    ScalarKind::$kind
                }
            }
        )+
    };
}

impl_key!(Numeric => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_key!(Textual => char, str, String, Box<str>);

impl Key for Cow<'_, str> {
    #[inline]
    fn kind(&self) -> ScalarKind {
        ScalarKind::Textual
    }
}

impl<K> Key for &K
where
    K: Key + ?Sized,
{
    #[inline]
    fn kind(&self) -> ScalarKind {
        (**self).kind()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Scalar
// ////////////////////////////////////////////////////////////////////////////

/// A numeric or textual value whose kind is decided at run time.
///
/// Numbers are ordered with [`f64::total_cmp`], so that every value
/// (including NaN) has a well-defined position. In particular `-0.0` sorts
/// before `0.0` and the two are distinct keys.
///
/// To make the ordering total, every number sorts before every text. This is
/// never observable within a single treap as inserting a key of the other
/// kind fails.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// A number, integers are stored as `f64`.
    Number(f64),
    /// A string.
    Text(String),
}

impl Scalar {
    /// Returns the number if this is a [`Scalar::Number`].
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Scalar::Number(n) => Some(n),
            Scalar::Text(_) => None,
        }
    }

    /// Returns the text if this is a [`Scalar::Text`].
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match *self {
            Scalar::Number(_) => None,
            Scalar::Text(ref s) => Some(s),
        }
    }
}

impl Key for Scalar {
    #[inline]
    fn kind(&self) -> ScalarKind {
        match *self {
            Scalar::Number(_) => ScalarKind::Numeric,
            Scalar::Text(_) => ScalarKind::Textual,
        }
    }
}

impl Ord for Scalar {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => a.total_cmp(b),
            (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b),
            (Scalar::Number(_), Scalar::Text(_)) => Ordering::Less,
            (Scalar::Text(_), Scalar::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Scalar {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Scalar {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl fmt::Display for Scalar {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(ref s) => f.write_str(s),
        }
    }
}

/// Implements `From<$ty> for Scalar` for numeric types losslessly convertible
/// to `f64`.
macro_rules! impl_from_number {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(value: $ty) -> Self {
                    Scalar::Number(f64::from(value))
                }
            }
        )+
    };
}

impl_from_number!(u8, u16, u32, i8, i16, i32, f32, f64);

impl From<&str> for Scalar {
    #[inline]
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    #[inline]
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
