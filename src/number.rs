//! Tri-variant numeric scalar.
//!
//! A [`Number`] remembers whether it was built from a signed integer, an
//! unsigned integer or a double. Conversions between the three are always
//! defined: they truncate or cast exactly like an `as` expression and never fail.

use std::fmt;

/// A numeric value tagged with the width family it was constructed from.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::Number;
///
/// let n = Number::from(-5i64);
/// assert!(n.is_signed());
/// assert_eq!(n.to_int32(), -5);
///
/// let d = Number::from(2.75);
/// assert_eq!(d.to_int64(), 2);
/// assert_eq!(d.to_double(), 2.75);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Signed(i64),
    Unsigned(u64),
    Double(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Number::Signed(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(self, Number::Unsigned(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Number::Double(_))
    }

    /// Truncates to `i32`. Doubles saturate at the `i32` bounds.
    #[inline]
    #[must_use]
    pub fn to_int32(&self) -> i32 {
        match *self {
            Number::Signed(i) => i as i32,
            Number::Unsigned(u) => u as i32,
            Number::Double(f) => f as i32,
        }
    }

    #[inline]
    #[must_use]
    pub fn to_uint32(&self) -> u32 {
        match *self {
            Number::Signed(i) => i as u32,
            Number::Unsigned(u) => u as u32,
            Number::Double(f) => f as u32,
        }
    }

    #[inline]
    #[must_use]
    pub fn to_int64(&self) -> i64 {
        match *self {
            Number::Signed(i) => i,
            Number::Unsigned(u) => u as i64,
            Number::Double(f) => f as i64,
        }
    }

    #[inline]
    #[must_use]
    pub fn to_uint64(&self) -> u64 {
        match *self {
            Number::Signed(i) => i as u64,
            Number::Unsigned(u) => u,
            Number::Double(f) => f as u64,
        }
    }

    #[inline]
    #[must_use]
    pub fn to_double(&self) -> f64 {
        match *self {
            Number::Signed(i) => i as f64,
            Number::Unsigned(u) => u as f64,
            Number::Double(f) => f,
        }
    }
}

/// Renders the textual encoding used by the `value="..."` attribute.
///
/// Finite doubles always carry a `.` so that the parser routes them back to
/// the floating-point branch (`3.0` is written as `3.0`, not `3`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Signed(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Double(d) => {
                let text = d.to_string();
                if d.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Signed(value as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Unsigned(value as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Double(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Double(value)
    }
}
