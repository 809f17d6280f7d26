//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing with floats.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates an [`Integer`] from an `f64` with no fractional part. Returns [`None`] if the value is
/// not finite or has a fractional part.
pub fn int_from_f64(n: f64) -> Option<Integer> {
    if n.is_finite() && n.fract() == 0.0 {
        Integer::from_f64(n)
    } else {
        None
    }
}
