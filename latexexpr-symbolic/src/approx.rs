//! Rational approximation of floats.

use rug::{Float, Integer, Rational};
use std::cmp::Ordering;
use super::primitive::float;

/// Computes the [`Rational`] from the continued fraction form of a float.
fn rational_from_continued_fraction(continued_fraction_form: &[Integer]) -> Rational {
    let mut rational = Rational::new();
    for (i, integer) in continued_fraction_form.iter().rev().enumerate() {
        if i == 0 {
            if integer.cmp0() == Ordering::Equal {
                continue;
            }
            rational += Rational::from((Integer::from(1), integer.clone()));
        } else {
            rational = (rational + integer).recip();
        }
    }

    if rational.cmp0() == Ordering::Equal {
        rational
    } else {
        rational.recip()
    }
}

/// Approximates the given float as a rational fraction.
///
/// The continued fraction expansion of the float is computed until the approximation is within
/// `1e-12` of the float, relative to its magnitude. The tolerance is chosen for floats that
/// originally came from `f64`s: `0.1` becomes `1/10`, not the exact binary value of `0.1`.
///
/// Returns [`None`] if the float is not finite.
pub fn approximate_rational(n: &Float) -> Option<Rational> {
    if !n.is_finite() {
        return None;
    }

    let orig = n;
    let tolerance = float(orig.abs_ref()).max(&float(1)) * 1e-12;

    let mut continued_fraction_form = Vec::new();
    let mut n = n.clone();
    loop {
        let (integer, fractional) = n.trunc_fract(float(0));
        continued_fraction_form.push(integer.to_integer()?);

        // check how close we are to the original number
        let rational = rational_from_continued_fraction(&continued_fraction_form);
        let error = float(orig - rational).abs();

        if fractional.is_zero() || error < tolerance || continued_fraction_form.len() > 64 {
            break;
        }

        n = fractional.recip();
    }

    Some(rational_from_continued_fraction(&continued_fraction_form))
}
