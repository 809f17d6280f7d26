//! Tools to help manipulate fractions and numeric coefficients.

use crate::expr::{Expr, Primary};
use crate::primitive::{float, int, rational};
use rug::{ops::Pow, Float, Rational};

/// Create an [`Expr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`Expr::Mul`] containing two factors. The first factor is the
/// numerator, and the second factor is the denominator raised to the power of -1.
pub(crate) fn make_fraction(numerator: Expr, denominator: Expr) -> Expr {
    numerator * denominator.recip()
}

/// A numeric coefficient: an exact rational number, or a float.
///
/// Arithmetic between a rational and a float produces a float.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Number {
    Rational(Rational),
    Float(Float),
}

impl Number {
    /// The number one.
    pub fn one() -> Self {
        Self::Rational(rational(1))
    }

    /// Extracts the number represented by the expression, if it is purely numeric.
    ///
    /// The accepted forms are [`Primary::Integer`], [`Primary::Float`], an integer raised to the
    /// power of -1, and products of these. `0^-1` is not a number.
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Primary(Primary::Integer(n)) => Some(Self::Rational(rational(n))),
            Expr::Primary(Primary::Float(n)) => Some(Self::Float(n.clone())),
            Expr::Mul(factors) => factors.iter()
                .try_fold(Self::one(), |acc, factor| Some(acc.mul(Self::from_expr(factor)?))),
            expr => {
                let denominator = expr.as_integer_recip()?;
                if denominator.is_zero() {
                    None
                } else {
                    Some(Self::Rational(rational((int(1), denominator.clone()))))
                }
            },
        }
    }

    /// Converts the number to a float.
    pub fn into_float(self) -> Float {
        match self {
            Self::Rational(r) => float(r),
            Self::Float(f) => f,
        }
    }

    /// Adds two numbers.
    pub fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Self::Rational(lhs + rhs),
            (lhs, rhs) => Self::Float(lhs.into_float() + rhs.into_float()),
        }
    }

    /// Multiplies two numbers.
    pub fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Self::Rational(lhs * rhs),
            (lhs, rhs) => Self::Float(lhs.into_float() * rhs.into_float()),
        }
    }

    /// Raises the number to an integer power. Returns [`None`] if the result is undefined (zero
    /// raised to a negative power) or too large to compute.
    pub fn powi(self, exp: i32) -> Option<Self> {
        match self {
            Self::Rational(base) => {
                if exp < 0 && base.cmp0().is_eq() {
                    return None;
                }

                // bound the size of the result
                let bits = base.numer().significant_bits().max(base.denom().significant_bits());
                if u64::from(bits) * u64::from(exp.unsigned_abs()) > 1 << 16 {
                    return None;
                }

                Some(Self::Rational(base.pow(exp)))
            },
            Self::Float(base) => {
                let result = base.pow(exp);
                result.is_finite().then_some(Self::Float(result))
            },
        }
    }

    /// Returns true if the number is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Rational(r) => r.cmp0().is_eq(),
            Self::Float(f) => f.is_zero(),
        }
    }

    /// Returns true if the number is exactly the rational number one. The float `1.0` is not
    /// considered one.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Rational(r) if *r == 1)
    }

    /// Returns true if the number is negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Rational(r) => r.cmp0().is_lt(),
            Self::Float(f) => *f < 0,
        }
    }

    /// Returns true if the number is an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Rational(r) if *r.denom() == 1)
    }

    /// Converts the number into its canonical expression: an integer, `q^-1`, `p * q^-1`, or a
    /// float.
    pub fn into_expr(self) -> Expr {
        match self {
            Self::Rational(r) => {
                let (numer, denom) = r.into_numer_denom();
                if denom == 1 {
                    Expr::integer(numer)
                } else if numer == 1 {
                    Expr::integer(denom).recip()
                } else {
                    make_fraction(Expr::integer(numer), Expr::integer(denom))
                }
            },
            Self::Float(f) => Expr::float(f),
        }
    }

    /// Multiplies the expression by this number, omitting a coefficient of one.
    pub fn times(self, expr: Expr) -> Expr {
        if self.is_one() {
            expr
        } else if expr.as_integer().map(|n| *n == 1).unwrap_or(false) {
            self.into_expr()
        } else {
            self.into_expr() * expr
        }
    }
}

impl std::ops::Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Rational(r) => Self::Rational(-r),
            Self::Float(f) => Self::Float(-f),
        }
    }
}

/// Splits the expression into its numeric coefficient and the remaining factors.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `sqrt(6)` -> `(1, sqrt(6))`
pub(crate) fn split_coefficient(expr: &Expr) -> (Number, Expr) {
    if let Some(number) = Number::from_expr(expr) {
        return (number, Expr::integer(1));
    }

    match expr {
        Expr::Mul(factors) => {
            let mut coefficient = Number::one();
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match Number::from_expr(factor) {
                    Some(number) => coefficient = coefficient.mul(number),
                    None => rest.push(factor.clone()),
                }
            }
            (coefficient, Expr::Mul(rest).downgrade())
        },
        expr => (Number::one(), expr.clone()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn canonical_rationals() {
        assert_eq!(Number::Rational(rational((6, 3))).into_expr(), Expr::integer(2));
        assert_eq!(Number::Rational(rational((1, 3))).into_expr(), Expr::integer(3).recip());
        assert_eq!(
            Number::Rational(rational((-2, 3))).into_expr(),
            make_fraction(Expr::integer(-2), Expr::integer(3)),
        );
    }

    #[test]
    fn numbers_from_products() {
        let expr = Expr::Mul(vec![Expr::integer(4), Expr::integer(6).recip()]);
        assert_eq!(Number::from_expr(&expr), Some(Number::Rational(rational((2, 3)))));
        assert_eq!(Number::from_expr(&Expr::integer(0).recip()), None);
        assert_eq!(Number::from_expr(&Expr::symbol("x")), None);
    }

    #[test]
    fn float_contaminates() {
        let sum = Number::Rational(rational((1, 2))).add(Number::Float(float(0.25)));
        assert_eq!(sum, Number::Float(float(0.75)));
    }

    #[test]
    fn split() {
        let expr = Expr::Mul(vec![
            Expr::integer(3),
            Expr::symbol("a"),
            Expr::integer(4).recip(),
            Expr::symbol("b"),
        ]);
        let (coefficient, rest) = split_coefficient(&expr);
        assert_eq!(coefficient, Number::Rational(rational((3, 4))));
        assert_eq!(rest, Expr::Mul(vec![Expr::symbol("a"), Expr::symbol("b")]));

        let (coefficient, rest) = split_coefficient(&Expr::symbol("x"));
        assert!(coefficient.is_one());
        assert_eq!(rest, Expr::symbol("x"));
    }

    #[test]
    fn powers() {
        let half = Number::Rational(rational((1, 2)));
        assert_eq!(half.clone().powi(-3), Some(Number::Rational(rational(8))));
        assert_eq!(half.powi(2), Some(Number::Rational(rational((1, 4)))));
        assert_eq!(Number::Rational(rational(0)).powi(-1), None);
    }
}
