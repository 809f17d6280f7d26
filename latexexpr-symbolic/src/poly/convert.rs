//! Conversion between [`Expr`] and fractions of [`Poly`]s.
//!
//! Every part of an expression that is not a polynomial operation becomes a _generator_: one
//! variable of the polynomial ring. Symbols and function calls are generators, as are powers with
//! exponents that are not rational numbers (`e^x`). A power with a rational exponent `p/q` is
//! the generator `base^(1/q)` raised to the power `p`, so that `sqrt(x)` and `x^(3/2)` share the
//! generator `x^(1/2)`.

use crate::approx::approximate_rational;
use crate::error::SymbolicError;
use crate::expr::{Expr, Primary};
use crate::primitive::{float, rational};
use crate::simplify::fraction::Number;
use rug::Rational;
use super::{gcd::gcd, Poly};

/// The largest integer exponent that is expanded when the base has more than one term.
const MAX_EXPANDED_EXPONENT: u32 = 64;

/// The largest integer exponent that is expanded at all.
const MAX_EXPONENT: u32 = 1 << 12;

/// A fraction of two polynomials. The denominator is never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frac {
    pub num: Poly,
    pub den: Poly,
}

impl Frac {
    /// A polynomial, as a fraction with denominator one.
    pub fn from_poly(num: Poly) -> Self {
        let den = Poly::one(num.nvars());
        Self { num, den }
    }

    /// A constant fraction.
    pub fn constant(nvars: usize, c: Rational) -> Self {
        Self::from_poly(Poly::constant(nvars, c))
    }

    /// Adds two fractions, cancelling common factors if the denominators differ.
    pub fn add(&self, rhs: &Self) -> Self {
        if self.den == rhs.den {
            return Self { num: &self.num + &rhs.num, den: self.den.clone() };
        }

        Self {
            num: &(&self.num * &rhs.den) + &(&rhs.num * &self.den),
            den: &self.den * &rhs.den,
        }.reduced()
    }

    /// Multiplies two fractions.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self {
            num: &self.num * &rhs.num,
            den: &self.den * &rhs.den,
        }
    }

    /// Raises the fraction to an integer power.
    pub fn powi(&self, exp: i64) -> Result<Self, SymbolicError> {
        let magnitude = exp.unsigned_abs() as u32;
        let result = Self {
            num: self.num.pow(magnitude),
            den: self.den.pow(magnitude),
        };

        if exp >= 0 {
            Ok(result)
        } else if result.num.is_zero() {
            Err(SymbolicError::ZeroDenominator)
        } else {
            Ok(Self { num: result.den, den: result.num })
        }
    }

    /// Divides the numerator and denominator by their greatest common divisor.
    pub fn reduced(self) -> Self {
        let divisor = gcd(&self.num, &self.den);
        match (self.num.div_exact(&divisor), self.den.div_exact(&divisor)) {
            (Some(num), Some(den)) => Self { num, den },
            _ => self,
        }
    }
}

/// If the expression is a power with a rational number exponent, returns the base and the
/// exponent.
fn rational_power(expr: &Expr) -> Option<(&Expr, Rational)> {
    let Expr::Exp(base, exp) = expr else {
        return None;
    };
    match Number::from_expr(exp)? {
        Number::Rational(r) => Some((base, r)),
        Number::Float(_) => None,
    }
}

/// Returns the generator of a power that is not an integer power, and the power of the
/// generator it represents.
fn generator_of(expr: &Expr) -> (Expr, Rational) {
    match rational_power(expr) {
        Some((base, exp)) => {
            let (numer, denom) = exp.into_numer_denom();
            let root = Number::Rational(rational((1, denom))).into_expr();
            (base.clone().pow(root), rational(numer))
        },
        None => (expr.clone(), rational(1)),
    }
}

/// Converts expressions to and from fractions of polynomials over a fixed set of generators.
#[derive(Debug, Clone)]
pub struct Converter {
    generators: Vec<Expr>,
    inexact: bool,
}

impl Converter {
    /// Creates a converter whose generators are those found in the given expressions, sorted by
    /// their textual form.
    pub fn new(exprs: &[&Expr]) -> Self {
        let mut generators = Vec::new();
        for expr in exprs {
            collect_generators(expr, &mut generators);
        }
        generators.sort_by_cached_key(|generator| generator.to_string());
        Self { generators, inexact: false }
    }

    /// The generators, in the order of the variables of the ring.
    pub fn generators(&self) -> &[Expr] {
        &self.generators
    }

    /// The number of variables of the ring.
    pub fn nvars(&self) -> usize {
        self.generators.len()
    }

    /// Returns the index of the variable corresponding to the generator.
    pub fn index_of(&self, generator: &Expr) -> Option<usize> {
        self.generators.iter().position(|g| g == generator)
    }

    /// Returns true if a float was approximated by a rational number during conversion.
    pub fn is_inexact(&self) -> bool {
        self.inexact
    }

    /// Converts the expression into a fraction of polynomials.
    pub fn to_frac(&mut self, expr: &Expr) -> Result<Frac, SymbolicError> {
        let nvars = self.nvars();
        match expr {
            Expr::Primary(Primary::Integer(n)) => Ok(Frac::constant(nvars, rational(n))),
            Expr::Primary(Primary::Float(n)) => {
                let approx = approximate_rational(n)
                    .ok_or_else(|| SymbolicError::NotRational(expr.clone()))?;
                self.inexact = true;
                Ok(Frac::constant(nvars, approx))
            },
            Expr::Add(terms) => {
                let mut sum = Frac::constant(nvars, Rational::new());
                for term in terms {
                    sum = sum.add(&self.to_frac(term)?);
                }
                Ok(sum)
            },
            Expr::Mul(factors) => {
                let mut product = Frac::constant(nvars, rational(1));
                for factor in factors {
                    product = product.mul(&self.to_frac(factor)?);
                }
                Ok(product)
            },
            Expr::Exp(base, _) => match rational_power(expr) {
                Some((_, exp)) if *exp.denom() == 1 => {
                    let base = self.to_frac(base)?;
                    let bound = if base.num.len() > 1 || base.den.len() > 1 {
                        MAX_EXPANDED_EXPONENT
                    } else {
                        MAX_EXPONENT
                    };
                    let exp = exp.numer()
                        .to_i64()
                        .filter(|n| n.unsigned_abs() <= u64::from(bound))
                        .ok_or_else(|| SymbolicError::NotRational(expr.clone()))?;
                    base.powi(exp)
                },
                _ => self.generator_frac(expr),
            },
            Expr::Primary(Primary::Symbol(_) | Primary::Call(..)) => self.generator_frac(expr),
        }
    }

    /// Converts a generator raised to some power into a fraction.
    fn generator_frac(&self, expr: &Expr) -> Result<Frac, SymbolicError> {
        let nvars = self.nvars();
        let (generator, power) = generator_of(expr);
        let var = self.index_of(&generator)
            .ok_or_else(|| SymbolicError::NotRational(expr.clone()))?;
        let exp = power.numer()
            .clone()
            .abs()
            .to_u32()
            .filter(|&n| n <= MAX_EXPONENT)
            .ok_or_else(|| SymbolicError::NotRational(expr.clone()))?;

        let poly = Poly::var(nvars, var, exp);
        if power.cmp0().is_lt() {
            Ok(Frac { num: Poly::one(nvars), den: poly })
        } else {
            Ok(Frac::from_poly(poly))
        }
    }

    /// Returns the generator with the given index raised to the given power.
    fn generator_power(&self, var: usize, exp: u32) -> Expr {
        let generator = &self.generators[var];
        if let Some((base, root)) = rational_power(generator) {
            let power = rational(&root * exp);
            if power == 1 {
                return base.clone();
            }
            return base.clone().pow(Number::Rational(power).into_expr());
        }

        if exp == 1 {
            generator.clone()
        } else {
            generator.clone().pow(Expr::integer(exp))
        }
    }

    /// Converts a coefficient into a number, as a float if the input contained floats and the
    /// coefficient is not an integer.
    pub(crate) fn coefficient(&self, c: &Rational) -> Number {
        if self.inexact && *c.denom() != 1 {
            Number::Float(float(c))
        } else {
            Number::Rational(c.clone())
        }
    }

    /// Converts a polynomial back into an expanded expression.
    pub fn to_expr(&self, poly: &Poly) -> Expr {
        let terms = poly.terms()
            .rev()
            .map(|(monomial, c)| {
                let factors = monomial.iter()
                    .enumerate()
                    .filter(|&(_, &exp)| exp > 0)
                    .map(|(var, &exp)| self.generator_power(var, exp))
                    .collect::<Vec<_>>();
                self.coefficient(c).times(Expr::Mul(factors).downgrade())
            })
            .collect::<Vec<_>>();
        Expr::Add(terms).downgrade()
    }

    /// Converts a fraction back into an expression, `num * den^-1`, omitting a numerator or
    /// denominator of one.
    pub fn frac_to_expr(&self, frac: &Frac) -> Expr {
        let num = self.to_expr(&frac.num);
        match frac.den.as_constant() {
            Some(c) if c == 1 => num,
            Some(c) => self.coefficient(&c.recip()).times(num),
            None => {
                let den = self.to_expr(&frac.den).recip();
                match num.as_integer() {
                    Some(n) if *n == 1 => den,
                    _ => num * den,
                }
            },
        }
    }
}

/// Adds the generators found in the expression to the list, skipping duplicates.
fn collect_generators(expr: &Expr, generators: &mut Vec<Expr>) {
    let mut push = |generator: Expr| {
        if !generators.contains(&generator) {
            generators.push(generator);
        }
    };

    match expr {
        Expr::Primary(Primary::Integer(_) | Primary::Float(_)) => (),
        Expr::Primary(Primary::Symbol(_) | Primary::Call(..)) => push(expr.clone()),
        Expr::Add(items) | Expr::Mul(items) => {
            for item in items {
                collect_generators(item, generators);
            }
        },
        Expr::Exp(base, _) => match rational_power(expr) {
            Some((_, exp)) if *exp.denom() == 1 => collect_generators(base, generators),
            _ => push(generator_of(expr).0),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn generators() {
        // sin(x) + y * sqrt(z) + z^(3/2)
        let expr = Expr::call("sin", vec![sym("x")])
            + sym("y") * sym("z").sqrt()
            + sym("z").pow(Number::Rational(rational((3, 2))).into_expr());
        let converter = Converter::new(&[&expr]);
        assert_eq!(converter.generators(), &[
            Expr::call("sin", vec![sym("x")]),
            sym("y"),
            sym("z").pow(Expr::integer(2).recip()),
        ]);
    }

    #[test]
    fn common_denominator() {
        // 1 + x^-1 = (x + 1) / x
        let expr = Expr::integer(1) + sym("x").recip();
        let mut converter = Converter::new(&[&expr]);
        let frac = converter.to_frac(&expr).unwrap();
        assert_eq!(frac.num, &Poly::var(1, 0, 1) + &Poly::one(1));
        assert_eq!(frac.den, Poly::var(1, 0, 1));
        assert!(!converter.is_inexact());
    }

    #[test]
    fn zero_denominator() {
        let x = sym("x");
        let expr = (x.clone() + -x).recip();
        let mut converter = Converter::new(&[&expr]);
        assert_eq!(converter.to_frac(&expr), Err(SymbolicError::ZeroDenominator));
    }

    #[test]
    fn roots_share_generator() {
        // x^(3/2) * x^(-1/2) = x
        let x = sym("x");
        let expr = x.clone().pow(Number::Rational(rational((3, 2))).into_expr())
            * x.clone().pow(Number::Rational(rational((-1, 2))).into_expr());
        let mut converter = Converter::new(&[&expr]);
        let frac = converter.to_frac(&expr).unwrap();
        assert_eq!(converter.frac_to_expr(&frac.reduced()), x);
    }

    #[test]
    fn floats_round_trip() {
        // 0.5 * x
        let expr = Expr::float(float(0.5)) * sym("x");
        let mut converter = Converter::new(&[&expr]);
        let frac = converter.to_frac(&expr).unwrap();
        assert!(converter.is_inexact());
        assert_eq!(converter.to_expr(&frac.num), Expr::float(float(0.5)) * sym("x"));
    }
}
