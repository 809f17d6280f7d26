//! Multivariate polynomials with rational coefficients.
//!
//! [`Poly`] is the representation used by [`factor`](crate::factor::factor),
//! [`cancel`](crate::cancel::cancel), [`collect`](crate::collect::collect), and
//! [`apart`](crate::apart::apart). An [`Expr`](crate::expr::Expr) is converted into a fraction of
//! two polynomials by [`convert::Converter`], where every symbol, function call, and non-integer
//! power becomes one variable (a _generator_) of the polynomial ring.
//!
//! Terms are stored in lexicographic order of their exponent vectors, so variable `0` is the most
//! significant, and the leading term of a polynomial is its last term.

pub mod convert;
pub mod gcd;
pub mod univariate;

use crate::primitive::{int, rational};
use rug::{Integer, Rational};
use std::{
    collections::BTreeMap,
    ops::{Add, Mul, Neg, Sub},
};

/// The exponents of each variable in a term.
pub type Monomial = Vec<u32>;

/// A multivariate polynomial with rational coefficients, in sparse representation.
///
/// Coefficients are never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    nvars: usize,
    terms: BTreeMap<Monomial, Rational>,
}

impl Poly {
    /// The zero polynomial.
    pub fn zero(nvars: usize) -> Self {
        Self { nvars, terms: BTreeMap::new() }
    }

    /// A constant polynomial.
    pub fn constant(nvars: usize, c: Rational) -> Self {
        Self::monomial(nvars, vec![0; nvars], c)
    }

    /// The constant polynomial one.
    pub fn one(nvars: usize) -> Self {
        Self::constant(nvars, rational(1))
    }

    /// A single term.
    pub fn monomial(nvars: usize, monomial: Monomial, c: Rational) -> Self {
        let mut poly = Self::zero(nvars);
        poly.add_term(monomial, c);
        poly
    }

    /// The variable `var` raised to the power `exp`.
    pub fn var(nvars: usize, var: usize, exp: u32) -> Self {
        let mut monomial = vec![0; nvars];
        monomial[var] = exp;
        Self::monomial(nvars, monomial, rational(1))
    }

    /// The number of variables of the ring this polynomial belongs to.
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Adds a term to the polynomial, removing the term if the result is zero.
    pub fn add_term(&mut self, monomial: Monomial, c: Rational) {
        if c.cmp0().is_eq() {
            return;
        }

        let entry = self.terms.entry(monomial).or_insert_with(Rational::new);
        *entry += c;
        if entry.cmp0().is_eq() {
            self.terms.retain(|_, c| c.cmp0().is_ne());
        }
    }

    /// Returns an iterator over the terms, in ascending order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    /// The number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the polynomial is zero.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// If the polynomial is a constant, returns the constant.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.iter().next_back() {
            None => Some(Rational::new()),
            Some((monomial, c)) if self.terms.len() == 1 && monomial.iter().all(|&e| e == 0) => {
                Some(c.clone())
            },
            _ => None,
        }
    }

    /// Returns true if the polynomial is a constant.
    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    /// The leading term, in lexicographic order.
    pub fn leading(&self) -> Option<(&Monomial, &Rational)> {
        self.terms.iter().next_back()
    }

    /// The leading coefficient, in lexicographic order. Zero for the zero polynomial.
    pub fn lc(&self) -> Rational {
        self.leading().map(|(_, c)| c.clone()).unwrap_or_default()
    }

    /// Returns true if the variable appears in the polynomial.
    pub fn depends_on(&self, var: usize) -> bool {
        self.terms.keys().any(|monomial| monomial[var] > 0)
    }

    /// Returns the variables that appear in the polynomial.
    pub fn variables(&self) -> Vec<usize> {
        (0..self.nvars).filter(|&var| self.depends_on(var)).collect()
    }

    /// The highest power of the variable.
    pub fn degree_in(&self, var: usize) -> u32 {
        self.terms.keys().map(|monomial| monomial[var]).max().unwrap_or(0)
    }

    /// The lowest power of each variable over all terms.
    pub fn min_exponents(&self) -> Monomial {
        let mut min = match self.terms.keys().next() {
            Some(monomial) => monomial.clone(),
            None => return vec![0; self.nvars],
        };
        for monomial in self.terms.keys() {
            for (m, &e) in min.iter_mut().zip(monomial) {
                *m = (*m).min(e);
            }
        }
        min
    }

    /// Divides every term by the given monomial, which must divide all of them.
    pub fn shift_down(&self, divisor: &Monomial) -> Self {
        let mut result = Self::zero(self.nvars);
        for (monomial, c) in &self.terms {
            let shifted = monomial.iter().zip(divisor).map(|(e, d)| e.saturating_sub(*d)).collect();
            result.add_term(shifted, c.clone());
        }
        result
    }

    /// Writes the polynomial as a polynomial in `var`, whose coefficients are polynomials in the
    /// other variables. The map goes from the power of `var` to its coefficient.
    pub fn coefficients_in(&self, var: usize) -> BTreeMap<u32, Poly> {
        let mut coefficients: BTreeMap<u32, Poly> = BTreeMap::new();
        for (monomial, c) in &self.terms {
            let mut rest = monomial.clone();
            rest[var] = 0;
            coefficients.entry(monomial[var])
                .or_insert_with(|| Poly::zero(self.nvars))
                .add_term(rest, c.clone());
        }
        coefficients
    }

    /// The coefficient of the highest power of `var`, as a polynomial in the other variables.
    pub fn lc_in(&self, var: usize) -> Poly {
        self.coefficients_in(var)
            .into_iter()
            .next_back()
            .map(|(_, c)| c)
            .unwrap_or_else(|| Poly::zero(self.nvars))
    }

    /// Multiplies every coefficient by the given number.
    pub fn scale(&self, factor: &Rational) -> Self {
        let mut result = Self::zero(self.nvars);
        for (monomial, c) in &self.terms {
            result.add_term(monomial.clone(), rational(c * factor));
        }
        result
    }

    /// Raises the polynomial to a non-negative integer power.
    pub fn pow(&self, exp: u32) -> Self {
        let mut result = Self::one(self.nvars);
        for _ in 0..exp {
            result = &result * self;
        }
        result
    }

    /// The partial derivative with respect to `var`.
    pub fn derivative(&self, var: usize) -> Self {
        let mut result = Self::zero(self.nvars);
        for (monomial, c) in &self.terms {
            let e = monomial[var];
            if e == 0 {
                continue;
            }

            let mut lowered = monomial.clone();
            lowered[var] = e - 1;
            result.add_term(lowered, rational(c * e));
        }
        result
    }

    /// Divides by the given polynomial. Returns [`None`] if the division is not exact.
    pub fn div_exact(&self, divisor: &Poly) -> Option<Self> {
        let (divisor_monomial, divisor_c) = divisor.leading()?;
        let mut remainder = self.clone();
        let mut quotient = Self::zero(self.nvars);

        while let Some((monomial, c)) = remainder.leading() {
            // the leading term of the remainder must be divisible by the leading term of the
            // divisor, otherwise the division is not exact
            if monomial.iter().zip(divisor_monomial).any(|(e, d)| e < d) {
                return None;
            }

            let shifted = monomial.iter().zip(divisor_monomial).map(|(e, d)| e - d).collect::<Monomial>();
            let c = rational(c / divisor_c);
            let term = Self::monomial(self.nvars, shifted.clone(), c.clone());
            remainder = &remainder - &(&term * divisor);
            quotient.add_term(shifted, c);
        }

        Some(quotient)
    }

    /// Splits the polynomial into its rational content and its primitive part, where the
    /// primitive part has coprime integer coefficients and a positive leading coefficient.
    ///
    /// The zero polynomial has content zero.
    pub fn primitive_integer(&self) -> (Rational, Self) {
        if self.is_zero() {
            return (Rational::new(), self.clone());
        }

        let mut numer_gcd = Integer::new();
        let mut denom_lcm = int(1);
        for c in self.terms.values() {
            numer_gcd.gcd_mut(c.numer());
            denom_lcm.lcm_mut(c.denom());
        }

        let mut content = rational((numer_gcd, denom_lcm));
        if self.lc().cmp0().is_lt() {
            content = -content;
        }

        let primitive = self.scale(&content.clone().recip());
        (content, primitive)
    }
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: Self) -> Self::Output {
        let mut result = self.clone();
        for (monomial, c) in &rhs.terms {
            result.add_term(monomial.clone(), c.clone());
        }
        result
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut result = self.clone();
        for (monomial, c) in &rhs.terms {
            result.add_term(monomial.clone(), -c.clone());
        }
        result
    }
}

impl Mul for &Poly {
    type Output = Poly;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut result = Poly::zero(self.nvars);
        for (lhs_monomial, lhs_c) in &self.terms {
            for (rhs_monomial, rhs_c) in &rhs.terms {
                let monomial = lhs_monomial.iter().zip(rhs_monomial).map(|(a, b)| a + b).collect();
                result.add_term(monomial, rational(lhs_c * rhs_c));
            }
        }
        result
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Self::Output {
        self.scale(&rational(-1))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// `x + 1` and `x - 1` in the ring of `x, y`.
    fn linear() -> (Poly, Poly) {
        let x = Poly::var(2, 0, 1);
        let one = Poly::one(2);
        (&x + &one, &x - &one)
    }

    #[test]
    fn exact_division() {
        let (a, b) = linear();
        let product = &a * &b;
        assert_eq!(product.div_exact(&a), Some(b.clone()));
        assert_eq!(a.div_exact(&b), None);
    }

    #[test]
    fn primitive() {
        // 3/2 x - 6 = 3/2 (x - 4)
        let x = Poly::var(1, 0, 1);
        let p = &x.scale(&rational((3, 2))) - &Poly::constant(1, rational(6));
        let (content, primitive) = p.primitive_integer();
        assert_eq!(content, rational((3, 2)));
        assert_eq!(primitive, &x - &Poly::constant(1, rational(4)));

        // negative leading coefficients are moved to the content
        let (content, primitive) = (-&x).primitive_integer();
        assert_eq!(content, rational(-1));
        assert_eq!(primitive, x);
    }

    #[test]
    fn coefficients() {
        // x^2 y + 2 x^2 + y
        let x2 = Poly::var(2, 0, 2);
        let y = Poly::var(2, 1, 1);
        let p = &(&(&x2 * &y) + &x2.scale(&rational(2))) + &y;
        assert_eq!(p.degree_in(0), 2);
        assert_eq!(p.lc_in(0), &y + &Poly::constant(2, rational(2)));
        assert_eq!(p.lc(), rational(1));
        assert_eq!(p.derivative(0), &(&Poly::var(2, 0, 1) * &y).scale(&rational(2)) + &Poly::var(2, 0, 1).scale(&rational(4)));
    }

    #[test]
    fn cancelling_terms() {
        let (a, _) = linear();
        assert!((&a - &a).is_zero());
        assert_eq!((&a - &a).as_constant(), Some(Rational::new()));
    }
}
