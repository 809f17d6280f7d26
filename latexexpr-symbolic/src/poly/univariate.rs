//! Dense univariate polynomials with rational coefficients.
//!
//! Used where the algorithms need division with remainder: rational root finding, and partial
//! fraction decomposition.

use crate::primitive::{int, rational};
use rug::{Integer, Rational};
use super::Poly;

/// Integers larger than this are not factored to find rational root candidates.
const MAX_DIVISOR_SEARCH: u64 = 1_000_000_000_000;

/// A univariate polynomial, stored as its coefficients from the constant term upwards.
///
/// The highest coefficient is never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UPoly {
    coeffs: Vec<Rational>,
}

impl UPoly {
    /// Creates a polynomial from its coefficients, from the constant term upwards.
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().map(|c| c.cmp0().is_eq()).unwrap_or(false) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// A constant polynomial.
    pub fn constant(c: Rational) -> Self {
        Self::new(vec![c])
    }

    /// Converts a multivariate polynomial that only depends on `var`. Returns [`None`] if it
    /// depends on any other variable.
    pub fn from_poly(poly: &Poly, var: usize) -> Option<Self> {
        let mut coeffs = vec![Rational::new(); poly.degree_in(var) as usize + 1];
        for (monomial, c) in poly.terms() {
            let other = monomial.iter()
                .enumerate()
                .any(|(idx, &e)| idx != var && e > 0);
            if other {
                return None;
            }
            coeffs[monomial[var] as usize] = c.clone();
        }
        Some(Self::new(coeffs))
    }

    /// Converts the polynomial into a multivariate polynomial in `var`.
    pub fn to_poly(&self, nvars: usize, var: usize) -> Poly {
        let mut poly = Poly::zero(nvars);
        for (power, c) in self.coeffs.iter().enumerate() {
            let mut monomial = vec![0; nvars];
            monomial[var] = power as u32;
            poly.add_term(monomial, c.clone());
        }
        poly
    }

    /// Returns the coefficients, from the constant term upwards.
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// Returns true if the polynomial is zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// The leading coefficient. Zero for the zero polynomial.
    pub fn lc(&self) -> Rational {
        self.coeffs.last().cloned().unwrap_or_default()
    }

    /// Evaluates the polynomial at the given point, using Horner's method.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs.iter()
            .rev()
            .fold(Rational::new(), |acc, c| acc * x + c)
    }

    /// Adds two polynomials.
    pub fn add(&self, rhs: &Self) -> Self {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                let lhs = self.coeffs.get(i).cloned().unwrap_or_default();
                let rhs = rhs.coeffs.get(i).cloned().unwrap_or_default();
                lhs + rhs
            })
            .collect();
        Self::new(coeffs)
    }

    /// Subtracts two polynomials.
    pub fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.scale(&rational(-1)))
    }

    /// Multiplies two polynomials.
    pub fn mul(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }

        let mut coeffs = vec![Rational::new(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += rational(a * b);
            }
        }
        Self::new(coeffs)
    }

    /// Multiplies every coefficient by the given number.
    pub fn scale(&self, factor: &Rational) -> Self {
        Self::new(self.coeffs.iter().map(|c| rational(c * factor)).collect())
    }

    /// Divides the polynomial by `divisor`, returning the quotient and remainder. Returns
    /// [`None`] if the divisor is zero.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        if divisor.is_zero() {
            return None;
        }

        let divisor_lc = divisor.lc();
        let divisor_degree = divisor.degree();
        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![Rational::new(); self.degree().saturating_sub(divisor_degree) + 1];

        while remainder.len() > divisor_degree && !remainder.is_empty() {
            let shift = remainder.len() - 1 - divisor_degree;
            let c = rational(remainder[remainder.len() - 1].clone() / &divisor_lc);
            for (i, d) in divisor.coeffs.iter().enumerate() {
                remainder[shift + i] -= rational(&c * d);
            }
            quotient[shift] = c;

            // the leading coefficient is now zero
            remainder.pop();
            while remainder.last().map(|c| c.cmp0().is_eq()).unwrap_or(false) {
                remainder.pop();
            }
        }

        Some((Self::new(quotient), Self::new(remainder)))
    }

    /// The derivative of the polynomial.
    pub fn derivative(&self) -> Self {
        Self::new(
            self.coeffs.iter()
                .enumerate()
                .skip(1)
                .map(|(power, c)| rational(c * power as u32))
                .collect(),
        )
    }

    /// Scales the polynomial so that its leading coefficient is one.
    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        self.scale(&self.lc().recip())
    }

    /// The extended Euclidean algorithm. Returns `(g, s, t)` such that `s*a + t*b = g`, where `g`
    /// is the monic GCD of `a` and `b`.
    pub fn xgcd(a: &Self, b: &Self) -> (Self, Self, Self) {
        let (mut r0, mut r1) = (a.clone(), b.clone());
        let (mut s0, mut s1) = (Self::constant(rational(1)), Self::zero());
        let (mut t0, mut t1) = (Self::zero(), Self::constant(rational(1)));

        while !r1.is_zero() {
            let Some((q, r)) = r0.div_rem(&r1) else {
                break;
            };
            let s = s0.sub(&q.mul(&s1));
            let t = t0.sub(&q.mul(&t1));
            r0 = std::mem::replace(&mut r1, r);
            s0 = std::mem::replace(&mut s1, s);
            t0 = std::mem::replace(&mut t1, t);
        }

        if r0.is_zero() {
            return (r0, s0, t0);
        }

        let lc_inv = r0.lc().recip();
        (r0.scale(&lc_inv), s0.scale(&lc_inv), t0.scale(&lc_inv))
    }

    /// Finds the rational roots of the polynomial, each root reported once.
    ///
    /// By the rational root theorem, every rational root `p/q` in lowest terms of a polynomial
    /// with integer coefficients has `p` dividing the constant term and `q` dividing the leading
    /// coefficient. Candidates are only enumerated if both are at most `10^12`.
    pub fn rational_roots(&self) -> Vec<Rational> {
        let mut roots = Vec::new();
        if self.degree() == 0 {
            return roots;
        }

        // a zero constant term means zero is a root; divide out x until it is not
        let lowest = self.coeffs.iter().position(|c| c.cmp0().is_ne()).unwrap_or(0);
        if lowest > 0 {
            roots.push(Rational::new());
        }
        let reduced = Self::new(self.coeffs[lowest..].to_vec());
        if reduced.degree() == 0 {
            return roots;
        }

        // clear denominators
        let denom_lcm = reduced.coeffs.iter()
            .fold(int(1), |acc, c| acc.lcm(c.denom()));
        let integral = reduced.scale(&rational(denom_lcm));
        let constant = integral.coeffs[0].numer().clone().abs();
        let leading = integral.lc().numer().clone().abs();

        let (Some(numers), Some(denoms)) = (divisors(&constant), divisors(&leading)) else {
            return roots;
        };

        for q in &denoms {
            for p in &numers {
                for sign in [1, -1] {
                    let candidate = rational((int(p * sign), q.clone()));
                    if *candidate.denom() != *q {
                        // not in lowest terms; already covered by a smaller denominator
                        continue;
                    }
                    if integral.eval(&candidate).cmp0().is_eq() && !roots.contains(&candidate) {
                        roots.push(candidate);
                    }
                }
            }
        }

        roots
    }
}

/// Returns the positive divisors of a positive integer, in ascending order. Returns [`None`] if
/// the integer is too large to factor.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    if *n > MAX_DIVISOR_SEARCH || *n < 1 {
        return None;
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut i = int(1);
    while int(&i * &i) <= *n {
        if n.is_divisible(&i) {
            let pair = int(n / &i);
            if pair != i {
                large.push(pair);
            }
            small.push(i.clone());
        }
        i += 1;
    }

    small.extend(large.into_iter().rev());
    Some(small)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn upoly(coeffs: &[i32]) -> UPoly {
        UPoly::new(coeffs.iter().map(|&c| rational(c)).collect())
    }

    #[test]
    fn division() {
        // x^3 - 1 = (x - 1)(x^2 + x + 1)
        let (q, r) = upoly(&[-1, 0, 0, 1]).div_rem(&upoly(&[-1, 1])).unwrap();
        assert_eq!(q, upoly(&[1, 1, 1]));
        assert!(r.is_zero());

        // x^2 + 1 = x * x + 1
        let (q, r) = upoly(&[1, 0, 1]).div_rem(&upoly(&[0, 1])).unwrap();
        assert_eq!(q, upoly(&[0, 1]));
        assert_eq!(r, upoly(&[1]));
    }

    #[test]
    fn extended_gcd() {
        let a = upoly(&[4, 1]);
        let b = upoly(&[0, 1]);
        let (g, s, t) = UPoly::xgcd(&a, &b);
        assert_eq!(g, upoly(&[1]));
        assert_eq!(s.mul(&a).add(&t.mul(&b)), g);
    }

    #[test]
    fn roots() {
        // x^3 - x^2 + x - 1 = (x - 1)(x^2 + 1)
        assert_eq!(upoly(&[-1, 1, -1, 1]).rational_roots(), vec![rational(1)]);

        // 2x^2 - x - 1 = (2x + 1)(x - 1)
        let roots = upoly(&[-1, -1, 2]).rational_roots();
        assert_eq!(roots, vec![rational(1), rational((-1, 2))]);

        // x^2 + x
        assert_eq!(upoly(&[0, 1, 1]).rational_roots(), vec![rational(0), rational(-1)]);
    }

    #[test]
    fn horner() {
        assert_eq!(upoly(&[1, 2, 3]).eval(&rational(2)), rational(17));
    }

    #[test]
    fn divisors_of() {
        assert_eq!(divisors(&int(12)), Some(vec![int(1), int(2), int(3), int(4), int(6), int(12)]));
        assert_eq!(divisors(&int(0)), None);
    }
}
