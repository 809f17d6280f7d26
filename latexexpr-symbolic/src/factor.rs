//! Factoring of polynomials and rational functions over the rationals.
//!
//! A polynomial is factored in stages, each of which splits off factors that the later stages
//! cannot see:
//!
//! 1. The rational content, such as `3/2` in `3/2 x + 3`.
//! 2. The monomial content, such as `x y` in `x^2 y + x y^2`.
//! 3. The content with respect to the first variable present, which is a polynomial in the
//! remaining variables, factored recursively.
//! 4. The square-free decomposition of the primitive part with respect to that variable, using
//! Yun's algorithm.
//! 5. The linear factors of univariate square-free parts, found with the rational root theorem.
//!
//! Whatever remains after these stages is kept as one factor, even if it is not irreducible.

use crate::error::SymbolicError;
use crate::expr::Expr;
use crate::poly::{
    convert::Converter,
    gcd::{gcd, normalize, split_content},
    univariate::UPoly,
    Poly,
};
use crate::primitive::rational;
use rug::{ops::Pow, Rational};

/// Factors the polynomial. Returns the constant factor and the non-constant factors with their
/// multiplicities. Every factor has coprime integer coefficients and a positive leading
/// coefficient.
pub(crate) fn factor_poly(p: &Poly) -> (Rational, Vec<(Poly, u32)>) {
    let mut factors = Vec::new();
    if p.is_constant() {
        return (p.lc(), factors);
    }

    let nvars = p.nvars();
    let min_exponents = p.min_exponents();
    for (var, &exp) in min_exponents.iter().enumerate() {
        if exp > 0 {
            factors.push((Poly::var(nvars, var, 1), exp));
        }
    }
    let primitive = normalize(&p.shift_down(&min_exponents));
    factor_primitive(&primitive, 1, &mut factors);

    // all factors have positive leading coefficients, and the leading coefficient of a product
    // is the product of the leading coefficients
    let leading = factors.iter()
        .fold(rational(1), |acc, (factor, k)| acc * factor.lc().pow(*k));
    (p.lc() / leading, factors)
}

/// Factors a polynomial without monomial content, pushing each factor raised to `multiplicity`
/// times its own multiplicity.
fn factor_primitive(p: &Poly, multiplicity: u32, factors: &mut Vec<(Poly, u32)>) {
    if p.is_constant() {
        return;
    }

    let Some(&var) = p.variables().first() else {
        return;
    };

    let (content, primitive) = split_content(p, var);
    factor_primitive(&content, multiplicity, factors);

    for (part, k) in square_free(&primitive, var) {
        split_linear(&part, var, multiplicity * k, factors);
    }
}

/// Computes the square-free decomposition of a polynomial that is primitive with respect to
/// `var`, using Yun's algorithm. Returns the square-free parts `a_i` with their multiplicities
/// `i`, such that the polynomial is the product of every `a_i^i`, up to a constant.
fn square_free(p: &Poly, var: usize) -> Vec<(Poly, u32)> {
    let mut parts = Vec::new();
    let derivative = p.derivative(var);
    let a0 = gcd(p, &derivative);

    let (Some(mut b), Some(mut c)) = (p.div_exact(&a0), derivative.div_exact(&a0)) else {
        parts.push((normalize(p), 1));
        return parts;
    };
    let mut d = &c - &b.derivative(var);

    let mut i = 1;
    while !b.is_constant() {
        let a = gcd(&b, &d);
        let (Some(next_b), Some(next_c)) = (b.div_exact(&a), d.div_exact(&a)) else {
            parts.push((normalize(&b), i));
            break;
        };

        if !a.is_constant() {
            parts.push((a, i));
        }

        b = next_b;
        c = next_c;
        d = &c - &b.derivative(var);
        i += 1;
    }

    parts
}

/// Splits the linear factors off a square-free polynomial that only depends on `var`, and pushes
/// them and the remaining factor. Multivariate polynomials are pushed as they are.
fn split_linear(p: &Poly, var: usize, multiplicity: u32, factors: &mut Vec<(Poly, u32)>) {
    let Some(univariate) = UPoly::from_poly(p, var) else {
        factors.push((normalize(p), multiplicity));
        return;
    };

    let nvars = p.nvars();
    let mut rest = p.clone();
    for root in univariate.rational_roots() {
        // the root `n/d` is the factor `d x - n`
        let (n, d) = root.into_numer_denom();
        let linear = &Poly::var(nvars, var, 1).scale(&d.into())
            - &Poly::constant(nvars, n.into());
        if let Some(quotient) = rest.div_exact(&linear) {
            factors.push((linear, multiplicity));
            rest = quotient;
        }
    }

    if !rest.is_constant() {
        factors.push((normalize(&rest), multiplicity));
    }
}

/// Factors the expression over the rationals.
///
/// The expression is brought over a common denominator first, so the result is a product of a
/// rational constant, factors of the numerator with positive exponents, and factors of the
/// denominator with negative exponents.
///
/// ```
/// use latexexpr_symbolic::{factor, Expr};
///
/// // x^2 - 1 = (x - 1)(x + 1)
/// let x = Expr::symbol("x");
/// let expr = x.clone().pow(Expr::integer(2)) + Expr::integer(-1);
/// assert_eq!(factor(&expr).unwrap().to_string(), "(-1 + x) * (1 + x)");
/// ```
pub fn factor(expr: &Expr) -> Result<Expr, SymbolicError> {
    let mut converter = Converter::new(&[expr]);
    let frac = converter.to_frac(expr)?.reduced();
    if frac.num.is_zero() {
        return Ok(Expr::integer(0));
    }

    let (num_constant, num_factors) = factor_poly(&frac.num);
    let (den_constant, den_factors) = factor_poly(&frac.den);

    let mut factors = Vec::with_capacity(num_factors.len() + den_factors.len());
    for (factor, k) in num_factors {
        let factor = converter.to_expr(&factor);
        factors.push(if k == 1 { factor } else { factor.pow(Expr::integer(k)) });
    }
    for (factor, k) in den_factors {
        let factor = converter.to_expr(&factor);
        factors.push(factor.pow(-Expr::integer(k)));
    }

    let constant = converter.coefficient(&(num_constant / den_constant));
    Ok(constant.times(Expr::Mul(factors).downgrade()).sorted())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn int(n: i32) -> Expr {
        Expr::integer(n)
    }

    #[test]
    fn irreducible_quadratic() {
        // x^3 - x^2 + x - 1 = (x - 1)(x^2 + 1)
        let x = || sym("x");
        let expr = Expr::Add(vec![x().pow(int(3)), -x().pow(int(2)), x(), int(-1)]);
        assert_eq!(factor(&expr).unwrap().to_string(), "(-1 + x) * (1 + x^2)");
    }

    #[test]
    fn repeated_multivariate() {
        // x^2 z + 4xyz + 4y^2 z = z (x + 2y)^2
        let (x, y, z) = (|| sym("x"), || sym("y"), || sym("z"));
        let expr = Expr::Add(vec![
            x().pow(int(2)) * z(),
            int(4) * x() * y() * z(),
            int(4) * y().pow(int(2)) * z(),
        ]);
        assert_eq!(factor(&expr).unwrap().to_string(), "z * (x + 2 * y)^2");
    }

    #[test]
    fn rational_constant() {
        // 3/2 x + 3 = 3/2 (x + 2)
        let x = sym("x");
        let expr = int(3) * int(2).recip() * x + int(3);
        let factored = factor(&expr).unwrap();
        assert_eq!(factored, Expr::Mul(vec![int(3), int(2).recip(), Expr::Add(vec![int(2), sym("x")])]));
    }

    #[test]
    fn rational_function() {
        // (x^2 - 1) / (x^2 + 4x + 4) = (x - 1)(x + 1) / (x + 2)^2
        let x = || sym("x");
        let expr = Expr::Add(vec![x().pow(int(2)), int(-1)])
            * Expr::Add(vec![x().pow(int(2)), int(4) * x(), int(4)]).recip();
        assert_eq!(
            factor(&expr).unwrap().to_string(),
            "(-1 + x) * (1 + x) * (2 + x)^-2",
        );
    }

    #[test]
    fn rational_roots() {
        // 2x^2 - x - 1 = (x - 1)(2x + 1)
        let x = || sym("x");
        let expr = Expr::Add(vec![int(2) * x().pow(int(2)), -x(), int(-1)]);
        assert_eq!(factor(&expr).unwrap().to_string(), "(-1 + x) * (1 + 2 * x)");
    }

    #[test]
    fn negative_leading_coefficient() {
        // 1 - x^2 = -(x - 1)(x + 1)
        let x = sym("x");
        let expr = int(1) + -x.pow(int(2));
        assert_eq!(factor(&expr).unwrap().to_string(), "-1 * (-1 + x) * (1 + x)");
    }

    #[test]
    fn zero() {
        assert_eq!(factor(&int(0)).unwrap(), int(0));
    }
}
