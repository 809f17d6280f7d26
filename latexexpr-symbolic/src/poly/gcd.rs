//! Greatest common divisors of multivariate polynomials.
//!
//! The GCD is computed recursively: the polynomials are viewed as polynomials in their first
//! variable, with coefficients in the remaining variables. The GCD of the contents (the GCD of
//! the coefficients) is computed recursively, and the GCD of the primitive parts is computed with
//! the primitive polynomial remainder sequence.
//!
//! The GCD is only defined up to a constant factor. Results are normalized to have coprime
//! integer coefficients and a positive leading coefficient.

use super::Poly;

/// Normalizes the polynomial to have coprime integer coefficients and a positive leading
/// coefficient.
pub fn normalize(p: &Poly) -> Poly {
    p.primitive_integer().1
}

/// Computes the GCD of two polynomials.
///
/// The GCD of a polynomial and zero is the normalized polynomial, and the GCD of two
/// polynomials where one is a non-zero constant is one.
pub fn gcd(a: &Poly, b: &Poly) -> Poly {
    if a.is_zero() {
        return normalize(b);
    }
    if b.is_zero() {
        return normalize(a);
    }
    if a.is_constant() || b.is_constant() {
        return Poly::one(a.nvars());
    }

    let Some(var) = (0..a.nvars()).find(|&var| a.depends_on(var) || b.depends_on(var)) else {
        return Poly::one(a.nvars());
    };

    match (a.depends_on(var), b.depends_on(var)) {
        // the GCD cannot contain `var`, so it divides the content of the other polynomial
        (true, false) => gcd(&content_in(a, var), b),
        (false, true) => gcd(a, &content_in(b, var)),
        _ => {
            let (a_content, a_primitive) = split_content(a, var);
            let (b_content, b_primitive) = split_content(b, var);
            let content = gcd(&a_content, &b_content);
            let primitive = primitive_gcd(a_primitive, b_primitive, var);
            normalize(&(&content * &primitive))
        },
    }
}

/// The content of the polynomial with respect to `var`: the GCD of its coefficients when viewed
/// as a polynomial in `var`.
pub fn content_in(p: &Poly, var: usize) -> Poly {
    p.coefficients_in(var)
        .values()
        .fold(Poly::zero(p.nvars()), |acc, c| gcd(&acc, c))
}

/// Splits the polynomial into its content and its primitive part with respect to `var`.
pub fn split_content(p: &Poly, var: usize) -> (Poly, Poly) {
    if p.is_zero() {
        return (Poly::one(p.nvars()), p.clone());
    }

    let content = content_in(p, var);
    match p.div_exact(&content) {
        Some(primitive) => (content, normalize(&primitive)),
        None => (Poly::one(p.nvars()), normalize(p)),
    }
}

/// The pseudo-remainder of `a` divided by `b`, viewed as polynomials in `var`.
///
/// The leading coefficient of `b` is multiplied into `a` as many times as needed to keep the
/// division free of fractions in the other variables. The result is normalized.
pub fn pseudo_remainder(a: &Poly, b: &Poly, var: usize) -> Poly {
    let b_degree = b.degree_in(var);
    let b_lc = b.lc_in(var);

    let mut remainder = a.clone();
    while !remainder.is_zero() && remainder.degree_in(var) >= b_degree {
        let shift = Poly::var(a.nvars(), var, remainder.degree_in(var) - b_degree);
        let remainder_lc = remainder.lc_in(var);
        remainder = &(&b_lc * &remainder) - &(&(&remainder_lc * &shift) * b);
        remainder = normalize(&remainder);
    }

    remainder
}

/// Computes the GCD of two polynomials that are primitive with respect to `var`, using the
/// primitive polynomial remainder sequence.
fn primitive_gcd(mut a: Poly, mut b: Poly, var: usize) -> Poly {
    if a.degree_in(var) < b.degree_in(var) {
        std::mem::swap(&mut a, &mut b);
    }

    loop {
        if b.is_zero() {
            return split_content(&a, var).1;
        }

        // a primitive polynomial of degree 0 is a constant
        if b.degree_in(var) == 0 {
            return Poly::one(a.nvars());
        }

        let remainder = pseudo_remainder(&a, &b, var);
        a = b;
        b = split_content(&remainder, var).1;
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::rational;
    use pretty_assertions::assert_eq;
    use super::*;

    fn c(n: i32) -> Poly {
        Poly::constant(3, rational(n))
    }

    fn x() -> Poly {
        Poly::var(3, 0, 1)
    }

    fn y() -> Poly {
        Poly::var(3, 1, 1)
    }

    fn z() -> Poly {
        Poly::var(3, 2, 1)
    }

    #[test]
    fn univariate() {
        // gcd(x^2 + 2x + 1, x^2 + x) = x + 1
        let a = &(&x().pow(2) + &x().scale(&rational(2))) + &c(1);
        let b = &x().pow(2) + &x();
        assert_eq!(gcd(&a, &b), &x() + &c(1));
    }

    #[test]
    fn coprime() {
        let a = &x() + &c(1);
        let b = &x() - &c(1);
        assert_eq!(gcd(&a, &b), c(1));
    }

    #[test]
    fn multivariate() {
        // gcd((x + 1)(y - z)^2, (x - 1)(x + 1)) = x + 1
        let y_minus_z = &y() - &z();
        let a = &(&x() + &c(1)) * &y_minus_z.pow(2);
        let b = &(&x() - &c(1)) * &(&x() + &c(1));
        assert_eq!(gcd(&a, &b), &x() + &c(1));
    }

    #[test]
    fn content_in_other_variable() {
        // gcd(x y + y, 2 y^2) = y
        let a = &(&x() * &y()) + &y();
        let b = y().pow(2).scale(&rational(2));
        assert_eq!(gcd(&a, &b), y());
    }

    #[test]
    fn scaled_result() {
        // gcd(2x + 2, 3x + 3) = x + 1
        let a = (&x() + &c(1)).scale(&rational(2));
        let b = (&x() + &c(1)).scale(&rational(3));
        assert_eq!(gcd(&a, &b), &x() + &c(1));
    }
}
