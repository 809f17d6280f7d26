//! Cancellation of common factors in rational functions.

use crate::error::SymbolicError;
use crate::expr::Expr;
use crate::poly::convert::{Converter, Frac};

/// Brings the expression over a common denominator and cancels the common factors of the
/// numerator and denominator. Both are returned in expanded form, with integer coefficients
/// where possible.
///
/// ```
/// use latexexpr_symbolic::{cancel, Expr};
///
/// // (x^2 - 1) / (x + 1) = x - 1
/// let x = Expr::symbol("x");
/// let expr = (x.clone().pow(Expr::integer(2)) + Expr::integer(-1))
///     * (x.clone() + Expr::integer(1)).recip();
/// assert_eq!(cancel(&expr).unwrap(), Expr::Add(vec![Expr::integer(-1), x]));
/// ```
pub fn cancel(expr: &Expr) -> Result<Expr, SymbolicError> {
    let mut converter = Converter::new(&[expr]);
    let frac = converter.to_frac(expr)?.reduced();
    if frac.num.is_zero() {
        return Ok(Expr::integer(0));
    }

    // move the rational content into an integer numerator and denominator
    let (num_content, num) = frac.num.primitive_integer();
    let (den_content, den) = frac.den.primitive_integer();
    let (numer, denom) = (num_content / den_content).into_numer_denom();
    let frac = Frac {
        num: num.scale(&numer.into()),
        den: den.scale(&denom.into()),
    };

    Ok(converter.frac_to_expr(&frac).sorted())
}

#[cfg(test)]
mod tests {
    use crate::primitive::float;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn int(n: i32) -> Expr {
        Expr::integer(n)
    }

    #[test]
    fn common_factor() {
        // (x^2 + 2x + 1) / (x^2 + x) = (x + 1) / x
        let x = || sym("x");
        let expr = Expr::Add(vec![x().pow(int(2)), int(2) * x(), int(1)])
            * Expr::Add(vec![x().pow(int(2)), x()]).recip();
        assert_eq!(cancel(&expr).unwrap().to_string(), "(1 + x) * x^-1");
    }

    #[test]
    fn sum_of_fractions() {
        // 1/x + (3x/2 - 2) / (x - 4) = (3x^2 - 2x - 8) / (2x^2 - 8x)
        let x = || sym("x");
        let expr = x().recip()
            + Expr::Add(vec![int(3) * int(2).recip() * x(), int(-2)])
                * Expr::Add(vec![x(), int(-4)]).recip();
        assert_eq!(
            cancel(&expr).unwrap().to_string(),
            "(-8 + -2 * x + 3 * x^2) * (-8 * x + 2 * x^2)^-1",
        );
    }

    #[test]
    fn multivariate() {
        // (xy^2 - 2xyz + xz^2 + y^2 - 2yz + z^2) / (x^2 - 1) = (y^2 - 2yz + z^2) / (x - 1)
        let (x, y, z) = (|| sym("x"), || sym("y"), || sym("z"));
        let numerator = Expr::Add(vec![
            x() * y().pow(int(2)),
            int(-2) * x() * y() * z(),
            x() * z().pow(int(2)),
            y().pow(int(2)),
            int(-2) * y() * z(),
            z().pow(int(2)),
        ]);
        let denominator = Expr::Add(vec![x().pow(int(2)), int(-1)]);
        let cancelled = cancel(&(numerator * denominator.recip())).unwrap();

        let expected = Expr::Add(vec![y().pow(int(2)), int(-2) * y() * z(), z().pow(int(2))])
            * Expr::Add(vec![int(-1), x()]).recip();
        assert_eq!(cancelled, expected);
    }

    #[test]
    fn cancels_to_zero() {
        let x = sym("x");
        assert_eq!(cancel(&(x.clone() + -x)).unwrap(), int(0));
    }

    #[test]
    fn division_by_zero() {
        let x = sym("x");
        let expr = int(1) * (x.clone() + -x).recip();
        assert_eq!(cancel(&expr), Err(SymbolicError::ZeroDenominator));
    }

    #[test]
    fn float_coefficients() {
        // (0.5x + 0.5) / (x + 1) = 0.5
        let x = || sym("x");
        let expr = Expr::Add(vec![Expr::float(float(0.5)) * x(), Expr::float(float(0.5))])
            * Expr::Add(vec![x(), int(1)]).recip();
        assert_eq!(cancel(&expr).unwrap(), Expr::float(float(0.5)));
    }
}
