//! Partial fraction decomposition of univariate rational functions.

use crate::error::SymbolicError;
use crate::expr::Expr;
use crate::factor::factor_poly;
use crate::poly::{convert::Converter, univariate::UPoly};
use rug::Rational;

/// Returns the term `numerator / denominator^exp`, omitting a numerator of one.
fn fraction_term(converter: &Converter, numerator: &UPoly, denominator: &Expr, exp: u32) -> Expr {
    let nvars = converter.nvars();
    let denominator = denominator.clone().pow(Expr::integer(-i64::from(exp)));
    match numerator.degree() {
        0 => converter.coefficient(&numerator.lc()).times(denominator),
        _ => converter.to_expr(&numerator.to_poly(nvars, 0)) * denominator,
    }
}

/// Decomposes the rational function into partial fractions: a polynomial plus a sum of terms
/// `c / f^k`, where each `f` is a factor of the denominator and `deg(c) < deg(f)`.
///
/// The expression must be a rational function of one variable. If `var` is given, it must be
/// the only symbol in the expression; expressions that do not contain it are returned in
/// cancelled form.
///
/// ```
/// use latexexpr_symbolic::{apart, Expr};
///
/// // 1 / (x^2 - 1) = 1 / (2(x - 1)) - 1 / (2(x + 1))
/// let x = Expr::symbol("x");
/// let expr = (x.clone().pow(Expr::integer(2)) + Expr::integer(-1)).recip();
/// assert_eq!(
///     apart(&expr, None).unwrap().to_string(),
///     "2^-1 * (-1 + x)^-1 + -1 * 2^-1 * (1 + x)^-1",
/// );
/// ```
pub fn apart(expr: &Expr, var: Option<&str>) -> Result<Expr, SymbolicError> {
    let mut converter = Converter::new(&[expr]);
    let frac = converter.to_frac(expr)?.reduced();

    let generators = converter.generators();
    let multivariate = || SymbolicError::MultivariateApart(
        generators.iter().map(|generator| generator.to_string()).collect(),
    );
    match (generators, var) {
        ([], _) => return Ok(converter.frac_to_expr(&frac).sorted()),
        ([generator], Some(var)) if generator.as_symbol() != Some(var) => {
            return Ok(converter.frac_to_expr(&frac).sorted());
        },
        ([_], _) => (),
        _ => return Err(multivariate()),
    }

    let (Some(num), Some(den)) = (UPoly::from_poly(&frac.num, 0), UPoly::from_poly(&frac.den, 0)) else {
        return Err(multivariate());
    };
    let Some((quotient, remainder)) = num.div_rem(&den) else {
        return Err(SymbolicError::ZeroDenominator);
    };

    let nvars = converter.nvars();
    let mut terms = Vec::new();
    if !quotient.is_zero() {
        terms.extend(converter.to_expr(&quotient.to_poly(nvars, 0)).terms().iter().cloned());
    }

    // den = content * f_1^k_1 * ... * f_n^k_n
    let (content, factors) = factor_poly(&frac.den);
    let factors = factors.into_iter()
        .filter_map(|(factor, k)| Some((UPoly::from_poly(&factor, 0)?, k)))
        .collect::<Vec<_>>();
    let remainder = remainder.scale(&content.recip());
    let powers = factors.iter()
        .map(|(factor, k)| (0..*k).fold(UPoly::constant(Rational::from(1)), |acc, _| acc.mul(factor)))
        .collect::<Vec<_>>();

    for (idx, (factor, k)) in factors.iter().enumerate() {
        // the product of the other factors, which is invertible modulo this one
        let others = powers.iter()
            .enumerate()
            .filter(|&(other, _)| other != idx)
            .fold(UPoly::constant(Rational::from(1)), |acc, (_, power)| acc.mul(power));
        let (_, inverse, _) = UPoly::xgcd(&others, &powers[idx]);
        let Some((_, mut numerator)) = remainder.mul(&inverse).div_rem(&powers[idx]) else {
            continue;
        };

        // write the numerator in base `factor`: c_0 + c_1 f + c_2 f^2 + ...
        let factor_expr = converter.to_expr(&factor.to_poly(nvars, 0));
        let mut exp = *k;
        while !numerator.is_zero() && exp > 0 {
            let Some((next, digit)) = numerator.div_rem(factor) else {
                break;
            };
            if !digit.is_zero() {
                terms.push(fraction_term(&converter, &digit, &factor_expr, exp));
            }
            numerator = next;
            exp -= 1;
        }
    }

    Ok(Expr::Add(terms).downgrade().sorted())
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
    fn distinct_factors() {
        // (4x^3 + 21x^2 + 10x + 12) / (x^4 + 5x^3 + 5x^2 + 4x)
        //   = (2x - 1) / (x^2 + x + 1) - 1 / (x + 4) + 3 / x
        let x = || sym("x");
        let numerator = Expr::Add(vec![
            int(4) * x().pow(int(3)),
            int(21) * x().pow(int(2)),
            int(10) * x(),
            int(12),
        ]);
        let denominator = Expr::Add(vec![
            x().pow(int(4)),
            int(5) * x().pow(int(3)),
            int(5) * x().pow(int(2)),
            int(4) * x(),
        ]);
        let decomposed = apart(&(numerator * denominator.recip()), None).unwrap();
        assert_eq!(decomposed, Expr::Add(vec![
            Expr::Add(vec![int(-1), int(2) * x()])
                * Expr::Add(vec![int(1), x(), x().pow(int(2))]).recip(),
            int(-1) * Expr::Add(vec![int(4), x()]).recip(),
            int(3) * x().recip(),
        ]));
    }

    #[test]
    fn repeated_factor() {
        // (x + 2) / (x + 1)^2 = 1 / (x + 1) + 1 / (x + 1)^2
        let x = || sym("x");
        let base = || Expr::Add(vec![x(), int(1)]);
        let expr = Expr::Add(vec![x(), int(2)]) * base().pow(int(-2));
        let decomposed = apart(&expr, Some("x")).unwrap();
        assert_eq!(decomposed, Expr::Add(vec![
            base().pow(int(-1)),
            base().pow(int(-2)),
        ]));
    }

    #[test]
    fn polynomial_part() {
        // x^2 / (x - 1) = x + 1 + 1 / (x - 1)
        let x = || sym("x");
        let expr = x().pow(int(2)) * Expr::Add(vec![x(), int(-1)]).recip();
        let decomposed = apart(&expr, None).unwrap();
        assert_eq!(decomposed, Expr::Add(vec![
            x(),
            int(1),
            Expr::Add(vec![x(), int(-1)]).pow(int(-1)),
        ]));
    }

    #[test]
    fn multivariate() {
        let expr = (sym("x") + sym("y")).recip();
        assert_eq!(
            apart(&expr, None),
            Err(SymbolicError::MultivariateApart(vec!["x".to_string(), "y".to_string()])),
        );
    }

    #[test]
    fn other_variable() {
        // 1 / (y + 1) does not depend on `x`
        let expr = (sym("y") + int(1)).recip();
        assert_eq!(apart(&expr, Some("x")).unwrap(), expr);
    }
}
