//! Expansion of products and powers of sums.

use crate::expr::Expr;
use crate::simplify::{inner_simplify_with, rules::all_expand};

/// Expands the expression: distributes products over sums and expands positive integer powers of
/// sums, then combines like terms. Powers with negative exponents are left as they are.
///
/// ```
/// use latexexpr_symbolic::{expand, Expr};
///
/// // (x + 1)^2 = 1 + 2x + x^2
/// let x = Expr::symbol("x");
/// let expr = (x + Expr::integer(1)).pow(Expr::integer(2));
/// assert_eq!(expand(&expr).to_string(), "1 + 2 * x + x^2");
/// ```
pub fn expand(expr: &Expr) -> Expr {
    inner_simplify_with(expr, all_expand, &mut ())
        .unwrap_or_else(|| expr.clone())
        .sorted()
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
    fn product_of_sums() {
        // (x + 2)(x - 3) = -6 - x + x^2
        let x = || sym("x");
        let expr = (x() + int(2)) * (x() + int(-3));
        assert_eq!(expand(&expr).to_string(), "-6 + -1 * x + x^2");
    }

    #[test]
    fn cancelling_products() {
        // (x + 1)(x - 2) - (x - 1)x = -2
        let x = || sym("x");
        let expr = (x() + int(1)) * (x() + int(-2))
            + -((x() + int(-1)) * x());
        assert_eq!(expand(&expr), int(-2));
    }

    #[test]
    fn multivariate_square() {
        // (a + b)^2 = a^2 + 2ab + b^2
        let (a, b) = (|| sym("a"), || sym("b"));
        let expr = (a() + b()).pow(int(2));
        assert_eq!(
            expand(&expr),
            Expr::Add(vec![a().pow(int(2)), int(2) * a() * b(), b().pow(int(2))]),
        );
    }

    #[test]
    fn nothing_to_expand() {
        let expr = sym("x") * sym("y");
        assert_eq!(expand(&expr), sym("x") * sym("y"));
    }
}
