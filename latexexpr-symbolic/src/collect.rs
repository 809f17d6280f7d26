//! Collection of terms by powers of given symbols.

use crate::expand::expand;
use crate::expr::Expr;
use crate::simplify::apply_rules;

/// Splits a term into the exponents of each of the given symbols, and the remaining factors.
/// Symbols that do not appear have exponent zero.
fn split_term(term: &Expr, symbols: &[Expr]) -> (Vec<Expr>, Expr) {
    let mut exponents = vec![Expr::integer(0); symbols.len()];
    let mut rest = Vec::new();

    for factor in term.factors() {
        let (base, exp) = match factor {
            Expr::Exp(base, exp) => (base.as_ref(), exp.as_ref().clone()),
            factor => (factor, Expr::integer(1)),
        };

        match symbols.iter().position(|symbol| symbol == base) {
            Some(idx) => exponents[idx] += exp,
            None => rest.push(factor.clone()),
        }
    }

    (exponents, Expr::Mul(rest).downgrade())
}

/// Expands the expression, then groups its terms by the powers of the given symbols they
/// contain. The coefficient of each power is the sum of the remaining factors of its terms.
///
/// Terms that contain none of the symbols are left as they are. The symbols can be any
/// expression, but are typically [`Primary::Symbol`](crate::expr::Primary::Symbol)s.
///
/// ```
/// use latexexpr_symbolic::{collect, Expr};
///
/// // a x + b x = (a + b) x
/// let (a, b, x) = (Expr::symbol("a"), Expr::symbol("b"), Expr::symbol("x"));
/// let expr = a * x.clone() + b * x.clone();
/// assert_eq!(collect(&expr, &[x]).to_string(), "x * (a + b)");
/// ```
pub fn collect(expr: &Expr, symbols: &[Expr]) -> Expr {
    let expanded = expand(expr);
    let mut free_terms = Vec::new();
    let mut groups: Vec<(Vec<Expr>, Vec<Expr>)> = Vec::new();

    for term in expanded.terms() {
        let (exponents, coefficient) = split_term(term, symbols);
        if exponents.iter().all(|exp| exp.as_integer().map(|n| n.is_zero()).unwrap_or(false)) {
            free_terms.push(term.clone());
            continue;
        }

        match groups.iter_mut().find(|(other, _)| *other == exponents) {
            Some((_, coefficients)) => coefficients.push(coefficient),
            None => groups.push((exponents, vec![coefficient])),
        }
    }

    let mut terms = free_terms;
    for (exponents, coefficients) in groups {
        let mut factors = symbols.iter()
            .zip(exponents)
            .filter(|(_, exp)| !exp.as_integer().map(|n| n.is_zero()).unwrap_or(false))
            .map(|(symbol, exp)| match exp.as_integer() {
                Some(n) if *n == 1 => symbol.clone(),
                _ => symbol.clone().pow(exp),
            })
            .collect::<Vec<_>>();

        // a sum of coefficients is kept as one factor
        let coefficient = apply_rules(&Expr::Add(coefficients).downgrade(), &mut ());
        match coefficient.as_integer() {
            Some(n) if *n == 1 => (),
            _ => factors.push(coefficient),
        }
        terms.push(Expr::Mul(factors).downgrade());
    }

    Expr::Add(terms).downgrade().sorted()
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
    fn collect_powers() {
        // x y + x - 3 + 2x^2 - z x^2 + x^3 = -3 + x^3 + x(1 + y) + x^2(2 - z)
        let (x, y, z) = (|| sym("x"), || sym("y"), || sym("z"));
        let expr = Expr::Add(vec![
            x() * y(),
            x(),
            int(-3),
            int(2) * x().pow(int(2)),
            -(z() * x().pow(int(2))),
            x().pow(int(3)),
        ]);
        let collected = collect(&expr, &[x()]);
        assert_eq!(collected, Expr::Add(vec![
            int(-3),
            x().pow(int(3)),
            x() * Expr::Add(vec![int(1), y()]),
            x().pow(int(2)) * Expr::Add(vec![int(2), int(-1) * z()]),
        ]));
    }

    #[test]
    fn two_symbols() {
        // a x y + b x y + x = x y (a + b) + x
        let (a, b, x, y) = (|| sym("a"), || sym("b"), || sym("x"), || sym("y"));
        let expr = a() * x() * y() + b() * x() * y() + x();
        let collected = collect(&expr, &[x(), y()]);
        assert_eq!(collected, Expr::Add(vec![
            x(),
            Expr::Mul(vec![x(), y(), Expr::Add(vec![a(), b()])]),
        ]));
    }

    #[test]
    fn absent_symbol() {
        let expr = sym("a") + sym("b");
        assert_eq!(collect(&expr, &[sym("x")]), sym("a") + sym("b"));
    }
}
