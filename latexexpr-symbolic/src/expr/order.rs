//! Deterministic ordering of terms and factors.
//!
//! The algorithms in this crate are free to rearrange terms and factors. Before an expression is
//! handed back to the caller, [`Expr::sorted`] puts them in a fixed order, so that equal inputs
//! always produce identically ordered outputs:
//!
//! - terms are ordered numbers first, then by ascending degree, then by their textual form
//! - factors are ordered numbers first, then symbols, powers and calls, then sums, then
//! denominators

use super::{Expr, Primary};

/// Returns true if the expression consists only of numbers.
fn is_numeric(expr: &Expr) -> bool {
    match expr {
        Expr::Primary(Primary::Integer(_) | Primary::Float(_)) => true,
        Expr::Mul(factors) => factors.iter().all(is_numeric),
        expr => expr.is_integer_recip(),
    }
}

/// Returns the polynomial degree of the expression, counting every symbol and call as one.
fn degree(expr: &Expr) -> usize {
    match expr {
        Expr::Primary(Primary::Symbol(_) | Primary::Call(..)) => 1,
        Expr::Primary(_) => 0,
        Expr::Add(terms) => terms.iter().map(degree).max().unwrap_or(0),
        Expr::Mul(factors) => factors.iter().map(degree).sum(),
        Expr::Exp(base, exp) => match exp.as_integer().and_then(|n| n.to_usize()) {
            Some(n) => n * degree(base),
            None if exp.is_negative_number() => 0,
            None => degree(base),
        },
    }
}

/// Sort key of a term of an [`Expr::Add`].
fn term_key(term: &Expr) -> (u8, usize, String) {
    if is_numeric(term) {
        return (0, 0, String::new());
    }

    let monomial = match term {
        Expr::Mul(factors) => factors.iter()
            .filter(|factor| !is_numeric(factor))
            .map(|factor| factor.to_string())
            .collect::<Vec<_>>()
            .join(" * "),
        term => term.to_string(),
    };
    (1, degree(term), monomial)
}

/// Sort key of a factor of an [`Expr::Mul`].
fn factor_key(factor: &Expr) -> (u8, String) {
    let class = match factor {
        factor if is_numeric(factor) && !factor.is_integer_recip() => 0,
        factor if factor.is_integer_recip() => 1,
        Expr::Exp(_, exp) if exp.is_negative_number() => 4,
        Expr::Add(_) => 3,
        Expr::Exp(base, _) if matches!(**base, Expr::Add(_)) => 3,
        _ => 2,
    };
    (class, factor.to_string())
}

impl Expr {
    /// Recursively sorts the terms and factors of the expression into a deterministic order. The
    /// result is strictly equal to the input.
    pub fn sorted(self) -> Self {
        match self {
            Self::Primary(Primary::Call(name, args)) => {
                Self::Primary(Primary::Call(name, args.into_iter().map(Self::sorted).collect()))
            },
            Self::Primary(primary) => Self::Primary(primary),
            Self::Add(terms) => {
                let mut terms = terms.into_iter().map(Self::sorted).collect::<Vec<_>>();
                terms.sort_by_cached_key(term_key);
                Self::Add(terms)
            },
            Self::Mul(factors) => {
                let mut factors = factors.into_iter().map(Self::sorted).collect::<Vec<_>>();
                factors.sort_by_cached_key(factor_key);
                Self::Mul(factors)
            },
            Self::Exp(base, exp) => Self::Exp(Box::new(base.sorted()), Box::new(exp.sorted())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn ascending_degree() {
        let x = || Expr::symbol("x");
        let expr = Expr::Add(vec![
            x().pow(Expr::integer(2)),
            Expr::Mul(vec![x(), Expr::integer(2)]),
            Expr::integer(1),
        ]);
        assert_eq!(expr.sorted().to_string(), "1 + 2 * x + x^2");
    }

    #[test]
    fn alphabetical_terms() {
        let expr = Expr::Add(vec![
            Expr::Mul(vec![Expr::integer(-1), Expr::symbol("v4")]),
            Expr::Mul(vec![Expr::integer(2), Expr::symbol("v2")]),
            Expr::Mul(vec![Expr::integer(2), Expr::symbol("v1")]),
        ]);
        assert_eq!(expr.sorted().to_string(), "2 * v1 + 2 * v2 + -1 * v4");
    }

    #[test]
    fn factors_with_denominator() {
        let expr = Expr::Mul(vec![
            (Expr::symbol("x") + Expr::integer(4)).recip(),
            Expr::symbol("y") + Expr::integer(1),
            Expr::symbol("z"),
            Expr::integer(3),
        ]);
        assert_eq!(expr.sorted().to_string(), "3 * z * (y + 1) * (x + 4)^-1");
    }
}
