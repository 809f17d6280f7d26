//! Simplification rules for square, cube, and higher roots of integers.

use crate::expr::Expr;
use crate::primitive::{int, rational};
use crate::simplify::{fraction::Number, rules::do_power, step::Step};
use crate::step_collector::StepCollector;
use rug::{ops::Pow, Integer, Rational};

/// Returns the prime factorization of the given integer, which must be greater than 1.
fn prime_factorization(mut n: Integer) -> Vec<(Integer, u32)> {
    let mut factors = Vec::new();
    let mut i = int(2);
    while int(&i * &i) <= n {
        let mut count = 0;
        while n.is_divisible(&i) {
            n /= &i;
            count += 1;
        }
        if count > 0 {
            factors.push((i.clone(), count));
        }
        i += 1;
    }

    if n > 1 {
        factors.push((n, 1));
    }

    factors
}

/// General simplification function for rational powers of integers.
///
/// Computes `n^(p/q)` by pulling every prime factor that appears at least `q` times out of the
/// root, as well as the integer part of `p/q`. Returns [`None`] if nothing could be pulled out.
fn do_root(n: &Integer, exp: &Rational) -> Option<Expr> {
    // trial division becomes too slow for large integers
    if *n <= 1 || n.significant_bits() > 40 {
        return None;
    }

    let q = exp.denom().to_u32()?;
    if q < 2 {
        return None;
    }

    // p/q = whole + r/q, 0 <= r < q
    let (whole, r) = exp.numer().clone().div_rem_floor(int(q));
    let r = r.to_u32()?;

    let mut outside = int(1);
    let mut inside = int(1);
    for (prime, count) in prime_factorization(n.clone()) {
        let total = count * r;
        outside *= prime.clone().pow(total / q);
        inside *= prime.pow(total % q);
    }

    if outside == 1 && whole.is_zero() {
        return None;
    }

    let coefficient = Number::Rational(rational(n))
        .powi(whole.to_i32()?)?
        .mul(Number::Rational(rational(outside)));
    let root = if inside == 1 {
        Expr::integer(1)
    } else {
        Expr::integer(inside).pow(Number::Rational(rational((1u32, q))).into_expr())
    };
    Some(coefficient.times(root))
}

/// `sqrt(12) = 2*sqrt(3)`
/// `8^(2/3) = 4`
/// `2^(3/2) = 2*sqrt(2)`
pub fn root(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        match Number::from_expr(rhs)? {
            Number::Rational(exp) => do_root(lhs.as_integer()?, &exp),
            Number::Float(_) => None,
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Root);
    Some(opt)
}

/// Applies all root rules.
///
/// Root simplification may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it may be necessary for future rules to apply.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    root(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn half() -> Expr {
        Expr::integer(2).recip()
    }

    #[test]
    fn factorization() {
        assert_eq!(prime_factorization(int(360)), vec![(int(2), 3), (int(3), 2), (int(5), 1)]);
        assert_eq!(prime_factorization(int(97)), vec![(int(97), 1)]);
    }

    #[test]
    fn square_root() {
        let expr = Expr::integer(12).pow(half());
        assert_eq!(
            root(&expr, &mut ()),
            Some(Expr::integer(2) * Expr::integer(3).pow(half())),
        );
    }

    #[test]
    fn perfect_power() {
        let expr = Expr::integer(8).pow(Expr::integer(2) * Expr::integer(3).recip());
        assert_eq!(root(&expr, &mut ()), Some(Expr::integer(4)));
    }

    #[test]
    fn prime_root_unchanged() {
        let expr = Expr::integer(7).pow(half());
        assert_eq!(root(&expr, &mut ()), None);
    }
}
