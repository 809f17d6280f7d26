//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::expr::Expr;
use crate::simplify::{fraction::Number, rules::do_multiply, step::Step};
use crate::step_collector::StepCollector;

/// `a*(b*c) = a*b*c`
///
/// Also reduces products with zero or one factor.
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if factors.len() >= 2 && !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                factor => new_factors.push(factor.clone()),
            }
        }
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let has_zero = factors.iter()
            .any(|factor| factor.is_number() && Number::from_expr(factor).map(|n| n.is_zero()).unwrap_or(false));
        if has_zero {
            Some(Expr::integer(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| {
                // keep all non-one factors
                factor.as_integer()
                    .map(|n| *n != 1)
                    .unwrap_or(true)
            })
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(Expr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Multiplies the numeric factors together, and writes the product in canonical form.
///
/// `2*3*a = 6a`
/// `3/12 = 1/4`
/// `12/3 = 4`
pub fn combine_numeric_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let mut product = Number::one();
        let mut numeric = Vec::new();
        let mut rest = Vec::with_capacity(factors.len());
        for factor in factors {
            match Number::from_expr(factor) {
                Some(number) => {
                    product = product.clone().mul(number);
                    numeric.push(factor.clone());
                },
                None => rest.push(factor.clone()),
            }
        }

        if numeric.is_empty() {
            return None;
        }

        // the numeric factors must already be in canonical form, otherwise rewrite them
        let is_one = product.is_one();
        let canonical = product.into_expr();
        if Expr::Mul(numeric) == Expr::Mul(canonical.factors().to_vec()) {
            return None;
        }

        if !is_one {
            rest.extend(canonical.factors().iter().cloned());
        }
        Some(Expr::Mul(rest).downgrade())
    })?;

    step_collector.push(Step::CombineNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `sqrt(2)*sqrt(3) = sqrt(6)`
/// etc.
///
/// Numeric factors are left to [`combine_numeric_factors`].
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        /// Utility function to extract the base and exponent of an expression. If the expression
        /// is not [`Expr::Exp`], the exponent is `1`.
        fn get_exp(expr: &Expr) -> (Expr, Expr) {
            match expr {
                Expr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
                expr => (expr.clone(), Expr::integer(1)),
            }
        }

        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            if Number::from_expr(&new_factors[current_factor_idx]).is_some() {
                current_factor_idx += 1;
                continue;
            }

            let (mut current_factor, mut current_factor_exp) = get_exp(&new_factors[current_factor_idx]);
            let mut combined = false;

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                if Number::from_expr(&new_factors[next_factor_idx]).is_some() {
                    next_factor_idx += 1;
                    continue;
                }

                let (next_factor, next_factor_exp) = get_exp(&new_factors[next_factor_idx]);
                if current_factor == next_factor {
                    // bases must be strictly equal
                    // if they are, apply a^b*a^c = a^(b+c)
                    current_factor_exp += next_factor_exp;
                    new_factors.remove(next_factor_idx);
                    combined = true;
                } else if current_factor_exp == next_factor_exp
                    && current_factor.is_integer()
                    && next_factor.is_integer() {
                    // exponents must be strictly equal, and not integers, since those would have
                    // been numeric factors
                    // if they are, apply a^c*b^c = (a*b)^c
                    current_factor *= next_factor;
                    new_factors.remove(next_factor_idx);
                    combined = true;
                } else {
                    next_factor_idx += 1;
                }
            }

            if combined {
                new_factors[current_factor_idx] = current_factor.pow(current_factor_exp);
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(Expr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| combine_numeric_factors(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn numeric_factors() {
        // 6 * x * 4^-1 = 3/2 * x
        let expr = Expr::Mul(vec![Expr::integer(6), Expr::symbol("x"), Expr::integer(4).recip()]);
        let result = combine_numeric_factors(&expr, &mut ()).unwrap();
        assert_eq!(result, Expr::Mul(vec![
            Expr::symbol("x"),
            Expr::integer(3),
            Expr::integer(2).recip(),
        ]));

        // already canonical
        assert_eq!(combine_numeric_factors(&result, &mut ()), None);
    }

    #[test]
    fn like_factors() {
        let x = || Expr::symbol("x");
        let expr = Expr::Mul(vec![x(), Expr::symbol("y"), x().pow(Expr::integer(2))]);
        let result = combine_like_factors(&expr, &mut ()).unwrap();
        assert_eq!(result, Expr::Mul(vec![
            x().pow(Expr::integer(3)),
            Expr::symbol("y"),
        ]));
    }

    #[test]
    fn integer_bases_with_same_root() {
        let expr = Expr::Mul(vec![Expr::integer(2).sqrt(), Expr::integer(3).sqrt()]);
        let result = combine_like_factors(&expr, &mut ()).unwrap();
        assert_eq!(result, (Expr::integer(2) * Expr::integer(3)).sqrt());
    }
}
