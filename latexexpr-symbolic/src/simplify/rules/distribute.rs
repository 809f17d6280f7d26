//! Simplification rules related to the distributive property.

use crate::expr::Expr;
use crate::simplify::{rules::{do_multiply, do_power}, step::Step};
use crate::step_collector::StepCollector;

/// The largest power of a sum that is expanded.
const MAX_EXPANDED_POWER: u32 = 64;

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        // find the first `Expr::Add`, and distribute every other factor over it
        let mut factors_to_distribute = factors.to_vec();
        let idx = factors_to_distribute.iter()
            .position(|factor| matches!(factor, Expr::Add(_)))?;
        let Expr::Add(add_factor_terms) = factors_to_distribute.remove(idx) else {
            return None;
        };

        let new_terms = add_factor_terms.into_iter()
            .map(|term| Expr::Mul(factors_to_distribute.clone()) * term)
            .collect::<Vec<_>>();
        Some(Expr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c`, `c` is an integer
pub fn distribute_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let Expr::Mul(factors) = lhs {
            if rhs.is_integer() {
                let new_factors = factors.iter()
                    .map(|factor| factor.clone().pow(rhs.clone()))
                    .collect::<Vec<_>>();
                return Some(Expr::Mul(new_factors));
            }
        }

        None
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// `(a+b)^n = (a+b)*(a+b)^(n-1)`, `2 <= n <= 64`
pub fn expand_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        if !matches!(lhs, Expr::Add(_)) {
            return None;
        }

        let n = rhs.as_integer()?.to_u32()?;
        if !(2..=MAX_EXPANDED_POWER).contains(&n) {
            return None;
        }

        Some(Expr::Mul(vec![lhs.clone(), lhs.clone().pow(Expr::integer(n - 1))]))
    })?;

    step_collector.push(Step::ExpandPower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it may be necessary for future rules to apply.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    distributive_property(expr, step_collector)
        .or_else(|| distribute_power(expr, step_collector))
        .or_else(|| expand_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn distribute() {
        let (a, b, c) = (Expr::symbol("a"), Expr::symbol("b"), Expr::symbol("c"));
        let expr = Expr::Mul(vec![a.clone(), b.clone() + c.clone()]);
        assert_eq!(
            distributive_property(&expr, &mut ()),
            Some(Expr::Add(vec![a.clone() * b, a * c])),
        );
    }

    #[test]
    fn power_of_product() {
        let expr = (Expr::symbol("x") * Expr::symbol("y")).pow(Expr::integer(-1));
        assert_eq!(
            distribute_power(&expr, &mut ()),
            Some(Expr::symbol("x").recip() * Expr::symbol("y").recip()),
        );
    }

    #[test]
    fn power_of_sum() {
        let sum = Expr::symbol("x") + Expr::integer(1);
        let expr = sum.clone().pow(Expr::integer(3));
        assert_eq!(
            expand_power(&expr, &mut ()),
            Some(Expr::Mul(vec![sum.clone(), sum.pow(Expr::integer(2))])),
        );
    }
}
