//! Simplification rules for powers.

use crate::expr::Expr;
use crate::simplify::{fraction::Number, rules::do_power, step::Step};
use crate::step_collector::StepCollector;
use rug::ops::Pow;

/// `a^0 = 1`
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.as_integer().map(|n| n.is_zero()).unwrap_or(false) {
            Some(Expr::integer(1))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `0^a = 0`, `a > 0`
pub fn power_zero_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let positive = Number::from_expr(rhs)
            .map(|n| !n.is_zero() && !n.is_negative())
            .unwrap_or(false);
        if lhs.as_integer().map(|n| n.is_zero()).unwrap_or(false) && positive {
            Some(Expr::integer(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.as_integer().map(|n| *n == 1).unwrap_or(false) {
            Some(Expr::integer(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.as_integer().map(|n| *n == 1).unwrap_or(false) {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, `c` is an integer
///
/// The rule does not hold in general for non-integer `c`: `(x^2)^(1/2)` is `|x|`, not `x`.
pub fn power_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let Expr::Exp(base, exp) = lhs {
            if rhs.is_integer() {
                return Some(base.as_ref().clone().pow(exp.as_ref().clone() * rhs.clone()));
            }
        }

        None
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Evaluates powers of numbers.
///
/// `2^3 = 8`
/// `(2/3)^-2 = 9/4`
/// `2^0.5 = 1.4142...`
///
/// Exact numbers are only evaluated for integer exponents; other roots are left to the
/// [`root`](super::root) rules.
pub fn evaluate_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = Number::from_expr(lhs)?;
        let exp = Number::from_expr(rhs)?;
        let result = match (base, exp) {
            (base, Number::Rational(exp)) if *exp.denom() == 1 => {
                base.powi(exp.numer().to_i32()?)?
            },
            (Number::Rational(_), Number::Rational(_)) => return None,
            (base, exp) => {
                if base.is_negative() && !exp.is_integer() {
                    return None;
                }

                let result = base.into_float().pow(exp.into_float());
                if !result.is_finite() {
                    return None;
                }
                Number::Float(result)
            },
        };

        let result = result.into_expr();
        if result == *expr {
            None
        } else {
            Some(result)
        }
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero(expr, step_collector)
        .or_else(|| power_zero_left(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn integer_powers() {
        let expr = Expr::integer(2).pow(Expr::integer(10));
        assert_eq!(evaluate_power(&expr, &mut ()), Some(Expr::integer(1024)));

        let expr = Expr::integer(4).pow(Expr::integer(-2));
        assert_eq!(evaluate_power(&expr, &mut ()), Some(Expr::integer(16).recip()));
    }

    #[test]
    fn canonical_reciprocal_unchanged() {
        let expr = Expr::integer(7).recip();
        assert_eq!(evaluate_power(&expr, &mut ()), None);
    }

    #[test]
    fn float_power() {
        let expr = Expr::integer(2).pow(Expr::float(crate::primitive::float(0.5)));
        let result = evaluate_power(&expr, &mut ()).unwrap();
        assert_float_relative_eq!(result.as_float().unwrap().to_f64(), std::f64::consts::SQRT_2);
    }

    #[test]
    fn nested_powers() {
        let x = Expr::symbol("x");
        let expr = x.clone().pow(Expr::integer(2)).pow(Expr::integer(-1));
        assert_eq!(
            power_power(&expr, &mut ()),
            Some(x.pow(Expr::integer(2) * Expr::integer(-1))),
        );
    }

    #[test]
    fn zero_base() {
        let expr = Expr::integer(0).pow(Expr::symbol("x"));
        assert_eq!(power_zero_left(&expr, &mut ()), None);

        let expr = Expr::integer(0).pow(Expr::integer(3));
        assert_eq!(power_zero_left(&expr, &mut ()), Some(Expr::integer(0)));
    }
}
