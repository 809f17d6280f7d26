//! Simplification rules for trigonometric functions.

mod table;

use crate::expr::Expr;
use crate::primitive::rational;
use crate::simplify::{
    fraction::{split_coefficient, Number},
    rules::{do_add, do_call},
    step::Step,
};
use crate::step_collector::StepCollector;
use rug::Rational;
use std::collections::HashMap;
use table::TrigOut;

/// Returns the angle as a fraction of a full turn in the range `[0, 1)`, if the angle is a
/// rational multiple of `pi`.
fn normalized_turn(arg: &Expr) -> Option<Rational> {
    // example: sin(pi/6)
    // the coefficient of pi is 1/6, so the normalized angle is (pi/6) / (2pi) = 1/12
    let (coefficient, rest) = split_coefficient(arg);
    let Number::Rational(coefficient) = coefficient else {
        return None;
    };

    if coefficient.cmp0().is_eq() || rest.as_symbol() == Some("pi") {
        Some(table::reduce(coefficient / rational(2)))
    } else {
        None
    }
}

/// Looks up the exact value of a trigonometric function, shifting the normalized angle by `shift`
/// first.
fn simplify_trig(arg: &Expr, shift: Rational, table: &HashMap<Rational, TrigOut>) -> Option<Expr> {
    let turn = table::reduce(normalized_turn(arg)? + shift);
    table.get(&turn).map(TrigOut::value)
}

/// `sin(x)`
pub fn sin(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, "sin", |args| {
        simplify_trig(args.first()?, rational(0), &table::SIN_TABLE)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Sin);
    Some(opt)
}

/// `cos(x) = sin(x + pi/2)`
pub fn cos(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, "cos", |args| {
        simplify_trig(args.first()?, rational((1, 4)), &table::SIN_TABLE)
    })?;

    step_collector.push(Step::Cos);
    Some(opt)
}

/// `tan(x)`
pub fn tan(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, "tan", |args| {
        simplify_trig(args.first()?, rational(0), &table::TAN_TABLE)
    })?;

    step_collector.push(Step::Tan);
    Some(opt)
}

/// If the expression is `name(arg)^2`, returns `arg`.
fn squared_call<'a>(expr: &'a Expr, name: &str) -> Option<&'a Expr> {
    if let Expr::Exp(base, exp) = expr {
        if exp.as_integer().map(|n| *n == 2).unwrap_or(false) {
            if let Some((call, [arg])) = base.as_call() {
                if call == name {
                    return Some(arg);
                }
            }
        }
    }

    None
}

/// `c*sin(x)^2*a + c*cos(x)^2*a = c*a`
pub fn pythagorean(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        for (i, term) in terms.iter().enumerate() {
            let (coefficient, rest) = split_coefficient(term);
            let factors = rest.factors();
            let Some((idx, arg)) = factors.iter()
                .enumerate()
                .find_map(|(idx, factor)| Some((idx, squared_call(factor, "sin")?))) else {
                continue;
            };

            // the term that pairs with this one has `cos(x)^2` in place of `sin(x)^2`
            let mut partner = factors.to_vec();
            partner[idx] = Expr::call("cos", vec![arg.clone()]).pow(Expr::integer(2));
            let partner = Expr::Mul(partner).downgrade();

            let found = terms.iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .find(|(_, other)| split_coefficient(other) == (coefficient.clone(), partner.clone()))
                .map(|(j, _)| j);
            let Some(j) = found else {
                continue;
            };

            let mut remaining = factors.to_vec();
            remaining.remove(idx);
            let mut new_terms = terms.iter()
                .enumerate()
                .filter(|(k, _)| *k != i && *k != j)
                .map(|(_, term)| term.clone())
                .collect::<Vec<_>>();
            new_terms.push(coefficient.times(Expr::Mul(remaining).downgrade()));
            return Some(Expr::Add(new_terms).downgrade());
        }

        None
    })?;

    step_collector.push(Step::Pythagorean);
    Some(opt)
}

/// Applies all trigonometric rules.
///
/// All trigonometric rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    sin(expr, step_collector)
        .or_else(|| cos(expr, step_collector))
        .or_else(|| tan(expr, step_collector))
        .or_else(|| pythagorean(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn pi_times(numer: i32, denom: i32) -> Expr {
        Expr::Mul(vec![
            Expr::integer(numer),
            Expr::integer(denom).recip(),
            Expr::symbol("pi"),
        ])
    }

    #[test]
    fn exact_sin() {
        let expr = Expr::call("sin", vec![pi_times(1, 6)]);
        assert_eq!(sin(&expr, &mut ()), Some(Expr::integer(2).recip()));
    }

    #[test]
    fn exact_cos() {
        // cos(pi) = -1
        let expr = Expr::call("cos", vec![Expr::symbol("pi")]);
        assert_eq!(cos(&expr, &mut ()), Some(Expr::integer(-1)));

        // cos(-2pi/3) = -1/2
        let expr = Expr::call("cos", vec![pi_times(-2, 3)]);
        assert_eq!(cos(&expr, &mut ()), Some(-Expr::integer(2).recip()));
    }

    #[test]
    fn exact_tan() {
        let expr = Expr::call("tan", vec![pi_times(1, 4)]);
        assert_eq!(tan(&expr, &mut ()), Some(Expr::integer(1)));

        let expr = Expr::call("tan", vec![pi_times(1, 2)]);
        assert_eq!(tan(&expr, &mut ()), None);
    }

    #[test]
    fn non_pi_angle() {
        let expr = Expr::call("sin", vec![Expr::symbol("x")]);
        assert_eq!(sin(&expr, &mut ()), None);
    }

    #[test]
    fn pythagorean_identity() {
        let x = Expr::symbol("x");
        let expr = Expr::call("sin", vec![x.clone()]).pow(Expr::integer(2))
            + Expr::call("cos", vec![x]).pow(Expr::integer(2));
        assert_eq!(pythagorean(&expr, &mut ()), Some(Expr::integer(1)));
    }

    #[test]
    fn pythagorean_with_coefficient() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let sin2 = Expr::call("sin", vec![x.clone()]).pow(Expr::integer(2));
        let cos2 = Expr::call("cos", vec![x]).pow(Expr::integer(2));
        let expr = Expr::Add(vec![
            Expr::Mul(vec![Expr::integer(3), y.clone(), sin2]),
            Expr::symbol("z"),
            Expr::Mul(vec![cos2, Expr::integer(3), y.clone()]),
        ]);
        assert_eq!(
            pythagorean(&expr, &mut ()),
            Some(Expr::Add(vec![Expr::symbol("z"), Expr::Mul(vec![Expr::integer(3), y])])),
        );
    }
}
