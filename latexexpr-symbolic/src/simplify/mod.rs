//! Rule-based simplification of expressions.
//!
//! We define an expression to be simplified if it has the lowest _complexity_ among the
//! semantically equivalent expressions we can find, where complexity is roughly the number of
//! nodes in the expression tree (see [`default_complexity`]). For example, `x + x` is not
//! simplified, because it can be reduced to one term `2x`, which has lower complexity.
//!
//! Simplification applies the rules in [`rules`] to every node of the expression, bottom-up, until
//! no rule applies anywhere. Each rule is a function that accepts an expression and returns
//! [`Option<Expr>`]; if the rule is applicable to the expression, the rule is applied and the
//! result is returned.
//!
//! Rules only ever look at one node at a time, so they cannot see that
//! `(x^2 - 1) / (x + 1)` is `x - 1`. [`simplify`] therefore also considers the result of
//! [`cancel`](crate::cancel::cancel), and keeps whichever candidate has the lower complexity.
//!
//! ```
//! use latexexpr_symbolic::{simplify, Expr};
//!
//! let x = Expr::symbol("x");
//! let simplified = simplify(&(x.clone() + x.clone() + x.clone()));
//!
//! // `x + x + x = 3x`
//! assert_eq!(simplified, Expr::Mul(vec![Expr::integer(3), x]));
//! ```

pub mod fraction;
pub mod rules;
pub mod step;

use crate::expr::{Expr, Primary};
use crate::step_collector::StepCollector;
use step::Step;

/// A set of rules applied by [`inner_simplify_with`].
pub(crate) type Rules = fn(&Expr, &mut dyn StepCollector<Step>) -> Option<Expr>;

/// The maximum number of passes over a single node.
const MAX_PASSES: usize = 1 << 12;

/// The default complexity function: the number of nodes in the expression, where large integers
/// count as more than one node.
pub fn default_complexity(expr: &Expr) -> usize {
    match expr {
        Expr::Primary(Primary::Integer(n)) => 1 + n.significant_bits() as usize / 32,
        Expr::Primary(Primary::Call(_, args)) => args.iter()
            .map(default_complexity)
            .fold(1, usize::saturating_add),
        Expr::Primary(_) => 1,
        Expr::Add(items) | Expr::Mul(items) => items.iter()
            .map(default_complexity)
            .fold(items.len().saturating_sub(1), usize::saturating_add),
        Expr::Exp(base, exp) => default_complexity(base)
            .saturating_add(default_complexity(exp))
            .saturating_add(1),
    }
}

/// Simplifies the children of the expression. Returns [`None`] if no child changed.
fn simplify_children(
    expr: &Expr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    /// Simplifies every expression in the list, returning [`None`] if none of them changed.
    fn simplify_all(
        items: &[Expr],
        rules: Rules,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Option<Vec<Expr>> {
        let mut changed = false;
        let new_items = items.iter()
            .map(|item| match inner_simplify_with(item, rules, step_collector) {
                Some(new_item) => {
                    changed = true;
                    new_item
                },
                None => item.clone(),
            })
            .collect::<Vec<_>>();
        changed.then_some(new_items)
    }

    match expr {
        Expr::Primary(Primary::Call(name, args)) => {
            simplify_all(args, rules, step_collector)
                .map(|args| Expr::call(name.clone(), args))
        },
        Expr::Primary(_) => None,
        Expr::Add(terms) => simplify_all(terms, rules, step_collector).map(Expr::Add),
        Expr::Mul(factors) => simplify_all(factors, rules, step_collector).map(Expr::Mul),
        Expr::Exp(base, exp) => {
            let new_base = inner_simplify_with(base, rules, step_collector);
            let new_exp = inner_simplify_with(exp, rules, step_collector);
            if new_base.is_none() && new_exp.is_none() {
                return None;
            }

            Some(new_base.unwrap_or_else(|| base.as_ref().clone())
                .pow(new_exp.unwrap_or_else(|| exp.as_ref().clone())))
        },
    }
}

/// Applies the given rules to the expression and its children until no rule applies anywhere.
///
/// Returns [`None`] if the expression did not change.
pub(crate) fn inner_simplify_with(
    expr: &Expr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let mut current: Option<Expr> = None;
    for _ in 0..MAX_PASSES {
        let mut changed = false;

        let target = current.as_ref().unwrap_or(expr);
        if let Some(next) = simplify_children(target, rules, step_collector) {
            current = Some(next);
            changed = true;
        }

        let target = current.as_ref().unwrap_or(expr);
        if let Some(next) = rules(target, step_collector) {
            current = Some(next);
            changed = true;
        }

        if !changed {
            break;
        }
    }

    current
}

/// Applies the rules of [`rules::all`] until no rule applies.
pub(crate) fn apply_rules(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    inner_simplify_with(expr, rules::all, step_collector)
        .unwrap_or_else(|| expr.clone())
}

/// Simplifies the expression, returning the candidate with the lowest complexity according to
/// the given function.
fn simplify_impl(
    expr: &Expr,
    complexity: &dyn Fn(&Expr) -> usize,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let simplified = apply_rules(expr, step_collector);

    // rational cancellation is only a candidate; it fails on expressions that are not rational
    // functions, such as those containing division by zero
    let best = match crate::cancel::cancel(&simplified) {
        Ok(cancelled) => {
            let cancelled = apply_rules(&cancelled, &mut ());
            if complexity(&cancelled) < complexity(&simplified) {
                cancelled
            } else {
                simplified
            }
        },
        Err(_) => simplified,
    };

    best.sorted()
}

/// Simplifies the given expression, using the default complexity function.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_impl(expr, &default_complexity, &mut ())
}

/// Simplifies the given expression, using the given complexity function to choose between
/// candidate results.
pub fn simplify_with<F>(expr: &Expr, complexity: F) -> Expr
where
    F: Fn(&Expr) -> usize,
{
    simplify_impl(expr, &complexity, &mut ())
}

/// Simplifies the given expression, returning the rules that were applied by the rule-based
/// pass, in order.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_impl(expr, &default_complexity, &mut steps);
    (simplified, steps)
}

#[cfg(test)]
mod tests {
    use crate::primitive::float;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn combine_terms() {
        // v1 + v1 + v2 + v3 + v2 + v3 - v4
        let expr = Expr::Add(vec![
            sym("v1"),
            sym("v1"),
            sym("v2"),
            sym("v3"),
            sym("v2"),
            sym("v3"),
            -sym("v4"),
        ]);
        assert_eq!(simplify(&expr).to_string(), "2 * v1 + 2 * v2 + 2 * v3 + -1 * v4");
    }

    #[test]
    fn combine_float_terms() {
        // v1 + v1 + v2 + 1.23 + v2 + 1.23 - 4.56
        let expr = Expr::Add(vec![
            sym("v1"),
            sym("v1"),
            sym("v2"),
            Expr::float(float(1.23)),
            sym("v2"),
            Expr::float(float(1.23)),
            -Expr::float(float(4.56)),
        ]);
        let simplified = simplify(&expr);
        let Expr::Add(terms) = &simplified else {
            panic!("expected a sum, got {}", simplified);
        };
        assert_eq!(terms.len(), 3);
        assert!((terms[0].as_float().unwrap().to_f64() + 2.1).abs() < 1e-12);
        assert_eq!(terms[1], Expr::integer(2) * sym("v1"));
        assert_eq!(terms[2], Expr::integer(2) * sym("v2"));
    }

    #[test]
    fn pythagorean_identity() {
        let expr = Expr::call("sin", vec![sym("x")]).pow(Expr::integer(2))
            + Expr::call("cos", vec![sym("x")]).pow(Expr::integer(2));
        assert_eq!(simplify(&expr), Expr::integer(1));
    }

    #[test]
    fn rational_function() {
        // (x^3 + x^2 - x - 1) / (x^2 + 2x + 1) = x - 1
        let x = || sym("x");
        let numerator = Expr::Add(vec![
            x().pow(Expr::integer(3)),
            x().pow(Expr::integer(2)),
            -x(),
            Expr::integer(-1),
        ]);
        let denominator = Expr::Add(vec![
            x().pow(Expr::integer(2)),
            Expr::integer(2) * x(),
            Expr::integer(1),
        ]);
        let expr = numerator * denominator.recip();
        assert_eq!(simplify(&expr), Expr::Add(vec![Expr::integer(-1), x()]));
    }

    #[test]
    fn numeric_fraction() {
        // 6/4 + 1/4 = 7/4
        let expr = Expr::Mul(vec![Expr::integer(6), Expr::integer(4).recip()])
            + Expr::integer(4).recip();
        assert_eq!(
            simplify(&expr),
            Expr::Mul(vec![Expr::integer(7), Expr::integer(4).recip()]),
        );
    }

    #[test]
    fn exact_trig_value() {
        // sin(pi/6) + cos(pi/3) = 1
        let expr = Expr::call("sin", vec![sym("pi") * Expr::integer(6).recip()])
            + Expr::call("cos", vec![sym("pi") * Expr::integer(3).recip()]);
        assert_eq!(simplify(&expr), Expr::integer(1));
    }

    #[test]
    fn roots() {
        // sqrt(12) * sqrt(3) = 6
        let expr = Expr::integer(12).sqrt() * Expr::integer(3).sqrt();
        assert_eq!(simplify(&expr), Expr::integer(6));
    }

    #[test]
    fn steps() {
        let expr = sym("x") * Expr::integer(1) + Expr::integer(0);
        let (simplified, steps) = simplify_with_steps(&expr);
        assert_eq!(simplified, sym("x"));
        assert!(steps.contains(&Step::MultiplyOne));
        assert!(steps.contains(&Step::AddZero));
    }

    #[test]
    fn custom_complexity() {
        // a complexity function that always prefers the rule-based result
        let x = sym("x");
        let expr = (x.clone() * x.clone() + -Expr::integer(1)) * (x.clone() + Expr::integer(1)).recip();
        let simplified = simplify_with(&expr, |_| 0);
        assert_ne!(simplified, Expr::Add(vec![x, Expr::integer(-1)]));
    }
}
