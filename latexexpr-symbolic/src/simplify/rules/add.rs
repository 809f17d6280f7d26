//! Simplification rules for expressions involving addition, including combining like terms.

use crate::expr::Expr;
use crate::simplify::{fraction::{split_coefficient, Number}, rules::do_add, step::Step};
use crate::step_collector::StepCollector;

/// `a+(b+c) = a+b+c`
///
/// Also reduces sums with zero or one term.
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if terms.len() >= 2 && !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                term => new_terms.push(term.clone()),
            }
        }
        Some(Expr::Add(new_terms).downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| {
                // keep all non-zero terms
                match term {
                    Expr::Primary(_) if term.is_number() => {
                        !Number::from_expr(term).map(|n| n.is_zero()).unwrap_or(false)
                    },
                    _ => true,
                }
            })
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(Expr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `1/2*a - a/2 = 0`
/// etc.
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        // each group is a sum of coefficients, and the factors shared by the terms of the group
        let mut groups: Vec<(Number, Expr)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coefficient, rest) = split_coefficient(term);

            // factors must be strictly equal
            match groups.iter_mut().find(|(_, other)| *other == rest) {
                Some((sum, _)) => {
                    let current = std::mem::replace(sum, Number::one());
                    *sum = current.add(coefficient);
                },
                None => groups.push((coefficient, rest)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter(|(coefficient, _)| !coefficient.is_zero())
            .map(|(coefficient, rest)| coefficient.times(rest))
            .collect::<Vec<_>>();
        Some(Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn like_terms() {
        let x = || Expr::symbol("x");
        let expr = Expr::Add(vec![
            x(),
            Expr::Mul(vec![Expr::integer(3), x()]),
            Expr::symbol("y"),
            Expr::integer(2),
        ]);
        let mut steps = Vec::new();
        let result = combine_like_terms(&expr, &mut steps).unwrap();
        assert_eq!(result, Expr::Add(vec![
            Expr::Mul(vec![Expr::integer(4), x()]),
            Expr::symbol("y"),
            Expr::integer(2),
        ]));
        assert_eq!(steps, vec![Step::CombineLikeTerms]);
    }

    #[test]
    fn cancelling_terms() {
        let x = || Expr::symbol("x");
        let expr = Expr::Add(vec![x(), -x()]);
        assert_eq!(combine_like_terms(&expr, &mut ()), Some(Expr::integer(0)));
    }

    #[test]
    fn unlike_terms() {
        let expr = Expr::symbol("x") + Expr::symbol("y");
        assert_eq!(combine_like_terms(&expr, &mut ()), None);
        assert_eq!(add_zero(&expr, &mut ()), None);
    }
}
