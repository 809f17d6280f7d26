//! Exact values of the trigonometric functions.
//!
//! Input angles are normalized by dividing them by `2pi`, giving the fraction of a full turn in
//! the range `[0, 1)`. Only the angles in the first quadrant are listed explicitly; the rest of
//! the unit circle is filled in by symmetry.

use crate::expr::Expr;
use crate::primitive::rational;
use once_cell::sync::Lazy;
use rug::Rational;
use std::collections::HashMap;

/// The output of a trigonometric function, possibly negated.
#[derive(Debug, Clone)]
pub struct TrigOut {
    pub output: Expr,
    pub neg: bool,
}

impl TrigOut {
    /// Returns the output, negated if needed.
    pub fn value(&self) -> Expr {
        if self.neg {
            -self.output.clone()
        } else {
            self.output.clone()
        }
    }
}

/// `n^(1/2)`
fn sqrt(n: i32) -> Expr {
    Expr::integer(n).pow(Expr::integer(2).recip())
}

/// `1/n`
fn recip(n: i32) -> Expr {
    Expr::integer(n).recip()
}

/// Reduces a fraction of a full turn to the range `[0, 1)`.
pub fn reduce(turn: Rational) -> Rational {
    let (numer, denom) = turn.into_numer_denom();

    // positive modulo (to handle negative numerators)
    let numer = (numer % &denom + &denom) % &denom;
    rational((numer, denom))
}

/// Returns the fraction `numer / denom` of a full turn, reduced to the range `[0, 1)`.
fn turn(numer: i32, denom: u32) -> Rational {
    reduce(rational((numer, denom)))
}

/// `sin` of the angles in the first quadrant, `[0, 1/4]`.
fn sin_first_quadrant() -> Vec<(Rational, Expr)> {
    vec![
        (turn(0, 1), Expr::integer(0)),
        (turn(1, 12), recip(2)),
        (turn(1, 8), sqrt(2) * recip(2)),
        (turn(1, 6), sqrt(3) * recip(2)),
        (turn(1, 4), Expr::integer(1)),
    ]
}

/// `tan` of the angles in `[0, 1/4)`. `tan(1/4)` is undefined.
fn tan_first_quadrant() -> Vec<(Rational, Expr)> {
    vec![
        (turn(0, 1), Expr::integer(0)),
        (turn(1, 12), sqrt(3) * recip(3)),
        (turn(1, 8), Expr::integer(1)),
        (turn(1, 6), sqrt(3)),
    ]
}

/// Fills in the unit circle for a function with the given first quadrant values.
///
/// `neg_second` and `neg_third` are true if the function at `1/2 - a` and `1/2 + a` is the
/// negation of the function at `a`. The function at `1 - a` is always the negation.
fn fill(first_quadrant: Vec<(Rational, Expr)>, neg_second: bool, neg_third: bool) -> HashMap<Rational, TrigOut> {
    let half = rational((1, 2));
    let mut table = HashMap::new();
    for (angle, output) in first_quadrant {
        let fourth = reduce(rational(1) - &angle);
        let third = reduce(half.clone() + &angle);
        let second = reduce(half.clone() - &angle);
        table.insert(fourth, TrigOut { output: output.clone(), neg: true });
        table.insert(third, TrigOut { output: output.clone(), neg: neg_third });
        table.insert(second, TrigOut { output: output.clone(), neg: neg_second });
        table.insert(angle, TrigOut { output, neg: false });
    }
    table
}

/// Maps the fraction of a full turn to the exact value of `sin`.
pub static SIN_TABLE: Lazy<HashMap<Rational, TrigOut>> = Lazy::new(|| {
    // sin(1/2 - a) = sin(a), sin(1/2 + a) = -sin(a), sin(1 - a) = -sin(a)
    fill(sin_first_quadrant(), false, true)
});

/// Maps the fraction of a full turn to the exact value of `tan`.
pub static TAN_TABLE: Lazy<HashMap<Rational, TrigOut>> = Lazy::new(|| {
    // tan(1/2 - a) = -tan(a), tan(1/2 + a) = tan(a), tan(1 - a) = -tan(a)
    fill(tan_first_quadrant(), true, false)
});

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn reduced_turns() {
        assert_eq!(turn(-1, 4), rational((3, 4)));
        assert_eq!(turn(5, 4), rational((1, 4)));
        assert_eq!(turn(2, 1), rational(0));
    }

    #[test]
    fn symmetric_sin() {
        // sin(7pi/6) = -1/2
        let out = &SIN_TABLE[&turn(7, 12)];
        assert_eq!(out.value(), -recip(2));

        // sin(5pi/6) = 1/2
        let out = &SIN_TABLE[&turn(5, 12)];
        assert_eq!(out.value(), recip(2));
    }

    #[test]
    fn tan_undefined() {
        assert!(TAN_TABLE.get(&turn(1, 4)).is_none());
        assert!(TAN_TABLE.get(&turn(3, 4)).is_none());
    }
}
