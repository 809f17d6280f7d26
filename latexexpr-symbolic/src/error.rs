//! Errors of the polynomial algorithms.

use crate::expr::Expr;
use std::fmt::{self, Display, Formatter};

/// An error that can occur when an expression is treated as a rational function.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicError {
    /// The subexpression cannot be represented as a rational function, such as a float that is
    /// not finite, or a power too large to expand.
    NotRational(Expr),

    /// Partial fraction decomposition was requested for an expression in more than one variable,
    /// without naming the variable to decompose in.
    MultivariateApart(Vec<String>),

    /// The expression divides by zero.
    ZeroDenominator,
}

impl Display for SymbolicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRational(expr) => write!(f, "`{}` is not a rational function", expr),
            Self::MultivariateApart(symbols) => write!(
                f,
                "cannot decompose a function of {} into partial fractions without a main variable",
                symbols.join(", "),
            ),
            Self::ZeroDenominator => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for SymbolicError {}
