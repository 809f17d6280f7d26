//! User-facing error kinds.
//!
//! Every error is wrapped in a [`latexexpr_error::Error`] whose source is the LaTeX of the node
//! that caused it, so that reports highlight the offending part of the expression.

use ariadne::Fmt;
use crate::latex::What;
use crate::operation::{Arity, OperationKind};
use latexexpr_attrs::ErrorKind;
use latexexpr_error::EXPR;

/// An operation was given the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {}, but {} were given", self.kind, self.expected, self.given),
    labels = ["this operation"],
)]
pub struct InvalidArity {
    /// The kind of operation that was constructed.
    pub kind: OperationKind,

    /// The number of arguments the operation accepts.
    pub expected: Arity,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A number format string could not be parsed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number format `{}`", self.format),
    labels = ["this format"],
    help = format!(
        "use a printf-style format, such as {}, {}, {} or {}",
        "%.2f".fg(EXPR),
        "%g".fg(EXPR),
        "%.3e".fg(EXPR),
        "%d".fg(EXPR),
    ),
)]
pub struct InvalidFormat {
    /// The format string.
    pub format: String,
}

/// The result of a symbolic variable was requested.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", self.name),
    labels = ["this variable"],
    help = "symbolic variables can be rendered and simplified, but not evaluated",
)]
pub struct NoValue {
    /// The name of the variable.
    pub name: String,
}

/// A function was evaluated outside of its domain.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is undefined for {}", self.function, self.value),
    labels = ["this operation"],
)]
pub struct Domain {
    /// The name of the function.
    pub function: &'static str,

    /// The argument the function was evaluated at.
    pub value: f64,
}

/// The requested part of a variable does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("variables have no `{:?}` representation", self.what),
    labels = ["this variable"],
    help = format!(
        "{} and {} are only available for expressions",
        "What::Symb".fg(EXPR),
        "What::Subst".fg(EXPR),
    ),
)]
pub struct InvalidWhat {
    /// The requested part.
    pub what: What,
}

/// The simplified expression contains a symbol that does not belong to any variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the symbol `{}` does not belong to any variable", self.name),
    labels = ["this symbol"],
)]
pub struct UnknownSymbol {
    /// The name of the symbol.
    pub name: String,
}

/// The simplified expression contains a function that cannot be written as an operation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the function `{}` has no corresponding operation", self.name),
    labels = ["this function call"],
)]
pub struct UnsupportedCall {
    /// The name of the function.
    pub name: String,
}

/// The symbols given to `collect` cannot be collected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = match &self.name {
        Some(name) => format!("`{}` cannot be collected", name),
        None => "no symbols to collect".to_string(),
    },
    labels = ["in this expression"],
    help = match &self.name {
        Some(_) => "variables are substituted with their values when `substitute_floats` is set; collect symbolic variables instead",
        None => "give at least one variable to collect",
    },
)]
pub struct InvalidCollectSymbol {
    /// The name of the variable that cannot be collected, or [`None`] if no variables were given.
    pub name: Option<String>,
}

/// The symbolic algebra failed on the converted expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("symbolic algebra failed: {}", self.message),
    labels = ["this expression"],
)]
pub struct CasFailure {
    /// The error reported by the symbolic algebra.
    pub message: String,
}
