//! LaTeX expression trees that typeset and evaluate themselves.
//!
//! An expression tree is built from three kinds of [`Node`]s:
//!
//! - [`Variable`]: a named value with a unit, such as `F = 2.00 \ \mathrm{kN}`. A variable without
//! a value is symbolic.
//! - [`Operation`]: one of the [`OperationKind`]s applied to a list of nodes, built with the
//! functions in [`ops`] or with the arithmetic operators.
//! - [`Expression`]: a named operation with a unit, rendered as the full chain
//! `name = symbolic = substituted = result unit`.
//!
//! Every node renders itself in a symbolic form (with the names of variables), a substituted form
//! (with their values) and as a formatted result, and computes its numeric value with
//! `result()`. Results can be exported as LaTeX macros with the functions in [`latex`].
//!
//! With the `symbolic` feature (enabled by default), the [`symbolic`] module simplifies, expands,
//! factors, collects, cancels and decomposes expression trees into partial fractions.
//!
//! ```
//! use latexexpr::{Expression, Variable};
//!
//! let f = Variable::builder("F").value(2.0).unit("kN").build();
//! let a = Variable::builder("a").value(3.0).unit("m").build();
//! let m = Expression::new("M", &f * &a).with_unit("kNm");
//! assert_eq!(m.to_string(), r"M = {F} \cdot {a} = 2.00 \cdot 3.00 = 6.00 \ \mathrm{kNm}");
//! ```

pub mod error;
mod eval;
pub mod expression;
pub mod format;
pub mod latex;
pub mod node;
pub mod operation;
pub mod ops;
pub mod variable;

#[cfg(feature = "symbolic")]
pub mod symbolic;

pub use expression::Expression;
pub use format::NumberFormat;
pub use latex::{to_latex_variable, LatexCommand, What};
pub use latexexpr_error::Error;
pub use node::Node;
pub use operation::{Arity, Operation, OperationKind};
pub use ops::*;
pub use variable::{Variable, VariableBuilder, DEFAULT_UNIT_FORMAT, E, ONE, PI, TWO, ZERO};
