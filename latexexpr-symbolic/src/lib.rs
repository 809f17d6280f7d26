//! A small computer algebra system over flattened expression trees.
//!
//! Expressions are represented as [`Expr`] trees, where sums and products hold lists of terms and
//! factors instead of nesting binary operations. The crate provides:
//!
//! - [`simplify`]: rule-based simplification, with rational cancellation as an alternative
//! candidate.
//! - [`expand`]: distribution of products and integer powers over sums.
//! - [`factor`]: factoring of polynomials and rational functions over the rationals.
//! - [`collect`]: grouping of terms by powers of given symbols.
//! - [`cancel`]: rational functions in lowest terms.
//! - [`apart`]: partial fraction decomposition of univariate rational functions.
//!
//! The last three, and [`factor`], view the expression as a fraction of two polynomials. Any
//! subexpression that is not a polynomial operation, such as `sin(x)` or `e^x`, is treated as an
//! opaque variable.
//!
//! ```
//! use latexexpr_symbolic::{expand, factor, Expr};
//!
//! // (x + 2)(x - 3)
//! let x = Expr::symbol("x");
//! let expr = (x.clone() + Expr::integer(2)) * (x.clone() + Expr::integer(-3));
//!
//! let expanded = expand(&expr);
//! assert_eq!(expanded.to_string(), "-6 + -1 * x + x^2");
//! assert_eq!(factor(&expanded).unwrap().to_string(), "(-3 + x) * (2 + x)");
//! ```

pub mod apart;
mod approx;
pub mod cancel;
pub mod collect;
pub mod error;
pub mod expand;
pub mod expr;
pub mod factor;
pub mod poly;
pub mod primitive;
pub mod simplify;
pub mod step_collector;

pub use apart::apart;
pub use cancel::cancel;
pub use collect::collect;
pub use error::SymbolicError;
pub use expand::expand;
pub use expr::{Expr, Primary};
pub use factor::factor;
pub use simplify::{simplify, simplify_with, simplify_with_steps, step::Step};
pub use step_collector::StepCollector;
