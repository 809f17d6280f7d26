//! Constructor functions for every kind of operation, and the arithmetic operators on operands.
//!
//! Operations with a fixed number of arguments are built infallibly. The variadic operations
//! ([`add`], [`mul`], [`max`], [`min`]) return [`InvalidArity`](crate::error::InvalidArity) when
//! given no arguments.
//!
//! ```
//! use latexexpr::{add, sqrt, Variable};
//!
//! let a = Variable::new("a", 9.0);
//! let op = add([sqrt(&a), -&a]).unwrap();
//! assert_eq!(op.str_symbolic(), r"\sqrt{ {a} } + \left( - {a} \right)");
//! assert_eq!(op.result().unwrap(), -6.0);
//! ```

use crate::expression::Expression;
use crate::node::Node;
use crate::operation::{Operation, OperationKind};
use crate::variable::Variable;
use latexexpr_error::Error;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Builds a variadic operation, checking that there is at least one argument.
fn variadic<I, N>(kind: OperationKind, args: I) -> Result<Operation, Error>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Operation::new(kind, args.into_iter().map(Into::into).collect())
}

/// Sum of the arguments, `a + b + c`.
pub fn add<I, N>(args: I) -> Result<Operation, Error>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    variadic(OperationKind::Add, args)
}

/// Product of the arguments, `a \cdot b \cdot c`.
pub fn mul<I, N>(args: I) -> Result<Operation, Error>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    variadic(OperationKind::Mul, args)
}

/// Maximum of the arguments.
pub fn max<I, N>(args: I) -> Result<Operation, Error>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    variadic(OperationKind::Max, args)
}

/// Minimum of the arguments.
pub fn min<I, N>(args: I) -> Result<Operation, Error>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    variadic(OperationKind::Min, args)
}

/// Generates constructor functions for binary operations.
macro_rules! binary {
    ($($(#[$attr:meta])* $name:ident($lhs:ident, $rhs:ident) => $kind:ident;)*) => {
        $(
            $(#[$attr])*
            pub fn $name($lhs: impl Into<Node>, $rhs: impl Into<Node>) -> Operation {
                Operation::new_unchecked(OperationKind::$kind, vec![$lhs.into(), $rhs.into()])
            }
        )*
    };
}

binary! {
    /// Difference, `a - b`.
    sub(a, b) => Sub;

    /// Fraction, `\frac{ a }{ b }`.
    div(a, b) => Div;

    /// Inline division, `a / b`.
    div2(a, b) => Div2;

    /// Power, `{ a }^{ b }`.
    pow(a, b) => Pow;

    /// The `n`-th root of `x`, `\sqrt[ n ]{ x }`.
    root(n, x) => Root;

    /// Logarithm of `x` to the given base, `\log_{ base }{ x }`.
    log(base, x) => Log;
}

/// Generates constructor functions for unary operations.
macro_rules! unary {
    ($($(#[$attr:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$attr])*
            pub fn $name(arg: impl Into<Node>) -> Operation {
                Operation::new_unchecked(OperationKind::$kind, vec![arg.into()])
            }
        )*
    };
}

unary! {
    /// Negation, `\left( - a \right)`.
    neg => Neg;

    /// Unary plus, rendered as the argument itself.
    pos => Pos;

    /// Absolute value, `\left| a \right|`.
    abs => Abs;

    /// Square, `a^2`.
    sqr => Sqr;

    /// Square root, `\sqrt{ a }`.
    sqrt => Sqrt;

    sin => Sin;
    cos => Cos;
    tan => Tan;
    sinh => Sinh;
    cosh => Cosh;
    tanh => Tanh;

    /// Exponential function, `\mathrm{e}^{ a }`.
    exp => Exp;

    /// Natural logarithm, `\ln{ a }`.
    ln => Ln;

    /// Decimal logarithm, `\log_{10}{ a }`.
    log10 => Log10;

    /// Round brackets, `\left( a \right)`.
    rbrackets => RBrackets;

    /// Round brackets, `\left( a \right)`. Same as [`rbrackets`].
    brackets => RBrackets;

    /// Square brackets, `\left[ a \right]`.
    sbrackets => SBrackets;

    /// Curly brackets, `\left\{ a \right\}`.
    cbrackets => CBrackets;

    /// Angle brackets, `\left\langle a \right\rangle`.
    abrackets => ABrackets;
}

/// Implements an arithmetic operator for owned and borrowed operands, with any right-hand side
/// convertible into a [`Node`], and with `i32` / `f64` on the left-hand side.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $kind:ident, $($lhs:ty),*) => {
        $(
            impl<T: Into<Node>> $trait<T> for $lhs {
                type Output = Operation;

                fn $method(self, rhs: T) -> Operation {
                    Operation::new_unchecked(OperationKind::$kind, vec![self.into(), rhs.into()])
                }
            }

            impl<T: Into<Node>> $trait<T> for &$lhs {
                type Output = Operation;

                fn $method(self, rhs: T) -> Operation {
                    Operation::new_unchecked(OperationKind::$kind, vec![self.into(), rhs.into()])
                }
            }

            impl $trait<$lhs> for i32 {
                type Output = Operation;

                fn $method(self, rhs: $lhs) -> Operation {
                    Operation::new_unchecked(OperationKind::$kind, vec![self.into(), rhs.into()])
                }
            }

            impl $trait<&$lhs> for i32 {
                type Output = Operation;

                fn $method(self, rhs: &$lhs) -> Operation {
                    Operation::new_unchecked(OperationKind::$kind, vec![self.into(), rhs.into()])
                }
            }

            impl $trait<$lhs> for f64 {
                type Output = Operation;

                fn $method(self, rhs: $lhs) -> Operation {
                    Operation::new_unchecked(OperationKind::$kind, vec![self.into(), rhs.into()])
                }
            }

            impl $trait<&$lhs> for f64 {
                type Output = Operation;

                fn $method(self, rhs: &$lhs) -> Operation {
                    Operation::new_unchecked(OperationKind::$kind, vec![self.into(), rhs.into()])
                }
            }
        )*
    };
}

impl_binary_op!(Add, add, Add, Variable, Operation, Expression, Node);
impl_binary_op!(Sub, sub, Sub, Variable, Operation, Expression, Node);
impl_binary_op!(Mul, mul, Mul, Variable, Operation, Expression, Node);
impl_binary_op!(Div, div, Div, Variable, Operation, Expression, Node);

/// Implements unary negation for owned and borrowed operands.
macro_rules! impl_neg {
    ($($ty:ty),*) => {
        $(
            impl Neg for $ty {
                type Output = Operation;

                fn neg(self) -> Operation {
                    neg(self)
                }
            }

            impl Neg for &$ty {
                type Output = Operation;

                fn neg(self) -> Operation {
                    neg(self)
                }
            }
        )*
    };
}

impl_neg!(Variable, Operation, Expression, Node);

#[cfg(test)]
mod tests {
    use crate::*;
    use pretty_assertions::assert_eq;

    fn five() -> Operation {
        Variable::new("a", 5.0) * Variable::new("one", 1.0)
    }

    #[test]
    fn literals_on_both_sides() {
        let a = five();
        assert_eq!((&a + &a).result().unwrap(), 10.0);
        assert_eq!((2 + &a).result().unwrap(), 7.0);
        assert_eq!((&a + 2).result().unwrap(), 7.0);
        assert_eq!((7 - &a).result().unwrap(), 2.0);
        assert_eq!((&a - 7).result().unwrap(), -2.0);
        assert_eq!((2.0 * &a).result().unwrap(), 10.0);
        assert_eq!((&a / 2).result().unwrap(), 2.5);
        assert_eq!((-&a).result().unwrap(), -5.0);
    }

    #[test]
    fn powers() {
        let a = five();
        let b = Variable::new("b", 3.0) * Variable::new("one", 1.0);
        assert_eq!(pow(&a, &b).result().unwrap(), 125.0);
        assert_eq!(pow(2, &a).result().unwrap(), 32.0);
        assert_eq!(pow(&a, 2).result().unwrap(), 25.0);
    }

    #[test]
    fn literal_rendering() {
        let x = Variable::new("x", 1.5);
        let op = 2 * &x - 0.5;
        assert_eq!(op.str_symbolic(), r"{2} \cdot {x} - {0.5}");
        assert_eq!(op.str_substituted(), r"2 \cdot 1.50 - 0.5");
    }

    #[test]
    fn brackets_alias() {
        let x = Variable::new("x", 1.0);
        assert_eq!(brackets(&x), rbrackets(&x));
    }

    #[test]
    fn empty_variadic() {
        assert!(add(Vec::<Node>::new()).is_err());
        assert!(min(Vec::<Variable>::new()).is_err());
    }
}
