//! Operations on [`Node`]s, and their LaTeX rendering.

use crate::error::InvalidArity;
use crate::format::{fmt_result, NumberFormat};
use crate::node::Node;
use crate::variable::Variable;
use latexexpr_error::Error;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kinds of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperationKind {
    /// No operation: the single argument is rendered as it is.
    None,

    /// Sum of the arguments, `a + b + c`.
    Add,

    /// Difference, `a - b`.
    Sub,

    /// Product of the arguments, `a \cdot b \cdot c`.
    Mul,

    /// Fraction, `\frac{ a }{ b }`.
    Div,

    /// Inline division, `a / b`.
    Div2,

    /// Negation, `\left( - a \right)`.
    Neg,

    /// Unary plus, `a`.
    Pos,

    /// Absolute value, `\left| a \right|`.
    Abs,

    /// Maximum of the arguments.
    Max,

    /// Minimum of the arguments.
    Min,

    /// Power, `{ a }^{ b }`.
    Pow,

    /// Square, `a^2`.
    Sqr,

    /// Root, `\sqrt[ n ]{ x }`. The first argument is the degree of the root.
    Root,

    /// Square root, `\sqrt{ a }`.
    Sqrt,

    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,

    /// Exponential function, `\mathrm{e}^{ a }`.
    Exp,

    /// Logarithm, `\log_{ b }{ x }`. The first argument is the base.
    Log,

    /// Natural logarithm, `\ln{ a }`.
    Ln,

    /// Decimal logarithm, `\log_{10}{ a }`.
    Log10,

    /// Round brackets, `\left( a \right)`.
    RBrackets,

    /// Square brackets, `\left[ a \right]`.
    SBrackets,

    /// Curly brackets, `\left\{ a \right\}`.
    CBrackets,

    /// Angle brackets, `\left\langle a \right\rangle`.
    ABrackets,
}

impl OperationKind {
    /// Returns the number of arguments operations of this kind accept.
    pub fn arity(self) -> Arity {
        match self {
            Self::Add | Self::Mul | Self::Max | Self::Min => Arity::Variadic,
            Self::Sub | Self::Div | Self::Div2 | Self::Pow | Self::Root | Self::Log => Arity::Binary,
            _ => Arity::Unary,
        }
    }

    /// Returns the name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Div2 => "div2",
            Self::Neg => "neg",
            Self::Pos => "pos",
            Self::Abs => "abs",
            Self::Max => "max",
            Self::Min => "min",
            Self::Pow => "pow",
            Self::Sqr => "sqr",
            Self::Root => "root",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::RBrackets => "rbrackets",
            Self::SBrackets => "sbrackets",
            Self::CBrackets => "cbrackets",
            Self::ABrackets => "abrackets",
        }
    }

    /// Returns true if this kind only adds brackets (or nothing) around its argument.
    pub fn is_transparent(self) -> bool {
        matches!(
            self,
            Self::None | Self::Pos | Self::RBrackets | Self::SBrackets | Self::CBrackets | Self::ABrackets
        )
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The number of arguments an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one argument.
    Unary,

    /// Exactly two arguments.
    Binary,

    /// At least one argument.
    Variadic,
}

impl Arity {
    /// Returns true if the given number of arguments is accepted.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Unary => count == 1,
            Self::Binary => count == 2,
            Self::Variadic => count >= 1,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary => write!(f, "one argument"),
            Self::Binary => write!(f, "two arguments"),
            Self::Variadic => write!(f, "at least one argument"),
        }
    }
}

/// An operation applied to one or more [`Node`]s.
///
/// Operations are usually built with the constructor functions of this crate, such as
/// [`add`](crate::add) and [`sqrt`](crate::sqrt), or with the arithmetic operators:
///
/// ```
/// use latexexpr::Variable;
///
/// let a = Variable::new("a", 1.5);
/// let b = Variable::new("b", 2.0);
/// let op = &a * &b + 1;
/// assert_eq!(op.to_string(), r"{a} \cdot {b} + {1} = 1.50 \cdot 2.00 + 1");
/// assert_eq!(op.result().unwrap(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    /// The kind of operation.
    pub kind: OperationKind,

    /// The arguments of the operation.
    pub args: Vec<Node>,

    /// How to format the result.
    pub format: NumberFormat,

    /// The exponent to render the result with, as in `m \cdot 10^{exponent}`.
    pub exponent: i32,
}

impl Operation {
    /// Creates a new operation, checking that the number of arguments matches the kind of
    /// operation.
    pub fn new(kind: OperationKind, args: Vec<Node>) -> Result<Self, Error> {
        let op = Self::new_unchecked(kind, args);
        op.check_arity()?;
        Ok(op)
    }

    /// Creates a new operation without checking its arguments.
    pub(crate) fn new_unchecked(kind: OperationKind, args: Vec<Node>) -> Self {
        Self {
            kind,
            args,
            format: NumberFormat::default(),
            exponent: 0,
        }
    }

    /// Sets the number format of the result.
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the exponent of the result.
    pub fn with_exponent(mut self, exponent: i32) -> Self {
        self.exponent = exponent;
        self
    }

    /// Returns an error if the number of arguments does not match the kind of operation.
    pub(crate) fn check_arity(&self) -> Result<(), Error> {
        let expected = self.kind.arity();
        if expected.accepts(self.args.len()) {
            Ok(())
        } else {
            let source = format!(
                r"\operatorname{{{}}}{{\left( {} \right)}}",
                self.kind,
                self.args.iter().map(Node::str_symbolic).collect::<Vec<_>>().join(", "),
            );
            Err(Error::new(source, InvalidArity {
                kind: self.kind,
                expected,
                given: self.args.len(),
            }))
        }
    }

    /// Returns true if any argument depends on a symbolic variable.
    pub fn is_symbolic(&self) -> bool {
        self.args.iter().any(Node::is_symbolic)
    }

    /// Renders the operation, rendering each argument with the given function.
    fn render(&self, part: fn(&Node) -> String) -> String {
        let args = self.args.iter().map(part).collect::<Vec<_>>();
        let arg = |idx: usize| args.get(idx).map(String::as_str).unwrap_or_default();

        match self.kind {
            OperationKind::Add => args.join(" + "),
            OperationKind::Mul => args.join(r" \cdot "),
            OperationKind::Max => format!(r"\max{{\left( {} \right)}}", args.join(", ")),
            OperationKind::Min => format!(r"\min{{\left( {} \right)}}", args.join(", ")),
            OperationKind::Sub => format!("{} - {}", arg(0), arg(1)),
            OperationKind::Div => format!(r"\frac{{ {} }}{{ {} }}", arg(0), arg(1)),
            OperationKind::Div2 => format!("{} / {}", arg(0), arg(1)),
            OperationKind::Pow => format!("{{ {} }}^{{ {} }}", arg(0), arg(1)),
            OperationKind::Root => format!(r"\sqrt[ {} ]{{ {} }}", arg(0), arg(1)),
            OperationKind::Log => format!(r"\log_{{ {} }}{{ {} }}", arg(0), arg(1)),
            OperationKind::None | OperationKind::Pos => arg(0).to_string(),
            OperationKind::Neg => format!(r"\left( - {} \right)", arg(0)),
            OperationKind::Abs => format!(r"\left| {} \right|", arg(0)),
            OperationKind::Sqr => format!("{}^2", arg(0)),
            OperationKind::Sqrt => format!(r"\sqrt{{ {} }}", arg(0)),
            OperationKind::Sin => format!(r"\sin{{ {} }}", arg(0)),
            OperationKind::Cos => format!(r"\cos{{ {} }}", arg(0)),
            OperationKind::Tan => format!(r"\tan{{ {} }}", arg(0)),
            OperationKind::Sinh => format!(r"\sinh{{ {} }}", arg(0)),
            OperationKind::Cosh => format!(r"\cosh{{ {} }}", arg(0)),
            OperationKind::Tanh => format!(r"\tanh{{ {} }}", arg(0)),
            OperationKind::Exp => format!(r"\mathrm{{e}}^{{ {} }}", arg(0)),
            OperationKind::Ln => format!(r"\ln{{ {} }}", arg(0)),
            OperationKind::Log10 => format!(r"\log_{{10}}{{ {} }}", arg(0)),
            OperationKind::RBrackets => format!(r"\left( {} \right)", arg(0)),
            OperationKind::SBrackets => format!(r"\left[ {} \right]", arg(0)),
            OperationKind::CBrackets => format!(r"\left\{{ {} \right\}}", arg(0)),
            OperationKind::ABrackets => format!(r"\left\langle {} \right\rangle", arg(0)),
        }
    }

    /// Renders the operation with the names of its arguments, such as `{a} + {b}`.
    pub fn str_symbolic(&self) -> String {
        self.render(Node::str_symbolic)
    }

    /// Renders the operation with the values of its arguments, such as `1.00 + 2.00`.
    pub fn str_substituted(&self) -> String {
        self.render(Node::str_substituted)
    }

    /// Renders the formatted result of the operation.
    pub fn str_result(&self) -> Result<String, Error> {
        Ok(fmt_result(self.result()?, self.format, self.exponent))
    }

    /// Evaluates the operation and stores the result in a new variable with default formatting.
    pub fn to_variable(&self, name: impl Into<String>) -> Result<Variable, Error> {
        Ok(Variable::new(name, self.result()?))
    }
}

/// Displays the operation as `symbolic = substituted`.
impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.str_symbolic(), self.str_substituted())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use crate::error::InvalidArity;
    use pretty_assertions::assert_eq;

    fn vars() -> (Variable, Variable) {
        (Variable::new("a", 1.5), Variable::new("b", -2.0))
    }

    #[test]
    fn arity_is_checked() {
        let (a, _) = vars();
        let err = Operation::new(OperationKind::Sub, vec![a.into()]).unwrap_err();
        let kind = err.downcast_ref::<InvalidArity>().unwrap();
        assert_eq!(kind.expected, Arity::Binary);
        assert_eq!(kind.given, 1);
        assert_eq!(err.to_string(), "`sub` takes two arguments, but 1 were given");

        assert!(Operation::new(OperationKind::Add, Vec::new()).is_err());
        assert!(Operation::new(OperationKind::Sqrt, vec![1.into(), 2.into()]).is_err());
        assert!(Operation::new(OperationKind::Max, vec![1.into(), 2.into(), 3.into()]).is_ok());
    }

    #[test]
    fn render_binary() {
        let (a, b) = vars();
        assert_eq!(div(&a, &b).str_symbolic(), r"\frac{ {a} }{ {b} }");
        assert_eq!(div2(&a, &b).str_symbolic(), "{a} / {b}");
        assert_eq!(pow(&a, &b).str_symbolic(), "{ {a} }^{ {b} }");
        assert_eq!(root(&a, &b).str_symbolic(), r"\sqrt[ {a} ]{ {b} }");
        assert_eq!(log(&a, &b).str_symbolic(), r"\log_{ {a} }{ {b} }");
        assert_eq!((&a - &b).str_substituted(), r"1.50 - \left( -2.00 \right)");
    }

    #[test]
    fn render_unary() {
        let (a, _) = vars();
        assert_eq!(neg(&a).str_symbolic(), r"\left( - {a} \right)");
        assert_eq!(abs(&a).str_symbolic(), r"\left| {a} \right|");
        assert_eq!(sqr(&a).str_symbolic(), "{a}^2");
        assert_eq!(exp(&a).str_symbolic(), r"\mathrm{e}^{ {a} }");
        assert_eq!(log10(&a).str_symbolic(), r"\log_{10}{ {a} }");
        assert_eq!(cbrackets(&a).str_symbolic(), r"\left\{ {a} \right\}");
        assert_eq!(abrackets(&a).str_symbolic(), r"\left\langle {a} \right\rangle");
    }

    #[test]
    fn render_variadic() {
        let (a, b) = vars();
        assert_eq!(max([&a, &b]).unwrap().str_symbolic(), r"\max{\left( {a}, {b} \right)}");
        assert_eq!(mul([&a, &b]).unwrap().str_substituted(), r"1.50 \cdot \left( -2.00 \right)");
    }

    #[test]
    fn display() {
        let (a, b) = vars();
        assert_eq!((&a + &b).to_string(), r"{a} + {b} = 1.50 + \left( -2.00 \right)");
    }

    #[test]
    fn result_with_exponent() {
        let (a, b) = vars();
        let op = (&a * &b).with_exponent(-2);
        assert_eq!(op.str_result().unwrap(), r"\left( -300.00 \cdot 10^{-2} \right)");

        let op = (&a * 1000).with_format(NumberFormat::General(3)).with_exponent(3);
        assert_eq!(op.str_result().unwrap(), r"{ 1.5 \cdot 10^{3} }");
    }

    #[test]
    fn to_variable() {
        let (a, b) = vars();
        let v = (&a + &b).to_variable("c").unwrap();
        assert_eq!(v.to_string(), r"c = \left( -0.50 \right) \ \mathrm{}");
    }
}
