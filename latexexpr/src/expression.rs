//! Named operations with a unit.

use crate::format::{fmt_result, fmt_unit, NumberFormat};
use crate::node::Node;
use crate::variable::{Variable, DEFAULT_UNIT_FORMAT};
use latexexpr_error::Error;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named operation with a unit, such as `M = {F} \cdot {a} = 2.00 \cdot 3.00 = 6.00 \ \mathrm{kNm}`.
///
/// ```
/// use latexexpr::{Expression, Variable};
///
/// let h = Variable::builder("H_{ello}").value(3.25).unit("m").build();
/// let w = Variable::builder("W^{orld}").value(5.63).unit("m").build();
/// let e = Expression::new("E_{xample}", &h + &w).with_unit("m");
/// assert_eq!(
///     e.to_string(),
///     r"E_{xample} = {H_{ello}} + {W^{orld}} = 3.25 + 5.63 = 8.88 \ \mathrm{m}",
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Expression {
    /// The LaTeX name of the expression.
    pub name: String,

    /// The operation the expression computes. After symbolic processing, this may be a single
    /// variable.
    pub operation: Box<Node>,

    /// The unit of the result.
    pub unit: String,

    /// How to format the result.
    pub format: NumberFormat,

    /// How to format the unit. `%s` is replaced with the unit.
    pub unit_format: String,

    /// The exponent to render the result with, as in `m \cdot 10^{exponent}`.
    pub exponent: i32,
}

impl Expression {
    /// Creates an expression with default formatting.
    pub fn new(name: impl Into<String>, operation: impl Into<Node>) -> Self {
        Self {
            name: name.into(),
            operation: Box::new(operation.into()),
            unit: String::new(),
            format: NumberFormat::default(),
            unit_format: DEFAULT_UNIT_FORMAT.to_string(),
            exponent: 0,
        }
    }

    /// Sets the unit of the result.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the number format of the result.
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the unit format. `%s` is replaced with the unit.
    pub fn with_unit_format(mut self, unit_format: impl Into<String>) -> Self {
        self.unit_format = unit_format.into();
        self
    }

    /// Sets the exponent of the result.
    pub fn with_exponent(mut self, exponent: i32) -> Self {
        self.exponent = exponent;
        self
    }

    /// Returns true if the operation depends on a symbolic variable.
    pub fn is_symbolic(&self) -> bool {
        self.operation.is_symbolic()
    }

    /// Computes the numeric result of the operation.
    pub fn result(&self) -> Result<f64, Error> {
        self.operation.result()
    }

    /// Renders the name of the expression, such as `{E_{xample}}`.
    pub fn str_symbolic(&self) -> String {
        format!("{{{}}}", self.name)
    }

    /// Renders the formatted result, or the name of the expression if it cannot be evaluated.
    pub fn str_substituted(&self) -> String {
        self.str_result().unwrap_or_else(|_| self.str_symbolic())
    }

    /// Renders the formatted result of the expression.
    pub fn str_result(&self) -> Result<String, Error> {
        Ok(fmt_result(self.result()?, self.format, self.exponent))
    }

    /// Renders the formatted result of the expression, followed by its unit.
    pub fn str_result_with_unit(&self) -> Result<String, Error> {
        Ok(format!(r"{} \ {}", self.str_result()?, fmt_unit(&self.unit_format, &self.unit)))
    }

    /// Evaluates the expression and stores the result in a variable with the same unit and
    /// formatting. The variable is named after the expression unless a name is given.
    pub fn to_variable(&self, name: Option<&str>) -> Result<Variable, Error> {
        let mut var = Variable::from_expression(self)?;
        if let Some(name) = name {
            var.name = name.to_string();
        }
        Ok(var)
    }
}

/// Displays the expression as `name = symbolic = substituted = result unit`, or as
/// `name = symbolic` if the expression depends on a symbolic variable.
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbolic = self.operation.str_symbolic();
        if self.is_symbolic() {
            return write!(f, "{} = {}", self.name, symbolic);
        }

        let substituted = self.operation.str_substituted();
        match self.str_result_with_unit() {
            Ok(result) => write!(f, "{} = {} = {} = {}", self.name, symbolic, substituted, result),
            Err(_) => write!(f, "{} = {} = {}", self.name, symbolic, substituted),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_expression_renders_as_name() {
        let a = Variable::new("a", 2.0);
        let b = Variable::new("b", 3.0);
        let inner = Expression::new("c", &a * &b);
        let outer = Expression::new("d", &inner + &a).with_unit("kN");

        assert_eq!(outer.operation.str_symbolic(), "{c} + {a}");
        assert_eq!(outer.to_string(), r"d = {c} + {a} = 6.00 + 2.00 = 8.00 \ \mathrm{kN}");
    }

    #[test]
    fn symbolic_expression() {
        let x = Variable::symbolic("x");
        let e = Expression::new("e_1", &x * 2);
        assert!(e.is_symbolic());
        assert_eq!(e.to_string(), r"e_1 = {x} \cdot {2}");
        assert_eq!(e.str_substituted(), "{e_1}");
    }

    #[test]
    fn undefined_result() {
        let e = Expression::new("r", sqrt(-1));
        assert_eq!(e.to_string(), r"r = \sqrt{ {-1} } = \sqrt{ \left( -1 \right) }");
    }

    #[test]
    fn to_variable() {
        let e = Expression::new("A", mul([2, 3]).unwrap()).with_unit("m^2").with_exponent(1);
        let v = e.to_variable(Some("A_2")).unwrap();
        assert_eq!(v.to_string(), r"A_2 = { 0.60 \cdot 10^{1} } \ \mathrm{m^2}");
        assert_eq!(e.to_variable(None).unwrap().name, "A");
    }
}
