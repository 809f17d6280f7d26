//! Named values with a unit, and the predefined constants.

use crate::error::NoValue;
use crate::expression::Expression;
use crate::format::{fmt_result, fmt_unit, NumberFormat};
use latexexpr_error::Error;
use once_cell::sync::Lazy;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unit format used when none is given: units are typeset upright.
pub const DEFAULT_UNIT_FORMAT: &str = r"\mathrm{%s}";

/// The number `0`.
pub static ZERO: Lazy<Variable> = Lazy::new(|| {
    VariableBuilder::new("0").value(0.0).format(NumberFormat::Integer).build()
});

/// The number `1`.
pub static ONE: Lazy<Variable> = Lazy::new(|| {
    VariableBuilder::new("1").value(1.0).format(NumberFormat::Integer).build()
});

/// The number `2`.
pub static TWO: Lazy<Variable> = Lazy::new(|| {
    VariableBuilder::new("2").value(2.0).format(NumberFormat::Integer).build()
});

/// Euler's number.
pub static E: Lazy<Variable> = Lazy::new(|| Variable::new(r"\mathrm{e}", std::f64::consts::E));

/// The ratio of a circle's circumference to its diameter.
pub static PI: Lazy<Variable> = Lazy::new(|| Variable::new(r"\pi", std::f64::consts::PI));

/// A named value, such as `a_{22} = 3.45 \ \mathrm{kN}`.
///
/// A variable without a value is _symbolic_: it renders as its name everywhere, and any attempt to
/// evaluate it fails with [`NoValue`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    /// The LaTeX name of the variable.
    pub name: String,

    /// The value of the variable, or [`None`] if it is symbolic.
    pub value: Option<f64>,

    /// The unit of the value.
    pub unit: String,

    /// How to format the value.
    pub format: NumberFormat,

    /// How to format the unit. `%s` is replaced with the unit.
    pub unit_format: String,

    /// The exponent to render the value with, as in `m \cdot 10^{exponent}`.
    pub exponent: i32,
}

impl Variable {
    /// Creates a variable with the given value and default formatting.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        VariableBuilder::new(name).value(value).build()
    }

    /// Creates a symbolic variable, which has no value.
    pub fn symbolic(name: impl Into<String>) -> Self {
        VariableBuilder::new(name).build()
    }

    /// Creates a numeric literal: a variable named after its value.
    pub fn literal(value: f64) -> Self {
        let format = NumberFormat::General(6);
        VariableBuilder::new(format.format(value)).value(value).format(format).build()
    }

    /// Creates a builder for a variable with the given name.
    pub fn builder(name: impl Into<String>) -> VariableBuilder {
        VariableBuilder::new(name)
    }

    /// Creates a variable holding the result of the given expression, with the same name, unit
    /// and formatting.
    pub fn from_expression(expr: &Expression) -> Result<Self, Error> {
        Ok(Self {
            name: expr.name.clone(),
            value: Some(expr.result()?),
            unit: expr.unit.clone(),
            format: expr.format,
            unit_format: expr.unit_format.clone(),
            exponent: expr.exponent,
        })
    }

    /// Returns true if the variable has no value.
    pub fn is_symbolic(&self) -> bool {
        self.value.is_none()
    }

    /// Returns true if the variable is a numeric literal, such as `2` or `-0.5`, whose name is its
    /// value.
    pub fn is_literal(&self) -> bool {
        match self.value {
            Some(value) => value.is_finite() && self.name == NumberFormat::General(6).format(value),
            None => false,
        }
    }

    /// Returns the value of the variable.
    pub fn result(&self) -> Result<f64, Error> {
        self.value.ok_or_else(|| Error::new(self.str_symbolic(), NoValue { name: self.name.clone() }))
    }

    /// Renders the name of the variable, such as `{a_{22}}`.
    pub fn str_symbolic(&self) -> String {
        format!("{{{}}}", self.name)
    }

    /// Renders the value of the variable. This is the same as [`Variable::str_result`].
    pub fn str_substituted(&self) -> String {
        self.str_result()
    }

    /// Renders the formatted value of the variable, or its name if it is symbolic.
    pub fn str_result(&self) -> String {
        match self.value {
            Some(value) => fmt_result(value, self.format, self.exponent),
            None => self.str_symbolic(),
        }
    }

    /// Renders the formatted value of the variable, followed by its unit.
    pub fn str_result_with_unit(&self) -> String {
        format!(r"{} \ {}", self.str_result(), fmt_unit(&self.unit_format, &self.unit))
    }
}

/// Displays the variable as `name = value unit`.
impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.str_result_with_unit())
    }
}

/// Helper struct to build a [`Variable`].
///
/// ```
/// use latexexpr::{NumberFormat, Variable};
///
/// let a = Variable::builder("a_{22}")
///     .value(3.45)
///     .unit("kN")
///     .format(NumberFormat::Fixed(1))
///     .build();
/// assert_eq!(a.to_string(), r"a_{22} = 3.5 \ \mathrm{kN}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBuilder(Variable);

impl VariableBuilder {
    /// Creates a new builder for a symbolic variable with default formatting.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Variable {
            name: name.into(),
            value: None,
            unit: String::new(),
            format: NumberFormat::default(),
            unit_format: DEFAULT_UNIT_FORMAT.to_string(),
            exponent: 0,
        })
    }

    /// Sets the value of the variable.
    pub fn value(mut self, value: f64) -> Self {
        self.0.value = Some(value);
        self
    }

    /// Sets the unit of the variable.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.0.unit = unit.into();
        self
    }

    /// Sets the number format. See [`NumberFormat`] for more information.
    pub fn format(mut self, format: NumberFormat) -> Self {
        self.0.format = format;
        self
    }

    /// Sets the unit format. `%s` is replaced with the unit; use `"%s"` for no formatting.
    pub fn unit_format(mut self, unit_format: impl Into<String>) -> Self {
        self.0.unit_format = unit_format.into();
        self
    }

    /// Sets the exponent the value is rendered with.
    pub fn exponent(mut self, exponent: i32) -> Self {
        self.0.exponent = exponent;
        self
    }

    /// Builds the [`Variable`].
    pub fn build(self) -> Variable {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display() {
        let v = Variable::builder("H_{ello}").value(3.25).unit("m").build();
        assert_eq!(v.to_string(), r"H_{ello} = 3.25 \ \mathrm{m}");
        assert_eq!(v.str_symbolic(), "{H_{ello}}");
    }

    #[test]
    fn negative_and_exponent() {
        let v = Variable::builder("F").value(-12500.0).unit("N").exponent(3).build();
        assert_eq!(v.str_result(), r"\left( -12.50 \cdot 10^{3} \right)");

        let v = Variable::builder("s").value(0.0045).unit("m").exponent(-3).unit_format("%s").build();
        assert_eq!(v.str_result_with_unit(), r"{ 4.50 \cdot 10^{-3} } \ m");
    }

    #[test]
    fn symbolic() {
        let x = Variable::symbolic("x");
        assert!(x.is_symbolic());
        assert_eq!(x.str_result(), "{x}");
        assert_eq!(x.to_string(), r"x = {x} \ \mathrm{}");
        assert!(x.result().is_err());
    }

    #[test]
    fn literals() {
        assert!(Variable::literal(2.0).is_literal());
        assert_eq!(Variable::literal(2.0).name, "2");
        assert_eq!(Variable::literal(-0.5).name, "-0.5");
        assert!(ZERO.is_literal());
        assert!(TWO.is_literal());
        assert!(!PI.is_literal());
        assert!(!Variable::new("a", 2.0).is_literal());
        assert!(!Variable::new("2", 2.5).is_literal());
    }

    #[test]
    fn constants() {
        assert_eq!(ONE.to_string(), r"1 = 1 \ \mathrm{}");
        assert_eq!(PI.str_result(), "3.14");
        assert_eq!(E.str_symbolic(), r"{\mathrm{e}}");
    }

    #[test]
    fn from_expression() {
        let a = Variable::new("a", 2.0);
        let e = Expression::new("E", &a * 3).with_unit("m").with_format(NumberFormat::Fixed(1));
        let v = Variable::from_expression(&e).unwrap();
        assert_eq!(v.to_string(), r"E = 6.0 \ \mathrm{m}");
    }
}
