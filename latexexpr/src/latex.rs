//! Export of results as LaTeX macros, to reuse them in the text of a document.
//!
//! ```
//! use latexexpr::{LatexCommand, Variable, What};
//!
//! let a = Variable::builder("a").value(2.5).unit("m").build();
//! assert_eq!(
//!     a.to_latex_variable("aLength", What::ValUnit, LatexCommand::NewCommand).unwrap(),
//!     r"\newcommand{\aLength}{2.50 \ \mathrm{m}}",
//! );
//! ```

use crate::error::InvalidWhat;
use crate::expression::Expression;
use crate::variable::Variable;
use latexexpr_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The part of a variable or expression to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum What {
    /// The unformatted numeric value.
    Float,

    /// The formatted value.
    Str,

    /// The formatted value, followed by the unit.
    ValUnit,

    /// The symbolic form of the operation. Only available for expressions.
    Symb,

    /// The substituted form of the operation. Only available for expressions.
    Subst,

    /// The whole `Display` output.
    All,
}

/// The LaTeX command used to define the macro.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LatexCommand {
    /// `\def\name{body}`.
    ///
    /// This is the default option.
    #[default]
    Def,

    /// `\newcommand{\name}{body}`.
    NewCommand,

    /// `\renewcommand{\name}{body}`.
    RenewCommand,
}

/// Defines a LaTeX macro with the given name (without the leading backslash) and body.
pub fn to_latex_variable(name: &str, body: &str, command: LatexCommand) -> String {
    match command {
        LatexCommand::Def => format!(r"\def\{}{{{}}}", name, body),
        LatexCommand::NewCommand => format!(r"\newcommand{{\{}}}{{{}}}", name, body),
        LatexCommand::RenewCommand => format!(r"\renewcommand{{\{}}}{{{}}}", name, body),
    }
}

/// Renders a float the way it is written in source code, always with a decimal point.
fn float_literal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl Variable {
    /// Exports part of the variable as a LaTeX macro. [`What::Symb`] and [`What::Subst`] are not
    /// available for variables and return [`InvalidWhat`].
    pub fn to_latex_variable(
        &self,
        name: &str,
        what: What,
        command: LatexCommand,
    ) -> Result<String, Error> {
        let body = match what {
            What::Float => float_literal(self.result()?),
            What::Str => self.str_result(),
            What::ValUnit => self.str_result_with_unit(),
            What::All => self.to_string(),
            What::Symb | What::Subst => {
                return Err(Error::new(self.str_symbolic(), InvalidWhat { what }));
            },
        };
        Ok(to_latex_variable(name, &body, command))
    }
}

impl Expression {
    /// Exports part of the expression as a LaTeX macro. [`What::Symb`] and [`What::Subst`]
    /// export the symbolic and substituted forms of the operation.
    pub fn to_latex_variable(
        &self,
        name: &str,
        what: What,
        command: LatexCommand,
    ) -> Result<String, Error> {
        let body = match what {
            What::Float => float_literal(self.result()?),
            What::Str => self.str_result()?,
            What::ValUnit => self.str_result_with_unit()?,
            What::Symb => self.operation.str_symbolic(),
            What::Subst => self.operation.str_substituted(),
            What::All => self.to_string(),
        };
        Ok(to_latex_variable(name, &body, command))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use crate::error::{InvalidWhat, NoValue};
    use pretty_assertions::assert_eq;

    #[test]
    fn commands() {
        assert_eq!(to_latex_variable("x", "1", LatexCommand::Def), r"\def\x{1}");
        assert_eq!(to_latex_variable("x", "1", LatexCommand::NewCommand), r"\newcommand{\x}{1}");
        assert_eq!(to_latex_variable("x", "1", LatexCommand::RenewCommand), r"\renewcommand{\x}{1}");
    }

    #[test]
    fn variable_parts() {
        let a = Variable::builder("a").value(3.0).unit("kN").build();
        let def = |what| a.to_latex_variable("A", what, LatexCommand::Def);
        assert_eq!(def(What::Float).unwrap(), r"\def\A{3.0}");
        assert_eq!(def(What::Str).unwrap(), r"\def\A{3.00}");
        assert_eq!(def(What::All).unwrap(), r"\def\A{a = 3.00 \ \mathrm{kN}}");

        let err = def(What::Subst).unwrap_err();
        assert_eq!(err.downcast_ref::<InvalidWhat>(), Some(&InvalidWhat { what: What::Subst }));
    }

    #[test]
    fn expression_parts() {
        let a = Variable::new("a", 0.1);
        let b = Variable::new("b", 0.2);
        let e = Expression::new("c", &a + &b).with_unit("m");
        let def = |what| e.to_latex_variable("C", what, LatexCommand::Def).unwrap();
        assert_eq!(def(What::Float), r"\def\C{0.30000000000000004}");
        assert_eq!(def(What::ValUnit), r"\def\C{0.30 \ \mathrm{m}}");
        assert_eq!(def(What::Symb), r"\def\C{{a} + {b}}");
        assert_eq!(def(What::Subst), r"\def\C{0.10 + 0.20}");
    }

    #[test]
    fn symbolic_float() {
        let x = Variable::symbolic("x");
        let err = x.to_latex_variable("X", What::Float, LatexCommand::Def).unwrap_err();
        assert!(err.is::<NoValue>());
        assert_eq!(x.to_latex_variable("X", What::Str, LatexCommand::Def).unwrap(), r"\def\X{{x}}");
    }
}
