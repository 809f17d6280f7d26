//! The operand type shared by variables, operations and expressions.

use crate::expression::Expression;
use crate::operation::Operation;
use crate::variable::Variable;
use latexexpr_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An operand of an [`Operation`].
///
/// Any of the three types, references to them, and `i32` / `f64` literals can be converted into a
/// [`Node`]. Literals become numeric literal [`Variable`]s, named after their value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    Variable(Variable),
    Operation(Operation),
    Expression(Expression),
}

impl Node {
    /// Returns true if the node depends on a symbolic variable.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Self::Variable(var) => var.is_symbolic(),
            Self::Operation(op) => op.is_symbolic(),
            Self::Expression(expr) => expr.is_symbolic(),
        }
    }

    /// Computes the numeric result of the node.
    pub fn result(&self) -> Result<f64, Error> {
        match self {
            Self::Variable(var) => var.result(),
            Self::Operation(op) => op.result(),
            Self::Expression(expr) => expr.result(),
        }
    }

    /// Renders the node with names in place of values.
    pub fn str_symbolic(&self) -> String {
        match self {
            Self::Variable(var) => var.str_symbolic(),
            Self::Operation(op) => op.str_symbolic(),
            Self::Expression(expr) => expr.str_symbolic(),
        }
    }

    /// Renders the node with values in place of names.
    pub fn str_substituted(&self) -> String {
        match self {
            Self::Variable(var) => var.str_substituted(),
            Self::Operation(op) => op.str_substituted(),
            Self::Expression(expr) => expr.str_substituted(),
        }
    }

    /// Renders the formatted result of the node.
    pub fn str_result(&self) -> Result<String, Error> {
        match self {
            Self::Variable(var) => Ok(var.str_result()),
            Self::Operation(op) => op.str_result(),
            Self::Expression(expr) => expr.str_result(),
        }
    }

    /// If the node is a [`Variable`], returns a reference to it.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// If the node is an [`Operation`], returns a reference to it.
    pub fn as_operation(&self) -> Option<&Operation> {
        match self {
            Self::Operation(op) => Some(op),
            _ => None,
        }
    }

    /// If the node is an [`Expression`], returns a reference to it.
    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Self::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(var) => var.fmt(f),
            Self::Operation(op) => op.fmt(f),
            Self::Expression(expr) => expr.fmt(f),
        }
    }
}

/// Implements `From<T>` and `From<&T>` for [`Node`].
macro_rules! impl_from {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }

            impl From<&$ty> for Node {
                fn from(value: &$ty) -> Self {
                    Self::$ty(value.clone())
                }
            }
        )*
    };
}

impl_from!(Variable, Operation, Expression);

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Variable(Variable::literal(value as f64))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Variable(Variable::literal(value))
    }
}
