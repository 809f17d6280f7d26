//! Symbolic manipulation of expression trees.
//!
//! Each function converts the given node into an expression of the symbolic algebra (see
//! [`convert`]), processes it with the corresponding function of [`latexexpr_symbolic`], and
//! converts the result back into a node. Symbolic variables, as well as variables with a value
//! unless [`ConvertOptions::substitute_floats`] is set, are kept as symbols and restored in the
//! result.
//!
//! ```
//! use latexexpr::{Expression, Variable};
//! use latexexpr::symbolic::ConvertOptions;
//!
//! let x = Variable::symbolic("x");
//! let mut e = Expression::new("e", &x + &x + 2 * &x);
//! e.simplify(&ConvertOptions::default()).unwrap();
//! assert_eq!(e.to_string(), r"e = {4} \cdot {x}");
//! ```

pub mod convert;

use crate::error::{CasFailure, InvalidCollectSymbol};
use crate::expression::Expression;
use crate::node::Node;
use crate::operation::{Operation, OperationKind};
use crate::variable::Variable;
use convert::{from_cas, to_cas, variable_symbol};
use latexexpr_error::Error;
use latexexpr_symbolic::{Expr, SymbolicError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for the conversion of nodes into expressions of the symbolic algebra.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvertOptions {
    /// If true, variables with a value are replaced with that value instead of being kept as
    /// symbols. Symbolic variables are always kept as symbols.
    ///
    /// The default value is `false`.
    pub substitute_floats: bool,
}

impl ConvertOptions {
    /// Creates a new builder for [`ConvertOptions`].
    pub fn builder() -> ConvertOptionsBuilder {
        ConvertOptionsBuilder::default()
    }

    /// Creates a builder initialized with these options.
    pub fn into_builder(self) -> ConvertOptionsBuilder {
        ConvertOptionsBuilder(self)
    }
}

/// A builder for [`ConvertOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptionsBuilder(ConvertOptions);

impl ConvertOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether variables with a value are replaced with that value.
    pub fn substitute_floats(mut self, substitute_floats: bool) -> Self {
        self.0.substitute_floats = substitute_floats;
        self
    }

    /// Builds the [`ConvertOptions`].
    pub fn build(self) -> ConvertOptions {
        self.0
    }
}

/// Processes a node with the given function of the symbolic algebra.
///
/// Variables are returned unchanged, and expressions are returned with their operation processed.
fn process<F>(node: &Node, options: &ConvertOptions, f: F) -> Result<Node, Error>
where
    F: FnOnce(&Expr) -> Result<Expr, SymbolicError>,
{
    match node {
        Node::Variable(var) => Ok(Node::Variable(var.clone())),
        Node::Expression(expr) => {
            let operation = process(&expr.operation, options, f)?;
            Ok(Node::Expression(Expression {
                name: expr.name.clone(),
                operation: Box::new(operation),
                unit: expr.unit.clone(),
                format: expr.format,
                unit_format: expr.unit_format.clone(),
                exponent: expr.exponent,
            }))
        },
        Node::Operation(op) => {
            let (expr, vars) = to_cas(node, options)?;
            let result = f(&expr).map_err(|err| {
                Error::new(op.str_symbolic(), CasFailure { message: err.to_string() })
            })?;
            from_cas(&result, &vars)
        },
    }
}

/// Simplifies the node.
pub fn simplify(node: &Node, options: &ConvertOptions) -> Result<Node, Error> {
    process(node, options, |expr| Ok(latexexpr_symbolic::simplify(expr)))
}

/// Expands products and integer powers of sums in the node.
pub fn expand(node: &Node, options: &ConvertOptions) -> Result<Node, Error> {
    process(node, options, |expr| Ok(latexexpr_symbolic::expand(expr)))
}

/// Factors the node into irreducible factors over the rationals.
pub fn factor(node: &Node, options: &ConvertOptions) -> Result<Node, Error> {
    process(node, options, latexexpr_symbolic::factor)
}

/// Cancels common factors of the numerator and denominator of the node.
pub fn cancel(node: &Node, options: &ConvertOptions) -> Result<Node, Error> {
    process(node, options, latexexpr_symbolic::cancel)
}

/// Decomposes the node into partial fractions with respect to the given variable. If no variable
/// is given, the node must depend on a single symbol.
pub fn apart(node: &Node, var: Option<&Variable>, options: &ConvertOptions) -> Result<Node, Error> {
    let symbol = var.map(variable_symbol);
    let var = symbol.as_ref().and_then(Expr::as_symbol);
    process(node, options, |expr| latexexpr_symbolic::apart(expr, var))
}

/// Collects the terms of the node with the same powers of the given variables.
///
/// At least one variable must be given. When [`ConvertOptions::substitute_floats`] is set, the
/// variables must be symbolic, since variables with a value are replaced with that value.
pub fn collect(node: &Node, symbols: &[&Variable], options: &ConvertOptions) -> Result<Node, Error> {
    if symbols.is_empty() {
        return Err(Error::new(node.str_symbolic(), InvalidCollectSymbol { name: None }));
    }

    let symbols = symbols.iter()
        .map(|var| {
            if var.is_literal() || (options.substitute_floats && !var.is_symbolic()) {
                Err(Error::new(var.str_symbolic(), InvalidCollectSymbol {
                    name: Some(var.name.clone()),
                }))
            } else {
                Ok(variable_symbol(var))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    process(node, options, |expr| Ok(latexexpr_symbolic::collect(expr, &symbols)))
}

/// Generates in-place versions of the functions taking only a node and options.
macro_rules! in_place {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        impl Expression {
            $(
                $(#[$attr])*
                ///
                /// The operation of the expression is replaced with the result.
                pub fn $name(&mut self, options: &ConvertOptions) -> Result<(), Error> {
                    *self.operation = $name(&self.operation, options)?;
                    Ok(())
                }
            )*
        }

        impl Operation {
            $(
                $(#[$attr])*
                ///
                /// The operation is replaced with the result.
                pub fn $name(&mut self, options: &ConvertOptions) -> Result<(), Error> {
                    let result = $name(&Node::Operation(self.clone()), options)?;
                    self.assign(result);
                    Ok(())
                }
            )*
        }
    };
}

in_place! {
    /// Simplifies the expression in place.
    simplify;

    /// Expands the expression in place.
    expand;

    /// Factors the expression in place.
    factor;

    /// Cancels common factors of the expression in place.
    cancel;
}

impl Expression {
    /// Decomposes the expression into partial fractions in place. See [`apart`].
    pub fn apart(&mut self, var: Option<&Variable>, options: &ConvertOptions) -> Result<(), Error> {
        *self.operation = apart(&self.operation, var, options)?;
        Ok(())
    }

    /// Collects the terms of the expression in place. See [`collect`].
    pub fn collect(&mut self, symbols: &[&Variable], options: &ConvertOptions) -> Result<(), Error> {
        *self.operation = collect(&self.operation, symbols, options)?;
        Ok(())
    }
}

impl Operation {
    /// Replaces this operation with the given node. A node that is not an operation is wrapped in
    /// a transparent operation.
    fn assign(&mut self, node: Node) {
        *self = match node {
            Node::Operation(op) => op,
            node => Operation::new_unchecked(OperationKind::None, vec![node]),
        };
    }

    /// Decomposes the operation into partial fractions in place. See [`apart`].
    pub fn apart(&mut self, var: Option<&Variable>, options: &ConvertOptions) -> Result<(), Error> {
        let result = apart(&Node::Operation(self.clone()), var, options)?;
        self.assign(result);
        Ok(())
    }

    /// Collects the terms of the operation in place. See [`collect`].
    pub fn collect(&mut self, symbols: &[&Variable], options: &ConvertOptions) -> Result<(), Error> {
        let result = collect(&Node::Operation(self.clone()), symbols, options)?;
        self.assign(result);
        Ok(())
    }
}
