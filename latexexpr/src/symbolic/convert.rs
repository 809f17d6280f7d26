//! Conversion between [`Node`]s and the expressions of the symbolic algebra.

use crate::error::{InvalidArity, UnknownSymbol, UnsupportedCall};
use crate::node::Node;
use crate::operation::{Arity, Operation, OperationKind};
use crate::variable::{Variable, E, PI};
use latexexpr_error::Error;
use latexexpr_symbolic::{primitive::{float, int_from_f64}, Expr, Primary};
use std::collections::HashMap;
use super::ConvertOptions;

/// The variables that were converted to symbols, by name. Converting back uses this map to
/// restore the original variables.
pub type VarMap = HashMap<String, Variable>;

/// Converts a node into an expression of the symbolic algebra.
///
/// Numeric literals become numbers. Other variables become symbols named after the variable and
/// are recorded in the returned [`VarMap`], unless [`ConvertOptions::substitute_floats`] is set,
/// in which case variables with a value become that value. The constants [`E`] and [`PI`] become
/// the symbols `e` and `pi`; other variables named `e` or `pi` are renamed to `_e` and `_pi` so
/// they are not mistaken for the constants.
pub fn to_cas(node: &Node, options: &ConvertOptions) -> Result<(Expr, VarMap), Error> {
    let mut vars = VarMap::new();
    let expr = node_to_cas(node, options, &mut vars)?;
    Ok((expr, vars))
}

/// Converts an expression of the symbolic algebra back into a node, restoring the variables
/// recorded in `vars`.
pub fn from_cas(expr: &Expr, vars: &VarMap) -> Result<Node, Error> {
    match expr {
        Expr::Primary(Primary::Integer(n)) => Ok(literal(n.to_f64())),
        Expr::Primary(Primary::Float(n)) => Ok(literal(n.to_f64())),
        Expr::Primary(Primary::Symbol(name)) => symbol_from_cas(name, vars),
        Expr::Primary(Primary::Call(name, args)) => call_from_cas(name, args, vars),
        Expr::Add(terms) => add_from_cas(terms, vars),
        Expr::Mul(factors) => mul_from_cas(factors, vars),
        Expr::Exp(base, exp) => exp_from_cas(base, exp, vars),
    }
}

/// Returns the name of the symbol a constant is converted to.
fn constant_symbol(var: &Variable) -> Option<&'static str> {
    let is = |constant: &Variable| var.name == constant.name && var.value == constant.value;
    if is(&PI) {
        Some("pi")
    } else if is(&E) {
        Some("e")
    } else {
        None
    }
}

/// Converts a number into an integer if it has no fractional part, otherwise into a float.
fn number(value: f64) -> Expr {
    match int_from_f64(value) {
        Some(n) => Expr::integer(n),
        None => Expr::float(float(value)),
    }
}

/// Returns the name of the symbol a variable other than a constant is converted to.
///
/// The names `e` and `pi` are reserved for the constants, so a variable with one of these names,
/// or with a name starting with `_`, gets a `_` prepended to its name.
fn user_symbol_name(var: &Variable) -> String {
    match var.name.as_str() {
        name @ ("e" | "pi") => format!("_{name}"),
        name if name.starts_with('_') => format!("_{name}"),
        name => name.to_string(),
    }
}

/// Returns the symbol a variable is converted to when it is not substituted with its value.
pub(crate) fn variable_symbol(var: &Variable) -> Expr {
    match constant_symbol(var) {
        Some(name) => Expr::symbol(name),
        None => Expr::symbol(user_symbol_name(var)),
    }
}

fn variable_to_cas(var: &Variable, options: &ConvertOptions, vars: &mut VarMap) -> Expr {
    match var.value {
        Some(value) if var.is_literal() => number(value),
        Some(value) if options.substitute_floats => Expr::float(float(value)),
        _ => match constant_symbol(var) {
            Some(name) => Expr::symbol(name),
            None => {
                let name = user_symbol_name(var);
                vars.insert(name.clone(), var.clone());
                Expr::symbol(name)
            },
        },
    }
}

fn node_to_cas(node: &Node, options: &ConvertOptions, vars: &mut VarMap) -> Result<Expr, Error> {
    match node {
        Node::Variable(var) => Ok(variable_to_cas(var, options, vars)),
        Node::Operation(op) => operation_to_cas(op, options, vars),
        Node::Expression(expr) => node_to_cas(&expr.operation, options, vars),
    }
}

/// The call `ln(x)`.
fn ln_call(x: Expr) -> Expr {
    Expr::call("ln", vec![x])
}

fn operation_to_cas(op: &Operation, options: &ConvertOptions, vars: &mut VarMap) -> Result<Expr, Error> {
    op.check_arity()?;
    let args = op.args.iter()
        .map(|arg| node_to_cas(arg, options, vars))
        .collect::<Result<Vec<_>, _>>()?;

    let arity_error = || Error::new(op.str_symbolic(), InvalidArity {
        kind: op.kind,
        expected: op.kind.arity(),
        given: op.args.len(),
    });

    match op.kind.arity() {
        Arity::Variadic => {
            let mut args = args.into_iter();
            let first = args.next().ok_or_else(arity_error)?;
            Ok(match op.kind {
                OperationKind::Add => args.fold(first, |acc, arg| acc + arg),
                OperationKind::Mul => args.fold(first, |acc, arg| acc * arg),
                kind => Expr::call(kind.name(), std::iter::once(first).chain(args).collect()),
            })
        },
        Arity::Binary => {
            let [a, b] = <[Expr; 2]>::try_from(args).map_err(|_| arity_error())?;
            Ok(match op.kind {
                OperationKind::Sub => a + -b,
                OperationKind::Div | OperationKind::Div2 => a * b.recip(),
                OperationKind::Pow => a.pow(b),
                OperationKind::Root => b.pow(a.recip()),
                OperationKind::Log => ln_call(b) * ln_call(a).recip(),
                kind => unreachable!("`{}` is not a binary operation", kind),
            })
        },
        Arity::Unary => {
            let [a] = <[Expr; 1]>::try_from(args).map_err(|_| arity_error())?;
            Ok(match op.kind {
                OperationKind::Neg => -a,
                OperationKind::Sqr => a.pow(Expr::integer(2)),
                OperationKind::Sqrt => a.sqrt(),
                OperationKind::Exp => Expr::symbol("e").pow(a),
                OperationKind::Log10 => ln_call(a) * ln_call(Expr::integer(10)).recip(),
                OperationKind::Abs
                    | OperationKind::Sin
                    | OperationKind::Cos
                    | OperationKind::Tan
                    | OperationKind::Sinh
                    | OperationKind::Cosh
                    | OperationKind::Tanh
                    | OperationKind::Ln => Expr::call(op.kind.name(), vec![a]),
                _ => a,
            })
        },
    }
}

/// Creates a numeric literal node.
fn literal(value: f64) -> Node {
    Node::Variable(Variable::literal(value))
}

/// Creates an operation node without checking its arguments.
fn operation(kind: OperationKind, args: Vec<Node>) -> Node {
    Node::Operation(Operation::new_unchecked(kind, args))
}

/// Returns true if the node is an operation of one of the given kinds.
fn is_any(node: &Node, kinds: &[OperationKind]) -> bool {
    node.as_operation().map(|op| kinds.contains(&op.kind)).unwrap_or(false)
}

/// Wraps sums and differences in round brackets, so they can be used as a factor.
fn bracket_sum(node: Node) -> Node {
    if is_any(&node, &[OperationKind::Add, OperationKind::Sub]) {
        operation(OperationKind::RBrackets, vec![node])
    } else {
        node
    }
}

/// Wraps compound operations in round brackets, so they can be used as the base of a power.
fn bracket_base(node: Node) -> Node {
    use OperationKind::*;
    if is_any(&node, &[Add, Sub, Mul, Div, Div2, Neg, Pow]) {
        operation(RBrackets, vec![node])
    } else {
        node
    }
}

fn symbol_from_cas(name: &str, vars: &VarMap) -> Result<Node, Error> {
    match (vars.get(name), name) {
        (Some(var), _) => Ok(Node::Variable(var.clone())),
        (None, "pi") => Ok(Node::Variable(PI.clone())),
        (None, "e") => Ok(Node::Variable(E.clone())),
        (None, _) => Err(Error::new(name, UnknownSymbol { name: name.to_string() })),
    }
}

fn call_from_cas(name: &str, args: &[Expr], vars: &VarMap) -> Result<Node, Error> {
    let kind = match name {
        "abs" => OperationKind::Abs,
        "sin" => OperationKind::Sin,
        "cos" => OperationKind::Cos,
        "tan" => OperationKind::Tan,
        "sinh" => OperationKind::Sinh,
        "cosh" => OperationKind::Cosh,
        "tanh" => OperationKind::Tanh,
        "ln" => OperationKind::Ln,
        "max" => OperationKind::Max,
        "min" => OperationKind::Min,
        _ => {
            let source = Expr::call(name, args.to_vec()).to_string();
            return Err(Error::new(source, UnsupportedCall { name: name.to_string() }));
        },
    };

    let args = args.iter()
        .map(|arg| from_cas(arg, vars))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::Operation(Operation::new(kind, args)?))
}

/// If the node is a negation, returns its argument. Otherwise, returns the node unchanged.
fn negated(node: Node) -> Result<Node, Node> {
    match node {
        Node::Operation(mut op) if op.kind == OperationKind::Neg && op.args.len() == 1 => {
            Ok(op.args.remove(0))
        },
        node => Err(node),
    }
}

/// Joins the terms of a sum. A single term is returned as it is.
fn join_sum(head: Option<Node>, rest: Vec<Node>) -> Node {
    let mut terms = head.into_iter().chain(rest).collect::<Vec<_>>();
    match terms.len() {
        0 => literal(0.0),
        1 => terms.remove(0),
        _ => operation(OperationKind::Add, terms),
    }
}

/// Converts a sum. Negated terms after the first are subtracted from the terms before them,
/// reading left to right.
fn add_from_cas(terms: &[Expr], vars: &VarMap) -> Result<Node, Error> {
    let mut head: Option<Node> = None;
    let mut pending = Vec::new();

    for term in terms {
        let node = from_cas(term, vars)?;
        if head.is_none() && pending.is_empty() {
            pending.push(node);
            continue;
        }

        match negated(node) {
            Ok(subtrahend) => {
                let minuend = join_sum(head.take(), std::mem::take(&mut pending));
                head = Some(operation(OperationKind::Sub, vec![minuend, subtrahend]));
            },
            Err(node) => pending.push(node),
        }
    }

    Ok(join_sum(head, pending))
}

/// Finds the factors `ln(x)` and `ln(b)^-1` of a product. Returns their positions, and the
/// logarithm of `x` to the base `b` they are converted to.
fn log_from_cas(factors: &[Expr], vars: &VarMap) -> Result<Option<(usize, usize, Node)>, Error> {
    let ln_arg = |expr: &Expr| match expr.as_call() {
        Some(("ln", [arg])) => Some(arg.clone()),
        _ => None,
    };
    let recip_ln_arg = |expr: &Expr| match expr {
        Expr::Exp(base, exp) if exp.as_integer().map(|n| *n == -1).unwrap_or(false) => ln_arg(base),
        _ => None,
    };

    let x = factors.iter()
        .enumerate()
        .find_map(|(i, factor)| Some((i, ln_arg(factor)?)));
    let base = factors.iter()
        .enumerate()
        .find_map(|(i, factor)| Some((i, recip_ln_arg(factor)?)));
    let (Some((x_idx, x)), Some((base_idx, base))) = (x, base) else {
        return Ok(None);
    };

    let x = from_cas(&x, vars)?;
    let log = if base.as_integer().map(|n| *n == 10).unwrap_or(false) {
        operation(OperationKind::Log10, vec![x])
    } else {
        operation(OperationKind::Log, vec![from_cas(&base, vars)?, x])
    };
    Ok(Some((x_idx, base_idx, log)))
}

/// Joins converted factors into a product. No factors is the number one.
fn product(mut factors: Vec<Node>) -> Node {
    match factors.len() {
        0 => literal(1.0),
        1 => factors.remove(0),
        _ => operation(OperationKind::Mul, factors.into_iter().map(bracket_sum).collect()),
    }
}

fn factors_from_cas(factors: &[Expr], vars: &VarMap) -> Result<Vec<Node>, Error> {
    factors.iter()
        .map(|factor| from_cas(factor, vars))
        .collect()
}

/// Converts a product. Factors with negative integer exponents are moved into the denominator
/// of a single fraction, and a factor of `-1` becomes a negation. The factors `ln(x)` and
/// `ln(b)^-1` are joined into a logarithm, placed last in the numerator.
fn mul_from_cas(factors: &[Expr], vars: &VarMap) -> Result<Node, Error> {
    let mut log = None;
    let mut rest = factors.to_vec();
    if let Some((x_idx, base_idx, node)) = log_from_cas(factors, vars)? {
        rest = factors.iter()
            .enumerate()
            .filter(|(i, _)| *i != x_idx && *i != base_idx)
            .map(|(_, factor)| factor.clone())
            .collect();
        log = Some(node);
    }

    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    let mut negate = false;

    for factor in &rest {
        if factor.as_integer().map(|n| *n == -1).unwrap_or(false) {
            negate = !negate;
            continue;
        }

        match factor {
            Expr::Exp(base, exp) if exp.as_integer().map(|n| *n < 0).unwrap_or(false) => {
                let exp = exp.as_integer().map(|n| -n.clone()).unwrap_or_default();
                if exp == 1 {
                    denominator.push((**base).clone());
                } else {
                    denominator.push((**base).clone().pow(Expr::integer(exp)));
                }
            },
            factor => numerator.push(factor.clone()),
        }
    }

    // the sign of a fraction is written in front of it
    if !denominator.is_empty() {
        if let Some(idx) = numerator.iter().position(Expr::is_negative_number) {
            negate = !negate;
            let positive = -numerator[idx].clone();
            if positive.as_integer().map(|n| *n == 1).unwrap_or(false) {
                numerator.remove(idx);
            } else {
                numerator[idx] = positive;
            }
        }
    }

    let mut numerator = factors_from_cas(&numerator, vars)?;
    numerator.extend(log);
    let numerator = product(numerator);
    let node = if denominator.is_empty() {
        numerator
    } else {
        let denominator = product(factors_from_cas(&denominator, vars)?);
        operation(OperationKind::Div, vec![numerator, denominator])
    };

    if negate {
        Ok(operation(OperationKind::Neg, vec![bracket_sum(node)]))
    } else {
        Ok(node)
    }
}

fn exp_from_cas(base: &Expr, exp: &Expr, vars: &VarMap) -> Result<Node, Error> {
    let is_int = |n: i32| exp.as_integer().map(|exp| *exp == n).unwrap_or(false);

    if is_int(-1) {
        Ok(operation(OperationKind::Div, vec![literal(1.0), from_cas(base, vars)?]))
    } else if is_int(2) {
        Ok(operation(OperationKind::Pow, vec![bracket_base(from_cas(base, vars)?), literal(2.0)]))
    } else if exp.as_integer_recip().map(|n| *n == 2).unwrap_or(false) {
        Ok(operation(OperationKind::Sqrt, vec![from_cas(base, vars)?]))
    } else if base.as_symbol() == Some("e") {
        Ok(operation(OperationKind::Exp, vec![from_cas(exp, vars)?]))
    } else {
        Ok(operation(OperationKind::Pow, vec![bracket_base(from_cas(base, vars)?), from_cas(exp, vars)?]))
    }
}
