//! A representation of mathematical expressions that is easy to manipulate algebraically.
//!
//! [`Expr`] recursively flattens an expression into lists of terms and factors. For example,
//! `x + (y + z)` is a single [`Expr::Add`] node with _three_ children, and `a / b` is the product
//! of `a` and `b^-1`. Subtraction is addition of a product with `-1`.
//!
//! All modules in this crate operate on [`Expr`], and any occurrence of the word _expression_
//! refers to this type.
//!
//! # Canonical forms
//!
//! A few shapes have a fixed representation that the rest of the crate relies on:
//!
//! - A rational number `p/q` is `p * q^-1`, where `p` and `q` are [`Primary::Integer`]s, `q > 1`
//! and the `p` factor is omitted when it is `1`.
//! - The constants `π` and `e` are the symbols `pi` and `e`. `exp(x)` is `e^x`.
//! - `ln(x)` is a call named `ln`, and `log_b(x)` is `ln(x) * ln(b)^-1`.
//! - Roots are fractional powers: `sqrt(x)` is `x^(1/2)`.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal requires simplifying them, and
//! simplifying requires knowing which terms are equal. To break the cycle, the [`PartialEq`]
//! implementation for [`Expr`] uses **strict equality** instead:
//!
//! - Both expressions must be the same kind of node.
//! - [`Expr::Primary`] nodes must hold strictly equal values.
//! - [`Expr::Add`] and [`Expr::Mul`] nodes must hold strictly equal terms / factors, in any order.
//! - [`Expr::Exp`] nodes must have strictly equal bases and exponents.
//!
//! `x^2 + 2x + 1` and `(x + 1)^2` are not strictly equal, but two strictly equal expressions are
//! always mathematically equal. The [`Hash`] implementation agrees with strict equality, so
//! expressions can be used as keys of a hash map.

mod iter;
mod order;

use crate::primitive::int;
use iter::ExprIter;
use rug::{Float, Integer};
use std::{
    collections::{hash_map::DefaultHasher, BTreeSet},
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Mul, MulAssign, Neg},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single term / factor, such as a number, symbol, or function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A symbol, such as `x` or `v_1`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `max(x, y)`.
    Call(String, Vec<Expr>),
}

/// [`Hash`] is implemented manually to allow hashing [`Primary::Float`]s. This crate never
/// produces non-finite [`Float`]s.
impl Hash for Primary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Integer(int) => int.hash(state),
            Self::Float(float) => {
                // `0.0` and `-0.0` compare equal
                let value = float.to_f64();
                let value = if value == 0.0 { 0.0 } else { value };
                value.to_bits().hash(state);
            },
            Self::Symbol(sym) => sym.hash(state),
            Self::Call(name, args) => {
                name.hash(state);
                args.hash(state);
            },
        }
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// See the [`Hash`] implementation.
impl Eq for Primary {}

/// Adds two [`Primary`]s together. If both are the **same numeric type**, the numbers are added
/// together. Otherwise, the two [`Primary`]s are wrapped in an [`Expr::Add`].
impl Add<Primary> for Primary {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                Expr::Primary(Primary::Integer(lhs + rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                Expr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => Expr::Add(vec![
                Expr::Primary(lhs),
                Expr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are the **same numeric type**, the numbers are
/// multiplied together. Otherwise, the two [`Primary`]s are wrapped in an [`Expr::Mul`].
impl Mul<Primary> for Primary {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                Expr::Primary(Primary::Integer(lhs * rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                Expr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => Expr::Mul(vec![
                Expr::Primary(lhs),
                Expr::Primary(rhs),
            ]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    factor.fmt_operand(f, factor.precedence() < self.precedence())?;
                    for factor in iter {
                        write!(f, " * ")?;
                        factor.fmt_operand(f, factor.precedence() < self.precedence())?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                // a negative base must be wrapped to not read as `-(a^b)`
                base.fmt_operand(f, base.is_negative_number() || base.precedence() <= self.precedence())?;
                write!(f, "^")?;
                exp.fmt_operand(f, exp.precedence() < self.precedence())
            },
        }
    }
}

impl Expr {
    /// Returns the binding strength of the outermost operation of the expression. Higher values
    /// bind tighter.
    fn precedence(&self) -> u8 {
        match self {
            Self::Add(_) => 1,
            Self::Mul(_) => 2,
            Self::Exp(..) => 3,
            Self::Primary(_) => 4,
        }
    }

    /// Formats the expression, wrapping it in parentheses if `paren` is true.
    fn fmt_operand(&self, f: &mut Formatter<'_>, paren: bool) -> fmt::Result {
        if paren {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    /// Creates a [`Primary::Integer`] expression.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Integer(int(n)))
    }

    /// Creates a [`Primary::Float`] expression.
    pub fn float(n: Float) -> Self {
        Self::Primary(Primary::Float(n))
    }

    /// Creates a [`Primary::Symbol`] expression.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a [`Primary::Call`] expression.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Raises the expression to the given power. No simplification is done.
    pub fn pow(self, exp: Expr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns the reciprocal of the expression, `self^-1`. No simplification is done.
    pub fn recip(self) -> Self {
        self.pow(Self::integer(-1))
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns a reference
    /// to the contained integer (the denominator of the fraction).
    pub fn as_integer_recip(&self) -> Option<&Integer> {
        if let Self::Exp(base, exp) = self {
            if exp.as_integer().map(|n| *n == -1).unwrap_or(false) {
                return base.as_integer();
            }
        }

        None
    }

    /// Returns true if the expression is a [`Primary::Integer`] raised to the power of -1.
    pub fn is_integer_recip(&self) -> bool {
        self.as_integer_recip().is_some()
    }

    /// If the expression is a [`Primary::Float`], returns a reference to the contained float.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(float)) => Some(float),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// Returns true if the expression is a [`Primary::Integer`] or a [`Primary::Float`].
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Returns true if the expression is a negative [`Primary::Integer`] or [`Primary::Float`].
    pub fn is_negative_number(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => *n < 0,
            Self::Primary(Primary::Float(n)) => *n < 0,
            _ => false,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Call`], returns the name of the function and its
    /// arguments.
    pub fn as_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// Returns the terms of the expression: the terms of an [`Expr::Add`], or the expression
    /// itself.
    pub fn terms(&self) -> &[Expr] {
        match self {
            Self::Add(terms) => terms,
            expr => std::slice::from_ref(expr),
        }
    }

    /// Returns the factors of the expression: the factors of an [`Expr::Mul`], or the expression
    /// itself.
    pub fn factors(&self) -> &[Expr] {
        match self {
            Self::Mul(factors) => factors,
            expr => std::slice::from_ref(expr),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or an [`Expr::Primary`] containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::integer(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::integer(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns the square root of this expression, `self^(2^-1)`, with the exponent in the same
    /// canonical form the simplifier produces for one half. No other simplification is done.
    pub fn sqrt(self) -> Self {
        self.pow(Self::integer(2).recip())
    }

    /// Returns true if `other` is strictly equal to this expression or to any of its
    /// subexpressions.
    pub fn contains(&self, other: &Expr) -> bool {
        self.post_order_iter().any(|expr| expr == other)
    }

    /// Returns the names of all symbols in the expression, in sorted order.
    pub fn free_symbols(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(Expr::as_symbol)
            .collect()
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first). Arguments of function calls are visited before the call itself.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Returns true if both slices contain strictly equal expressions, in any order.
fn same_elements(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    for item in lhs {
        let found = rhs.iter()
            .enumerate()
            .position(|(idx, other)| !used[idx] && item == other);
        match found {
            Some(idx) => used[idx] = true,
            None => return false,
        }
    }

    true
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_elements(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Terms and factors are hashed independently of their order, to agree with strict equality.
impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Primary(primary) => primary.hash(state),
            Self::Add(items) | Self::Mul(items) => {
                let combined = items.iter().fold(0u64, |acc, item| {
                    let mut hasher = DefaultHasher::new();
                    item.hash(&mut hasher);
                    acc.wrapping_add(hasher.finish())
                });
                items.len().hash(state);
                combined.hash(state);
            },
            Self::Exp(base, exp) => {
                base.hash(state);
                exp.hash(state);
            },
        }
    }
}

/// Adds two [`Expr`]s together. No simplification is done, except for the case where the operands
/// are a mix of [`Primary`] and / or [`Expr::Add`], in which case both are combined in one list
/// of terms (flattening).
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Adds two [`Expr`]s together. The behavior is the same as [`Add`], except the allocated memory
/// of `self` is reused if possible.
impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                *lhs += rhs;
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                *lhs += rhs;
            },
            (Self::Add(terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
            },
            (Self::Add(terms), other) => {
                terms.push(other);
            },
            (lhs, rhs) => {
                let owned = std::mem::replace(lhs, Self::Add(Vec::new()));
                *lhs = owned + rhs;
            },
        }
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`Expr::Mul`], in which case both are combined in
/// one list of factors (flattening).
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Mul(factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
            },
            (Self::Mul(factors), other) => {
                factors.push(other);
            },
            (lhs, rhs) => {
                let owned = std::mem::replace(lhs, Self::Mul(Vec::new()));
                *lhs = owned * rhs;
            },
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::integer(-1) * expr,
        }
    }
}

/// The output of `pretty_assertions` for failing tests can be confusing here: strict equality
/// accepts terms and factors in any order, but the diff does not.
#[cfg(test)]
mod tests {
    use crate::primitive::float;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn strict_equality() {
        // 2 * (x + (y - 5)) and (y - 5 + x) * 2
        let a = Expr::integer(2) * (sym("x") + (sym("y") + -Expr::integer(5)));
        let b = (sym("y") + -Expr::integer(5) + sym("x")) * Expr::integer(2);
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // semantically equal, but not strictly equal
        let a = Expr::integer(2) * (sym("x") + sym("y"));
        let b = Expr::integer(2) * sym("x") + Expr::integer(2) * sym("y");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_multiset() {
        let a = Expr::Mul(vec![sym("x"), sym("x"), sym("y")]);
        let b = Expr::Mul(vec![sym("x"), sym("y"), sym("y")]);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_agrees_with_equality() {
        fn hash_of(expr: &Expr) -> u64 {
            let mut hasher = DefaultHasher::new();
            expr.hash(&mut hasher);
            hasher.finish()
        }

        let a = sym("a") + sym("b") * sym("c");
        let b = sym("c") * sym("b") + sym("a");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn flatten_on_add_and_mul() {
        let expr = sym("x") + (sym("y") + sym("z"));
        assert_eq!(expr, Expr::Add(vec![sym("x"), sym("y"), sym("z")]));

        let mut expr = sym("a") * sym("b");
        expr *= sym("c") * sym("d");
        assert_eq!(expr, Expr::Mul(vec![sym("a"), sym("b"), sym("c"), sym("d")]));
    }

    #[test]
    fn add_assign_numbers() {
        let mut expr = Expr::integer(2);
        expr += Expr::integer(5);
        assert_eq!(expr, Expr::integer(7));

        let mut expr = sym("x");
        expr += Expr::integer(5);
        assert_eq!(expr, Expr::Add(vec![sym("x"), Expr::integer(5)]));
    }

    #[test]
    fn negate() {
        assert_eq!(-Expr::integer(3), Expr::integer(-3));
        assert_eq!(-Expr::float(float(1.5)), Expr::float(float(-1.5)));
        assert_eq!(-sym("x"), Expr::Mul(vec![Expr::integer(-1), sym("x")]));
    }

    #[test]
    fn downgrade() {
        assert_eq!(Expr::Add(vec![]).downgrade(), Expr::integer(0));
        assert_eq!(Expr::Mul(vec![]).downgrade(), Expr::integer(1));
        assert_eq!(Expr::Mul(vec![sym("q")]).downgrade(), sym("q"));
    }

    #[test]
    fn fmt_expr() {
        let expr = Expr::Mul(vec![
            Expr::integer(8),
            sym("a").pow(Expr::integer(73)),
            (sym("a") + sym("b")).sqrt(),
        ]);
        assert_eq!(expr.to_string(), "8 * a^73 * (a + b)^2^-1");
    }

    #[test]
    fn sqrt_exponent_is_canonical_half() {
        let root = sym("x").sqrt();
        assert_eq!(root, sym("x").pow(Expr::integer(2).recip()));
        if let Expr::Exp(_, exp) = &root {
            assert_eq!(exp.as_integer_recip().map(|n| *n == 2), Some(true));
        } else {
            panic!("expected a power, got {root}");
        }
    }

    #[test]
    fn fmt_negative_base() {
        let expr = Expr::integer(-2).pow(sym("x"));
        assert_eq!(expr.to_string(), "(-2)^x");
    }

    #[test]
    fn symbols_in_calls() {
        let expr = Expr::call("sin", vec![sym("x") * sym("y")]) + sym("z");
        assert_eq!(expr.free_symbols().into_iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert!(expr.contains(&sym("y")));
        assert!(!expr.contains(&sym("w")));
    }
}
