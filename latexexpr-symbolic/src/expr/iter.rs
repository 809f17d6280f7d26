use super::{Expr, Primary};

/// An iterator that traverses the tree of expressions in left-to-right post-order (i.e.
/// depth-first), descending into the arguments of function calls.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator starting at the given expression.
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression is the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        self.last_visited
            .map(|last_visited| std::ptr::eq(last_visited, expr))
            .unwrap_or(false)
    }

    /// Visits the node on top of the stack if all of its children were visited, otherwise pushes
    /// the children.
    fn descend(&mut self, children: &'a [Expr]) -> Option<Option<&'a Expr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                self.stack.extend(children.iter().rev());
                None
            },
            _ => Some(self.visit()),
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            let visited = match expr {
                Expr::Primary(Primary::Call(_, args)) => self.descend(args),
                Expr::Primary(_) => Some(self.visit()),
                Expr::Add(terms) => self.descend(terms),
                Expr::Mul(factors) => self.descend(factors),
                Expr::Exp(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        Some(self.visit())
                    } else {
                        self.stack.push(rhs);
                        self.stack.push(lhs);
                        None
                    }
                },
            };

            if let Some(visited) = visited {
                return visited;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        // x^2 + sin(y)
        let expr = Expr::symbol("x").pow(Expr::integer(2))
            + Expr::call("sin", vec![Expr::symbol("y")]);
        let visited = expr.post_order_iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "2", "x^2", "y", "sin(y)", "x^2 + sin(y)"]);
    }
}
