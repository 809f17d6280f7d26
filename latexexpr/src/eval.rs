//! Numeric evaluation of operations.

use crate::error::Domain;
use crate::node::Node;
use crate::operation::{Operation, OperationKind};
use latexexpr_error::Error;

impl Operation {
    /// Computes the numeric result of the operation.
    ///
    /// Returns [`NoValue`](crate::error::NoValue) if any argument depends on a symbolic variable,
    /// and [`Domain`] if a function is evaluated outside of its domain, such as the square root
    /// of a negative number or a power without a finite value. `Root(n, x)` is `x^(1/n)`, and
    /// `Log(b, x)` is `ln x / ln b`.
    pub fn result(&self) -> Result<f64, Error> {
        self.check_arity()?;
        let values = self.args.iter()
            .map(Node::result)
            .collect::<Result<Vec<_>, _>>()?;
        let domain = |function: &'static str, value: f64| -> Result<f64, Error> {
            Err(Error::new(self.str_symbolic(), Domain { function, value }))
        };

        let v = |idx: usize| values.get(idx).copied().unwrap_or(f64::NAN);
        let (v0, v1) = (v(0), v(1));

        match self.kind {
            OperationKind::Add => Ok(values.iter().sum()),
            OperationKind::Mul => Ok(values.iter().product()),
            OperationKind::Max => Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            OperationKind::Min => Ok(values.iter().copied().fold(f64::INFINITY, f64::min)),

            OperationKind::Sub => Ok(v0 - v1),
            OperationKind::Div | OperationKind::Div2 => {
                if v1 == 0.0 {
                    domain("division", v1)
                } else {
                    Ok(v0 / v1)
                }
            },
            OperationKind::Pow => {
                // 0 to a negative power is infinite
                let result = v0.powf(v1);
                if !result.is_finite() {
                    domain("pow", v0)
                } else {
                    Ok(result)
                }
            },
            OperationKind::Root => {
                if v0 == 0.0 {
                    domain("root", v0)
                } else if v1 < 0.0 {
                    domain("root", v1)
                } else {
                    let result = v1.powf(v0.recip());
                    if result.is_finite() {
                        Ok(result)
                    } else {
                        domain("root", v1)
                    }
                }
            },
            OperationKind::Log => {
                if v1 <= 0.0 {
                    domain("log", v1)
                } else if v0 <= 0.0 || v0 == 1.0 {
                    domain("log", v0)
                } else {
                    Ok(v1.ln() / v0.ln())
                }
            },

            OperationKind::Neg => Ok(-v0),
            OperationKind::Abs => Ok(v0.abs()),
            OperationKind::Sqr => Ok(v0 * v0),
            OperationKind::Sqrt => {
                if v0 < 0.0 {
                    domain("sqrt", v0)
                } else {
                    Ok(v0.sqrt())
                }
            },
            OperationKind::Sin => Ok(v0.sin()),
            OperationKind::Cos => Ok(v0.cos()),
            OperationKind::Tan => Ok(v0.tan()),
            OperationKind::Sinh => Ok(v0.sinh()),
            OperationKind::Cosh => Ok(v0.cosh()),
            OperationKind::Tanh => Ok(v0.tanh()),
            OperationKind::Exp => Ok(v0.exp()),
            OperationKind::Ln => {
                if v0 <= 0.0 {
                    domain("ln", v0)
                } else {
                    Ok(v0.ln())
                }
            },
            OperationKind::Log10 => {
                if v0 <= 0.0 {
                    domain("log10", v0)
                } else {
                    Ok(v0.log10())
                }
            },
            OperationKind::None
                | OperationKind::Pos
                | OperationKind::RBrackets
                | OperationKind::SBrackets
                | OperationKind::CBrackets
                | OperationKind::ABrackets => Ok(v0),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use crate::*;
    use crate::error::{Domain, NoValue};
    use pretty_assertions::assert_eq;

    #[test]
    fn arithmetic() {
        let a = Variable::new("a", 3.0);
        let b = Variable::new("b", 4.0);
        assert_eq!((&a + &b).result().unwrap(), 7.0);
        assert_eq!((&a - &b).result().unwrap(), -1.0);
        assert_eq!(mul([&a, &b, &a]).unwrap().result().unwrap(), 36.0);
        assert_eq!(div(&a, &b).result().unwrap(), 0.75);
        assert_eq!(max([&a, &b]).unwrap().result().unwrap(), 4.0);
        assert_eq!(min([&a, &b]).unwrap().result().unwrap(), 3.0);
        assert_eq!(neg(&a).result().unwrap(), -3.0);
        assert_eq!(sqr(&b).result().unwrap(), 16.0);
        assert_eq!(sbrackets(&b).result().unwrap(), 4.0);
    }

    #[test]
    fn roots_and_logs() {
        let x = Variable::new("x", 27.0);
        assert_float_relative_eq!(root(3, &x).result().unwrap(), 3.0);
        assert_float_relative_eq!(log(3, &x).result().unwrap(), 3.0);
        assert_float_relative_eq!(log10(100).result().unwrap(), 2.0);
        assert_float_relative_eq!(ln(&*E).result().unwrap(), 1.0);
        assert_float_relative_eq!(cosh(0).result().unwrap(), 1.0);
    }

    #[test]
    fn domain_errors() {
        let m = Variable::new("m", -4.0);
        let err = sqrt(&m).result().unwrap_err();
        assert_eq!(err.downcast_ref::<Domain>(), Some(&Domain { function: "sqrt", value: -4.0 }));
        assert_eq!(err.source, r"\sqrt{ {m} }");

        assert!(ln(&m).result().unwrap_err().is::<Domain>());
        assert!(log(1, 5).result().unwrap_err().is::<Domain>());
        assert!(div(1, 0).result().unwrap_err().is::<Domain>());
    }

    #[test]
    fn infinite_powers() {
        let err = pow(0, -1).result().unwrap_err();
        assert_eq!(err.downcast_ref::<Domain>(), Some(&Domain { function: "pow", value: 0.0 }));
        assert!(pow(10, 400).result().unwrap_err().is::<Domain>());
        assert!(root(-1, 0).result().unwrap_err().is::<Domain>());
        assert_eq!(pow(0, 0).result().unwrap(), 1.0);
    }

    #[test]
    fn symbolic_has_no_value() {
        let x = Variable::symbolic("x");
        let err = (Variable::new("a", 1.0) + &x).result().unwrap_err();
        assert_eq!(err.downcast_ref::<NoValue>(), Some(&NoValue { name: "x".to_string() }));
        assert_eq!(err.source, "{x}");
    }
}
