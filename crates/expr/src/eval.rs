use crate::{BinaryOp, EvalFault, Node};

/// Evaluates a tree at `x`.
///
/// Operands are always finite when an operation runs; the first operation
/// that produces a non-finite value is reported as the fault.
pub(crate) fn eval(node: &Node, x: f64) -> Result<f64, EvalFault> {
    match node {
        Node::Number(value) => Ok(*value),
        Node::Variable => Ok(x),
        Node::Neg(arg) => Ok(-eval(arg, x)?),
        Node::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs, x)?;
            let rhs = eval(rhs, x)?;
            binary(*op, lhs, rhs)
        }
        Node::Call { function, arg } => {
            let arg = eval(arg, x)?;
            if !function.accepts(arg) {
                return Err(EvalFault::Domain {
                    function: function.name(),
                    arg,
                });
            }
            finite(function.apply(arg), function.name())
        }
    }
}

fn binary(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, EvalFault> {
    #[allow(clippy::float_cmp)]
    let zero_divisor = match op {
        BinaryOp::Div => rhs == 0.0,
        BinaryOp::Pow => lhs == 0.0 && rhs < 0.0,
        _ => false,
    };
    if zero_divisor {
        return Err(EvalFault::DivisionByZero);
    }

    finite(op.apply(lhs, rhs), op.symbol())
}

fn finite(value: f64, op: &'static str) -> Result<f64, EvalFault> {
    if value.is_nan() {
        Err(EvalFault::Undefined { op })
    } else if value.is_infinite() {
        Err(EvalFault::Overflow { op })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::parse::{Parser, Symbols};

    fn eval_at(src: &str, x: f64) -> Result<f64, EvalFault> {
        let node = Parser::new(src, Symbols::Formula { variable: "x" })
            .and_then(Parser::parse)
            .expect("should parse");
        eval(&node, x)
    }

    #[test]
    fn arithmetic() {
        assert_relative_eq!(eval_at("2 * x + 1", 3.0).unwrap(), 7.0);
        assert_relative_eq!(eval_at("x^2 - 2", 1.5).unwrap(), 0.25);
        assert_relative_eq!(eval_at("-x^2", 3.0).unwrap(), -9.0);
        assert_relative_eq!(eval_at("(-x)^2", 3.0).unwrap(), 9.0);
        assert_relative_eq!(eval_at("2^-1", 0.0).unwrap(), 0.5);
        assert_relative_eq!(eval_at("x / 4", 2.0).unwrap(), 0.5);
    }

    #[test]
    fn transcendental() {
        assert_relative_eq!(eval_at("x - cos(x)", 0.0).unwrap(), -1.0);
        assert_relative_eq!(eval_at("exp(ln(x))", 2.5).unwrap(), 2.5, epsilon = 1e-12);
        assert_relative_eq!(eval_at("sqrt(x) + cbrt(-8)", 9.0).unwrap(), 1.0);
        assert_relative_eq!(eval_at("log10(x) + log2(8)", 100.0).unwrap(), 5.0);
        assert_relative_eq!(eval_at("abs(x) * sin(pi / 2)", -3.0).unwrap(), 3.0);
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval_at("1 / x", 0.0), Err(EvalFault::DivisionByZero));
        assert_eq!(eval_at("x^-1", 0.0), Err(EvalFault::DivisionByZero));
    }

    #[test]
    fn domain_errors() {
        assert_eq!(
            eval_at("sqrt(x)", -4.0),
            Err(EvalFault::Domain {
                function: "sqrt",
                arg: -4.0,
            })
        );
        assert!(matches!(
            eval_at("ln(x)", 0.0),
            Err(EvalFault::Domain { function: "ln", .. })
        ));
        assert!(matches!(
            eval_at("acos(x)", 2.0),
            Err(EvalFault::Domain { function: "acos", .. })
        ));
    }

    #[test]
    fn undefined_real_power() {
        assert_eq!(
            eval_at("x^(1/3)", -8.0),
            Err(EvalFault::Undefined { op: "^" })
        );
    }

    #[test]
    fn overflow() {
        assert_eq!(eval_at("exp(x)", 1000.0), Err(EvalFault::Overflow { op: "exp" }));
        assert_eq!(eval_at("x * x", 1e200), Err(EvalFault::Overflow { op: "*" }));
        assert_eq!(eval_at("x^2", -1e200), Err(EvalFault::Overflow { op: "^" }));
    }
}
