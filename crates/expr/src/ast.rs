//! Syntax tree for compiled formulas.

use std::fmt;

/// A node in a compiled formula.
///
/// Trees are small and owned; constants such as `pi` are resolved to
/// [`Node::Number`] at parse time, so the only free symbol left is
/// [`Node::Variable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A finite numeric literal.
    Number(f64),

    /// The formula's free variable.
    Variable,

    /// Negation: -expr.
    Neg(Box<Node>),

    /// A binary operation: lhs op rhs.
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },

    /// A function application: function(arg).
    Call { function: Function, arg: Box<Node> },
}

impl Node {
    /// Returns true if the tree references the free variable anywhere.
    #[must_use]
    pub fn has_variable(&self) -> bool {
        match self {
            Node::Number(_) => false,
            Node::Variable => true,
            Node::Neg(arg) | Node::Call { arg, .. } => arg.has_variable(),
            Node::Binary { lhs, rhs, .. } => lhs.has_variable() || rhs.has_variable(),
        }
    }
}

/// Binary operators, in the grammar's notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Returns the operator symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    pub(crate) fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The closed set of elementary functions a formula may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm, spelled `ln` or `log`.
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
}

impl Function {
    /// Looks up a function by the name used in formulas.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "exp" => Function::Exp,
            "ln" | "log" => Function::Ln,
            "log10" => Function::Log10,
            "log2" => Function::Log2,
            "sqrt" => Function::Sqrt,
            "cbrt" => Function::Cbrt,
            "abs" => Function::Abs,
            _ => return None,
        };
        Some(function)
    }

    /// Returns the canonical name of the function.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log10 => "log10",
            Function::Log2 => "log2",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Abs => "abs",
        }
    }

    /// Returns true if `arg` lies in the real domain of the function.
    #[must_use]
    pub fn accepts(self, arg: f64) -> bool {
        match self {
            Function::Asin | Function::Acos => (-1.0..=1.0).contains(&arg),
            Function::Ln | Function::Log10 | Function::Log2 => arg > 0.0,
            Function::Sqrt => arg >= 0.0,
            _ => true,
        }
    }

    pub(crate) fn apply(self, arg: f64) -> f64 {
        match self {
            Function::Sin => arg.sin(),
            Function::Cos => arg.cos(),
            Function::Tan => arg.tan(),
            Function::Asin => arg.asin(),
            Function::Acos => arg.acos(),
            Function::Atan => arg.atan(),
            Function::Sinh => arg.sinh(),
            Function::Cosh => arg.cosh(),
            Function::Tanh => arg.tanh(),
            Function::Exp => arg.exp(),
            Function::Ln => arg.ln(),
            Function::Log10 => arg.log10(),
            Function::Log2 => arg.log2(),
            Function::Sqrt => arg.sqrt(),
            Function::Cbrt => arg.cbrt(),
            Function::Abs => arg.abs(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for function in [Function::Sin, Function::Ln, Function::Log10, Function::Cbrt] {
            assert_eq!(Function::from_name(function.name()), Some(function));
        }
        assert_eq!(Function::from_name("log"), Some(Function::Ln));
        assert_eq!(Function::from_name("sec"), None);
    }

    #[test]
    fn domains() {
        assert!(Function::Sqrt.accepts(0.0));
        assert!(!Function::Sqrt.accepts(-1e-300));
        assert!(!Function::Ln.accepts(0.0));
        assert!(!Function::Acos.accepts(1.5));
        assert!(Function::Exp.accepts(-1e6));
    }

    #[test]
    fn tracks_variable_use() {
        let constant = Node::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Node::Number(1.0)),
            rhs: Box::new(Node::Number(2.0)),
        };
        assert!(!constant.has_variable());

        let call = Node::Call {
            function: Function::Cos,
            arg: Box::new(Node::Neg(Box::new(Node::Variable))),
        };
        assert!(call.has_variable());
    }
}
