use std::{fmt, str::FromStr};

use fixpoint_core::{FixedPointMap, Model};

use crate::{
    EvalFault, Function, Node, ParseError, eval,
    parse::{Parser, Symbols},
};

/// The variable name used by [`Expression::compile`].
pub const DEFAULT_VARIABLE: &str = "x";

/// A compiled single-variable formula `f(x)`.
///
/// An `Expression` is immutable once compiled and keeps its source text, so
/// it can be displayed or sent to another thread as text and recompiled
/// there. Compiling the same text twice produces equal expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    variable: String,
    root: Node,
}

impl Expression {
    /// Compiles a formula in the variable `x`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not a well-formed formula or
    /// references a symbol other than `x`, `pi`, `e`, or a known function.
    pub fn compile(source: &str) -> Result<Self, ParseError> {
        Self::compile_with_variable(source, DEFAULT_VARIABLE)
    }

    /// Compiles a formula in the named variable.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidVariable`] if `variable` is not an
    /// identifier or names a function, and any other [`ParseError`] if the
    /// formula itself does not compile.
    pub fn compile_with_variable(source: &str, variable: &str) -> Result<Self, ParseError> {
        if !is_identifier(variable) || Function::from_name(variable).is_some() {
            return Err(ParseError::InvalidVariable {
                name: variable.to_owned(),
            });
        }

        let root = Parser::new(source, Symbols::Formula { variable })?.parse()?;

        Ok(Self {
            source: source.to_owned(),
            variable: variable.to_owned(),
            root,
        })
    }

    /// Returns the formula text this expression was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the name of the free variable.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the syntax tree.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluates `f(x)`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalFault`] if `x` is not finite or any operation in the
    /// formula has no finite real result at `x`.
    pub fn eval(&self, x: f64) -> Result<f64, EvalFault> {
        if !x.is_finite() {
            return Err(EvalFault::NonFiniteInput { value: x });
        }
        eval::eval(&self.root, x)
    }

    /// Returns the induced fixed-point map `g(x) = x - f(x)`.
    #[must_use]
    pub fn fixed_point_map(&self) -> FixedPointMap<&Self> {
        FixedPointMap::new(self)
    }
}

impl Model for Expression {
    type Input = f64;
    type Output = f64;
    type Error = EvalFault;

    fn call(&self, x: &f64) -> Result<f64, EvalFault> {
        self.eval(*x)
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn compiles_and_evaluates() {
        let f = Expression::compile("x - cos(x)").expect("should compile");
        assert_eq!(f.source(), "x - cos(x)");
        assert_eq!(f.variable(), "x");
        assert_relative_eq!(f.eval(0.0).unwrap(), -1.0);
        assert_relative_eq!(f.call(&0.0).unwrap(), -1.0);
    }

    #[test]
    fn compilation_is_repeatable() {
        let first = Expression::compile("x^3 - 2*x + exp(-x)").unwrap();
        let second = Expression::compile("x^3 - 2*x + exp(-x)").unwrap();
        assert_eq!(first, second);

        for x in [-2.0, -0.5, 0.0, 0.25, 1.0, 3.75] {
            assert_eq!(
                first.eval(x).unwrap().to_bits(),
                second.eval(x).unwrap().to_bits()
            );
        }
    }

    #[test]
    fn fails_fast_on_bad_syntax() {
        assert!(matches!(
            Expression::compile("x^^2"),
            Err(ParseError::UnexpectedToken { pos: 2, .. })
        ));
        assert!(matches!(
            "import os".parse::<Expression>(),
            Err(ParseError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn long_operator_chains_are_rejected_at_compile_time() {
        let formula = vec!["x"; 100_000].join(" + ");
        assert!(matches!(
            Expression::compile(&formula),
            Err(ParseError::TooDeep { .. })
        ));

        let f = Expression::compile(&vec!["x"; 200].join(" + ")).unwrap();
        assert_relative_eq!(f.eval(0.5).unwrap(), 100.0);
    }

    #[test]
    fn custom_variable() {
        let f = Expression::compile_with_variable("t^2 - 4", "t").unwrap();
        assert_relative_eq!(f.eval(2.0).unwrap(), 0.0);
        assert!(matches!(
            Expression::compile_with_variable("x", "t"),
            Err(ParseError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn rejects_bad_variable_names() {
        for name in ["", "2x", "x y", "sin"] {
            assert!(matches!(
                Expression::compile_with_variable("1", name),
                Err(ParseError::InvalidVariable { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_finite_input() {
        let f = Expression::compile("x").unwrap();
        assert!(matches!(
            f.eval(f64::NAN),
            Err(EvalFault::NonFiniteInput { .. })
        ));
        assert_eq!(
            f.eval(f64::INFINITY),
            Err(EvalFault::NonFiniteInput {
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn induces_fixed_point_map() {
        let f = Expression::compile("x - cos(x)").unwrap();
        let g = f.fixed_point_map();
        let gx = g.call(&0.5).unwrap();
        assert_relative_eq!(gx, 0.5_f64.cos(), epsilon = 1e-15);
    }

    #[test]
    fn constant_formulas_are_allowed() {
        let f = Expression::compile("2 * pi").unwrap();
        assert!(!f.root().has_variable());
        assert_relative_eq!(f.eval(123.0).unwrap(), std::f64::consts::TAU);
        assert_eq!(f.to_string(), "2 * pi");
    }
}
