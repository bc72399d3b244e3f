//! Compiles textual formulas into real-valued functions of one variable.
//!
//! The accepted grammar is fixed and small on purpose: numeric literals, the
//! constants `pi` and `e`, a single free variable, the operators
//! `+ - * / ^` (with `**` as an alias for `^`), parentheses, and a closed set
//! of elementary functions. Nothing outside that grammar is ever evaluated.
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := unary (("*" | "/") unary)*
//! unary   := ("+" | "-") unary | power
//! power   := primary ("^" unary)?
//! primary := number | constant | variable | function "(" expr ")" | "(" expr ")"
//! ```
//!
//! # Example
//!
//! ```
//! use fixpoint_expr::Expression;
//!
//! let f = Expression::compile("x - cos(x)").unwrap();
//! assert!(f.eval(0.0).unwrap() < 0.0);
//! ```
//!
//! [`evaluate_arithmetic`] reuses the same parser with no symbols at all, for
//! user input such as a tolerance typed as `"10^-6"`.

mod ast;
mod error;
mod eval;
mod expression;
mod lex;
mod parse;

pub use ast::{BinaryOp, Function, Node};
pub use error::{EvalFault, ParseError};
pub use expression::{DEFAULT_VARIABLE, Expression};

use parse::{Parser, Symbols};

/// Evaluates a constant arithmetic expression.
///
/// Only numeric literals, `+ - * / ^`, and parentheses are accepted;
/// identifiers of any kind are rejected as unknown symbols.
///
/// # Errors
///
/// Returns [`ArithmeticError::Parse`] if the text is not a valid arithmetic
/// expression, or [`ArithmeticError::Eval`] if it has no finite value.
pub fn evaluate_arithmetic(text: &str) -> Result<f64, ArithmeticError> {
    let node = Parser::new(text, Symbols::Arithmetic)?.parse()?;
    Ok(eval::eval(&node, 0.0)?)
}

/// Errors from [`evaluate_arithmetic`].
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalFault),
}
