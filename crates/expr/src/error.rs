use thiserror::Error;

/// Errors that can occur when compiling a formula.
///
/// Every variant that points into the source carries `pos`, the byte offset
/// of the offending input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("formula is empty")]
    Empty,

    #[error("unexpected character `{ch}` at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number `{text}` at {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unexpected `{found}` at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of formula")]
    UnexpectedEnd,

    #[error("unknown symbol `{name}` at {pos}")]
    UnknownSymbol { name: String, pos: usize },

    #[error("unknown function `{name}` at {pos}")]
    UnknownFunction { name: String, pos: usize },

    #[error("formula nests or chains too deeply at {pos}")]
    TooDeep { pos: usize },

    #[error("invalid variable name `{name}`")]
    InvalidVariable { name: String },
}

/// Numeric faults raised while evaluating a compiled formula.
///
/// A fault is raised at the first operation that turns finite operands into a
/// non-finite result, so the variant names the operation responsible.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvalFault {
    #[error("input {value} is not finite")]
    NonFiniteInput { value: f64 },

    #[error("division by zero")]
    DivisionByZero,

    #[error("{function}({arg}) is outside the domain of {function}")]
    Domain { function: &'static str, arg: f64 },

    #[error("`{op}` has no real result")]
    Undefined { op: &'static str },

    #[error("`{op}` overflowed")]
    Overflow { op: &'static str },
}
