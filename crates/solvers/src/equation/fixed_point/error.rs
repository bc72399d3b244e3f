use thiserror::Error;

/// Errors that prevent a fixed-point run from starting.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("initial guess must be finite, got {x0}")]
    NonFiniteGuess { x0: f64 },
}

/// Which evaluation in a step faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Computing the next iterate `g(x_k)`.
    Map,
    /// Computing the residual `f(x_{k+1})` of a new iterate.
    Residual,
}

/// Why an evaluation faulted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Cause<E> {
    #[error("model call failed")]
    Model(#[source] E),

    #[error("non-finite value {value}")]
    NonFinite { value: f64 },
}

/// A numeric fault that ended a fixed-point run.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("evaluation failed at x = {x} ({stage:?})")]
pub struct Fault<E> {
    /// Which evaluation faulted.
    pub stage: Stage,
    /// The point being evaluated.
    pub x: f64,
    /// What went wrong.
    #[source]
    pub cause: Cause<E>,
}

impl<E> Fault<E> {
    pub(super) fn new(stage: Stage, x: f64, cause: Cause<E>) -> Self {
        Self { stage, x, cause }
    }
}
