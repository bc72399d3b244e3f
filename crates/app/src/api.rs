//! JSON bodies for the compute endpoint.

use serde::{Deserialize, Serialize};

use fixpoint_expr::{ArithmeticError, evaluate_arithmetic};
use fixpoint_solvers::equation::fixed_point::Status;

/// A request to find a root of `function` by fixed-point iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// The formula `f(x)` whose root is sought.
    pub function: String,
    pub initial_guess: f64,
    pub tolerance: Tolerance,
    pub max_iterations: usize,
}

impl Default for ComputeRequest {
    fn default() -> Self {
        Self {
            function: "x - cos(x)".to_owned(),
            initial_guess: 1.0,
            tolerance: Tolerance::Number(1e-6),
            max_iterations: 100,
        }
    }
}

/// A tolerance given either as a number or as arithmetic text like `"10^-6"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tolerance {
    Number(f64),
    Text(String),
}

impl Tolerance {
    /// Returns the numeric value, evaluating text with the restricted
    /// arithmetic parser.
    ///
    /// # Errors
    ///
    /// Returns an [`ArithmeticError`] if the text is not plain arithmetic or
    /// has no finite value. Range checks are left to the solver config.
    pub fn value(&self) -> Result<f64, ArithmeticError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => evaluate_arithmetic(text),
        }
    }
}

/// The outcome of a fixed-point run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResponse {
    /// The final iterate.
    pub root_approximation: f64,
    pub iterations: usize,
    /// Every iterate, initial guess first.
    pub x_values: Vec<f64>,
    pub status: ResponseStatus,
}

/// Wire form of [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Converged,
    MaxIters,
    EvaluationFailed,
    StoppedByObserver,
}

impl From<Status> for ResponseStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Converged => Self::Converged,
            Status::MaxIters => Self::MaxIters,
            Status::EvaluationFailed => Self::EvaluationFailed,
            Status::StoppedByObserver => Self::StoppedByObserver,
        }
    }
}

/// Body of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
