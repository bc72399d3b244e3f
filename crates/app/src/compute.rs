use thiserror::Error;

use fixpoint_channel::ResultMessage;
use fixpoint_expr::{ArithmeticError, EvalFault, Expression, ParseError};
use fixpoint_solvers::equation::fixed_point::{self, Action, Config, ConfigError, Event};

use crate::api::{ComputeRequest, ComputeResponse};

/// Errors that reject a request before any iteration is reported.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComputeError {
    #[error("invalid function: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid tolerance: {0}")]
    Tolerance(#[from] ArithmeticError),

    #[error("invalid solver config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] fixed_point::Error),
}

/// A finished run, in the two shapes its consumers need.
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    /// The reply for the caller that asked.
    pub response: ComputeResponse,
    /// The snapshot to publish for display.
    pub message: ResultMessage,
}

/// Compiles the request's formula and runs fixed-point iteration on it.
///
/// Numeric faults during iteration are not errors; they come back as a
/// response with status `evaluation_failed` and the iterates computed so far.
///
/// # Errors
///
/// Returns a [`ComputeError`] if the formula does not compile, the tolerance
/// cannot be evaluated or is out of range, or the initial guess is not
/// finite.
pub fn compute(request: &ComputeRequest) -> Result<Computation, ComputeError> {
    let expression = Expression::compile(&request.function)?;
    let tolerance = request.tolerance.value()?;
    let config = Config::new(tolerance, request.max_iterations)?;

    let trace = fixed_point::solve(&expression, request.initial_guess, &config, log_step)?;

    if let Some(fault) = trace.fault() {
        tracing::info!(
            function = expression.source(),
            x = fault.x,
            stage = ?fault.stage,
            cause = ?fault.cause,
            "iteration ended on a numeric fault"
        );
    }
    tracing::info!(
        function = expression.source(),
        status = %trace.status(),
        iterations = trace.iters(),
        root = trace.root(),
        "fixed-point run finished"
    );

    let message = ResultMessage::from_trace(expression.source(), &trace);
    let response = ComputeResponse {
        root_approximation: trace.root(),
        iterations: trace.iters(),
        status: trace.status().into(),
        x_values: trace.into_iterates(),
    };

    Ok(Computation { response, message })
}

fn log_step(event: &Event<'_, EvalFault>) -> Option<Action> {
    match event {
        Event::Stepped { iter, x, residual, .. } => {
            tracing::debug!(iter, x, residual, "fixed-point step");
        }
        Event::Failed { iter, x, stage, .. } => {
            tracing::debug!(iter, x, ?stage, "fixed-point step failed");
        }
    }
    None
}
