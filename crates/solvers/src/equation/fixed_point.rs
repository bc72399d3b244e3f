//! Fixed-point iteration for roots of a scalar function.
//!
//! # Algorithm
//!
//! Seeking a root of `f` is equivalent to seeking a fixed point of
//! `g(x) = x - f(x)`. Starting at `x_0`, the solver repeatedly computes
//! `x_{k+1} = g(x_k)` and appends it to the [`Trace`]. It stops as
//! [`Status::Converged`] as soon as either `|f(x_{k+1})| < tol` or
//! `|x_{k+1} - x_k| < tol`, and as [`Status::MaxIters`] after
//! `max_iters` steps. Both comparisons are strict, so a zero tolerance never
//! converges.
//!
//! # When to Use
//!
//! The iteration converges only when `g` is locally contracting around the
//! root (`|g'(x*)| < 1`). It has no bracketing, step control, or divergence
//! detection: a diverging run ends by exhausting `max_iters` or by a numeric
//! fault once the iterates overflow.
//!
//! # Faults
//!
//! A model error or a non-finite value while evaluating `g(x_k)` or
//! `f(x_{k+1})` ends the run with [`Status::EvaluationFailed`]. This is an
//! outcome, not an error: the trace keeps every iterate computed so far and
//! records the [`Fault`]. A fault in `g(x_k)` appends nothing; a fault in
//! `f(x_{k+1})` keeps the (finite) `x_{k+1}` and counts it as a step, so
//! `iterates().len() == iters() + 1` in every status.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per step:
//!
//! - [`Event::Stepped`] — a new iterate and its residual were computed
//! - [`Event::Failed`] — the step faulted; the run is ending
//!
//! Observers can return [`Action::StopEarly`] from a `Stepped` event to halt
//! with [`Status::StoppedByObserver`]. Convergence takes precedence: a step
//! that meets the tolerance ends as [`Status::Converged`] whatever the
//! observer returned.

mod action;
mod config;
mod error;
mod event;
mod trace;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::{Cause, Error, Fault, Stage};
pub use event::Event;
pub use trace::{Status, Trace};

use fixpoint_core::{FixedPointMap, Model, Observer};

/// Runs fixed-point iteration on `model` from `x0`.
///
/// The observer receives an [`Event`] for every step.
/// See the [module docs](self) for the stopping policy.
///
/// # Errors
///
/// Returns [`Error::NonFiniteGuess`] if `x0` is NaN or infinite. Numeric
/// faults during iteration are not errors; they end the run with
/// [`Status::EvaluationFailed`].
pub fn solve<M, Obs>(
    model: &M,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Trace<M::Error>, Error>
where
    M: Model<Input = f64, Output = f64>,
    Obs: for<'a> Observer<Event<'a, M::Error>, Action>,
{
    if !x0.is_finite() {
        return Err(Error::NonFiniteGuess { x0 });
    }

    let map = FixedPointMap::new(model);
    let tol = config.tolerance();
    let mut trace = Trace::start(x0);

    for iter in 1..=config.max_iters() {
        let prev = trace.root();

        let x = match checked(map.call(&prev)) {
            Ok(x) => x,
            Err(cause) => {
                let fault = Fault::new(Stage::Map, prev, cause);
                return Ok(trace.fail(iter, fault, &mut observer));
            }
        };
        trace.push(x);

        let residual = match checked(model.call(&x)) {
            Ok(residual) => residual,
            Err(cause) => {
                let fault = Fault::new(Stage::Residual, x, cause);
                return Ok(trace.fail(iter, fault, &mut observer));
            }
        };
        trace.set_residual(residual);

        let event = Event::Stepped {
            iter,
            x,
            prev,
            residual,
        };

        let action = observer.observe(&event);

        if residual.abs() < tol || (x - prev).abs() < tol {
            return Ok(trace.finish(Status::Converged));
        }

        if let Some(Action::StopEarly) = action {
            return Ok(trace.finish(Status::StoppedByObserver));
        }
    }

    Ok(trace.finish(Status::MaxIters))
}

/// Runs fixed-point iteration without observation.
///
/// # Errors
///
/// Returns [`Error::NonFiniteGuess`] if `x0` is NaN or infinite.
pub fn solve_unobserved<M>(model: &M, x0: f64, config: &Config) -> Result<Trace<M::Error>, Error>
where
    M: Model<Input = f64, Output = f64>,
{
    solve(model, x0, config, ())
}

/// Promotes a non-finite model output to a fault.
fn checked<E>(result: Result<f64, E>) -> Result<f64, Cause<E>> {
    match result {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(Cause::NonFinite { value }),
        Err(error) => Err(Cause::Model(error)),
    }
}
