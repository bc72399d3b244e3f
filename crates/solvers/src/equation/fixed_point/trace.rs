use std::fmt;

use fixpoint_core::Observer;

use super::{Action, Event, Fault};

/// How a fixed-point run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Residual or step size fell below the tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// A step produced a model error or a non-finite value.
    EvaluationFailed,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

impl Status {
    /// Returns a stable snake_case name for the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Converged => "converged",
            Status::MaxIters => "max_iters",
            Status::EvaluationFailed => "evaluation_failed",
            Status::StoppedByObserver => "stopped_by_observer",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The iterate history of one fixed-point run.
///
/// The history starts with the initial guess and is never empty; it holds
/// exactly `iters() + 1` finite values, in the order they were computed.
#[derive(Debug, Clone)]
pub struct Trace<E> {
    status: Status,
    iterates: Vec<f64>,
    residual: Option<f64>,
    fault: Option<Fault<E>>,
}

impl<E> Trace<E> {
    /// Returns how the run ended.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns true if the run converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }

    /// Returns the iterates `x_0 ..= x_n`.
    #[must_use]
    pub fn iterates(&self) -> &[f64] {
        &self.iterates
    }

    /// Consumes the trace and returns its iterates.
    #[must_use]
    pub fn into_iterates(self) -> Vec<f64> {
        self.iterates
    }

    /// Returns the number of completed steps.
    #[must_use]
    pub fn iters(&self) -> usize {
        self.iterates.len() - 1
    }

    /// Returns the final iterate, the reported root approximation.
    #[must_use]
    pub fn root(&self) -> f64 {
        self.iterates[self.iterates.len() - 1]
    }

    /// Returns `f(root())` if it was computed.
    ///
    /// This is `None` when the run took no steps, or when evaluating `f` at
    /// the final iterate is what faulted.
    #[must_use]
    pub fn residual(&self) -> Option<f64> {
        self.residual
    }

    /// Returns the fault that ended the run, if any.
    #[must_use]
    pub fn fault(&self) -> Option<&Fault<E>> {
        self.fault.as_ref()
    }

    pub(super) fn start(x0: f64) -> Self {
        Self {
            status: Status::MaxIters,
            iterates: vec![x0],
            residual: None,
            fault: None,
        }
    }

    pub(super) fn push(&mut self, x: f64) {
        self.iterates.push(x);
        self.residual = None;
    }

    pub(super) fn set_residual(&mut self, residual: f64) {
        self.residual = Some(residual);
    }

    pub(super) fn finish(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Reports a faulted step to the observer and ends the run.
    ///
    /// The observer's action is ignored; the run is over either way.
    pub(super) fn fail<Obs>(mut self, iter: usize, fault: Fault<E>, observer: &mut Obs) -> Self
    where
        Obs: for<'a> Observer<Event<'a, E>, Action>,
    {
        let event = Event::Failed {
            iter,
            stage: fault.stage,
            x: fault.x,
            cause: &fault.cause,
        };
        let _ = observer.observe(&event);

        self.fault = Some(fault);
        self.finish(Status::EvaluationFailed)
    }
}
