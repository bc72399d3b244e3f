use super::{Cause, Stage};

/// Events emitted by the fixed-point solver, one per step.
///
/// `E` is the model's error type.
#[derive(Debug)]
pub enum Event<'a, E> {
    /// A step completed.
    Stepped {
        /// Step counter (1-based).
        iter: usize,
        /// The new iterate `x_{k+1}`.
        x: f64,
        /// The previous iterate `x_k`.
        prev: f64,
        /// The residual `f(x_{k+1})`.
        residual: f64,
    },

    /// A step faulted; the run ends after this event.
    Failed {
        /// Step counter (1-based).
        iter: usize,
        /// Which evaluation faulted.
        stage: Stage,
        /// The point being evaluated.
        x: f64,
        /// What went wrong.
        cause: &'a Cause<E>,
    },
}

impl<E> Event<'_, E> {
    /// Returns the step counter.
    #[must_use]
    pub fn iter(&self) -> usize {
        match self {
            Self::Stepped { iter, .. } | Self::Failed { iter, .. } => *iter,
        }
    }

    /// Returns the x value that was produced (or attempted).
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Self::Stepped { x, .. } | Self::Failed { x, .. } => *x,
        }
    }

    /// Returns the residual, or `NaN` for a failed step.
    #[must_use]
    pub fn residual(&self) -> f64 {
        match self {
            Self::Stepped { residual, .. } => *residual,
            Self::Failed { .. } => f64::NAN,
        }
    }
}
