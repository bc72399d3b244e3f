use fixpoint_solvers::equation::fixed_point::{Status, Trace};

/// A completed computation, ready to be displayed.
///
/// Owns a copy of the iterate history, so the producer keeps nothing that
/// the consumer can observe.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMessage {
    expression: String,
    x_values: Vec<f64>,
    status: Status,
}

impl ResultMessage {
    /// Creates a message from its parts.
    pub fn new(expression: impl Into<String>, x_values: Vec<f64>, status: Status) -> Self {
        Self {
            expression: expression.into(),
            x_values,
            status,
        }
    }

    /// Snapshots a solver trace for the formula it was computed from.
    pub fn from_trace<E>(expression: impl Into<String>, trace: &Trace<E>) -> Self {
        Self::new(expression, trace.iterates().to_vec(), trace.status())
    }

    /// Returns the formula text.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the iterates, initial guess first.
    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    /// Returns how the computation ended.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the final iterate, if there is one.
    #[must_use]
    pub fn root(&self) -> Option<f64> {
        self.x_values.last().copied()
    }
}
