use fixpoint_channel::{ResultMessage, Subscriber};
use fixpoint_expr::Expression;

use crate::{DEFAULT_SAMPLES, PlotData};

/// Displays plots produced by a [`Poller`].
///
/// Implemented for any `FnMut(&ResultMessage, PlotData)`, so closures can be
/// used directly.
pub trait Renderer {
    /// Shows one result and its plot data.
    fn render(&mut self, message: &ResultMessage, plot: PlotData);
}

impl<F> Renderer for F
where
    F: FnMut(&ResultMessage, PlotData),
{
    fn render(&mut self, message: &ResultMessage, plot: PlotData) {
        self(message, plot);
    }
}

/// Turns queued results into plots, one batch per tick.
///
/// The poller never blocks and keeps no state between ticks besides the
/// subscriber itself, so the display loop decides how often to call it.
#[derive(Debug)]
pub struct Poller {
    subscriber: Subscriber,
    samples: usize,
}

impl Poller {
    /// Creates a poller that samples curves at [`DEFAULT_SAMPLES`] points.
    #[must_use]
    pub fn new(subscriber: Subscriber) -> Self {
        Self {
            subscriber,
            samples: DEFAULT_SAMPLES,
        }
    }

    /// Sets the number of curve samples, clamped to at least two.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(2);
        self
    }

    /// Returns the number of curve samples.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Renders every pending result, oldest first.
    ///
    /// A result whose formula no longer compiles or that has no iterates is
    /// logged and skipped. Returns how many results were rendered.
    pub fn tick<R>(&self, renderer: &mut R) -> usize
    where
        R: Renderer + ?Sized,
    {
        let mut rendered = 0;

        for message in self.subscriber.drain() {
            let expression = match Expression::compile(message.expression()) {
                Ok(expression) => expression,
                Err(error) => {
                    tracing::warn!(
                        expression = message.expression(),
                        %error,
                        "skipping result with invalid formula"
                    );
                    continue;
                }
            };

            let Some(plot) = PlotData::sample(&expression, message.x_values(), self.samples)
            else {
                tracing::warn!(
                    expression = message.expression(),
                    "skipping result without iterates"
                );
                continue;
            };

            renderer.render(&message, plot);
            rendered += 1;
        }

        rendered
    }
}
