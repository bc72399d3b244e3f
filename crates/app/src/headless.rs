//! The display loop without a window: results are written to the log.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use fixpoint_channel::ResultMessage;
use fixpoint_plot::{PlotData, Poller, Renderer};

/// Logs each result with a summary of its plot.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, message: &ResultMessage, plot: PlotData) {
        tracing::info!(
            function = message.expression(),
            status = %message.status(),
            iterations = message.x_values().len().saturating_sub(1),
            root = plot.root,
            curve_points = plot.curve.len(),
            "result"
        );
    }
}

/// Polls for results every `period`, forever.
///
/// A late tick is skipped rather than replayed, since one drain picks up
/// everything that queued in the meantime.
pub async fn run<R: Renderer>(poller: Poller, period: Duration, mut renderer: R) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        poller.tick(&mut renderer);
    }
}
