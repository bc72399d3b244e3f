//! Plot data for fixed-point iteration results, and the poll step that
//! turns queued results into drawable plots.
//!
//! [`PlotData::sample`] is a pure function from a formula and its iterates to
//! curve, marker, and root data. [`Poller`] owns the consuming end of a result
//! channel and, on each [`tick`][Poller::tick], hands every queued result to a
//! [`Renderer`] in the order it was published.

mod data;
mod poller;

pub use data::{DEFAULT_SAMPLES, PlotData};
pub use poller::{Poller, Renderer};
