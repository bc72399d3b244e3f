//! The `fixpoint` application: an HTTP compute endpoint that publishes each
//! result to a channel, and a display loop that polls the channel and draws
//! the iterates.
//!
//! The binary wires these together. The pieces are exposed as a library so
//! they can be tested, and so the viewer's entry form can share [`compute`]
//! with the HTTP handler.

pub mod api;
pub mod compute;
pub mod config;
pub mod headless;
pub mod logging;
pub mod routes;

#[cfg(feature = "gui")]
pub mod viewer;

pub use compute::{Computation, ComputeError, compute};
