//! Core traits and types for the fixpoint workspace.
//!
//! This crate defines the shared abstractions that the expression compiler,
//! the solvers, and their observers build on:
//!
//! - [`Model`] — a callable that maps a typed input to a typed output
//! - [`FixedPointMap`] — the map `g(x) = x - f(x)` induced by a scalar model
//! - [`Observer`] — receives solver events and optionally returns control actions

mod fixed_point_map;
mod model;
mod observer;

pub use fixed_point_map::FixedPointMap;
pub use model::Model;
pub use observer::Observer;
