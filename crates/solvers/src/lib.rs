//! Numerical solvers for the fixpoint workspace.
//!
//! Solvers are generic over [`fixpoint_core::Model`] and report progress to an
//! [`fixpoint_core::Observer`], so the same loop serves headless batch use,
//! logging, and interactive plotting.

pub mod equation;
