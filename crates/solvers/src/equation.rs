//! Solvers for equations of one variable — finding `x` with `f(x) = 0`.
//!
//! # Solvers
//!
//! - [`fixed_point`] — iterates the induced map `g(x) = x - f(x)` from an
//!   initial guess

pub mod fixed_point;
