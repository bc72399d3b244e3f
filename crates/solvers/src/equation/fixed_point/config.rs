use thiserror::Error;

/// Configuration for the fixed-point solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
}

/// Errors that can occur when validating a fixed-point solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and non-negative, got {0}")]
    Tolerance(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iters: 100,
        }
    }
}

impl Config {
    /// Creates a new config with a validated tolerance.
    ///
    /// A zero tolerance is allowed; since convergence is tested with strict
    /// comparisons, such a run always ends by exhausting `max_iters` or by a
    /// fault.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or non-finite.
    pub fn new(tolerance: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Tolerance(tolerance));
        }

        Ok(Self {
            tolerance,
            max_iters,
        })
    }

    /// Returns the convergence tolerance, applied to both the residual and
    /// the step size.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the maximum number of steps.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_tolerance() {
        let config = Config::new(0.0, 10).expect("zero is valid");
        assert_eq!(config.tolerance(), 0.0);
        assert_eq!(config.max_iters(), 10);
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert_eq!(Config::new(-1e-9, 10), Err(ConfigError::Tolerance(-1e-9)));
        assert!(Config::new(f64::NAN, 10).is_err());
        assert!(Config::new(f64::INFINITY, 10).is_err());
    }

    #[test]
    fn default_matches_constructor() {
        assert_eq!(Config::default(), Config::new(1e-6, 100).unwrap());
    }
}
