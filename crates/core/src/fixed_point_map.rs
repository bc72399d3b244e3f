use crate::Model;

/// The fixed-point map `g(x) = x - f(x)` induced by a scalar model `f`.
///
/// A root of `f` is exactly a point where `g(x) = x`, so iterating `g`
/// searches for roots of `f`. The map adds no checks of its own: a failed
/// call to `f` is returned unchanged, and finite checks belong to the caller.
#[derive(Debug, Clone, Copy)]
pub struct FixedPointMap<M> {
    inner: M,
}

impl<M> FixedPointMap<M>
where
    M: Model<Input = f64, Output = f64>,
{
    /// Wraps `f` to produce its fixed-point map.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// Returns the wrapped model `f`.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M> Model for FixedPointMap<M>
where
    M: Model<Input = f64, Output = f64>,
{
    type Input = f64;
    type Output = f64;
    type Error = M::Error;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(x - self.inner.call(x)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    /// f(x) = x - cos(x), so g(x) = cos(x).
    struct XMinusCos;

    impl Model for XMinusCos {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Infallible> {
            Ok(x - x.cos())
        }
    }

    #[test]
    fn subtracts_model_from_identity() {
        let g = FixedPointMap::new(XMinusCos);
        let x = 0.3_f64;
        let gx = g.call(&x).unwrap();
        assert!((gx - x.cos()).abs() < 1e-15);
    }

    #[test]
    fn exposes_inner_model() {
        let g = FixedPointMap::new(XMinusCos);
        assert_eq!(g.inner().call(&0.0), Ok(-1.0));
    }
}
