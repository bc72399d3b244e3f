use fixpoint_expr::Expression;

/// Number of curve samples used when none is configured.
pub const DEFAULT_SAMPLES: usize = 200;

/// Drawable data for one fixed-point run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    /// Evenly spaced `[x, f(x)]` samples spanning the iterates.
    ///
    /// Points where `f` faults are left out, so the curve may have gaps.
    pub curve: Vec<[f64; 2]>,

    /// `[x_k, f(x_k)]` for each iterate where `f` evaluates, in order.
    pub markers: Vec<[f64; 2]>,

    /// The final iterate, the reported root approximation.
    pub root: f64,
}

impl PlotData {
    /// Samples `expression` over the span of `x_values`.
    ///
    /// The curve covers `[min, max]` of the finite iterates, widened by one
    /// unit on each side when that span is a single point. At least two
    /// samples are always taken.
    ///
    /// Returns `None` if `x_values` is empty.
    #[must_use]
    pub fn sample(expression: &Expression, x_values: &[f64], samples: usize) -> Option<Self> {
        let root = *x_values.last()?;

        let markers = x_values
            .iter()
            .filter_map(|&x| expression.eval(x).ok().map(|y| [x, y]))
            .collect();

        let curve = span(x_values)
            .map(|(lo, hi)| linspace(lo, hi, samples.max(2)))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|x| expression.eval(x).ok().map(|y| [x, y]))
            .collect();

        Some(Self {
            curve,
            markers,
            root,
        })
    }
}

/// Returns the closed range covered by the finite values, if any.
fn span(values: &[f64]) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })?;

    if hi > lo {
        Some((lo, hi))
    } else {
        Some((lo - 1.0, hi + 1.0))
    }
}

/// Returns `n >= 2` evenly spaced points from `lo` to `hi` inclusive.
#[allow(clippy::cast_precision_loss)]
fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { hi } else { lo + step * i as f64 })
        .collect()
}
