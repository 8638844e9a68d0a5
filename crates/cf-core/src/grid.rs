//! Output time grids.

use crate::{CfError, CfResult, Real, ensure_finite};

/// `n` evenly spaced samples on `[start, end]`, both endpoints included.
///
/// The last sample is exactly `end` so the integration range is never
/// truncated by accumulated rounding.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Real;
            let mut out: Vec<Real> = (0..n).map(|i| start + step * i as Real).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// A validated, strictly increasing sequence of output times.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    times: Vec<Real>,
}

impl TimeGrid {
    /// Validate an arbitrary sequence of sample times.
    pub fn new(times: Vec<Real>) -> CfResult<Self> {
        if times.is_empty() {
            return Err(CfError::InvalidArg {
                what: "time grid must not be empty",
            });
        }
        for &t in &times {
            ensure_finite(t, "grid time")?;
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CfError::InvalidArg {
                what: "time grid must be strictly increasing",
            });
        }
        Ok(Self { times })
    }

    /// Evenly spaced grid on `[start, end]` with `n` samples.
    pub fn uniform(start: Real, end: Real, n: usize) -> CfResult<Self> {
        ensure_finite(start, "grid start")?;
        ensure_finite(end, "grid end")?;
        if n >= 2 && end <= start {
            return Err(CfError::InvalidArg {
                what: "grid end must be after grid start",
            });
        }
        Self::new(linspace(start, end, n))
    }

    pub fn times(&self) -> &[Real] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn start(&self) -> Real {
        self.times[0]
    }

    pub fn end(&self) -> Real {
        self.times[self.times.len() - 1]
    }

    /// Smallest spacing between consecutive samples, or 0 for a single sample.
    pub fn min_spacing(&self) -> Real {
        if self.times.len() < 2 {
            return 0.0;
        }
        self.times
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(Real::INFINITY, Real::min)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn uniform_grid_is_valid(start in -1e3_f64..1e3, span in 1e-3_f64..1e3, n in 2_usize..500) {
            let grid = TimeGrid::uniform(start, start + span, n).unwrap();
            prop_assert_eq!(grid.len(), n);
            prop_assert_eq!(grid.start(), start);
            prop_assert_eq!(grid.end(), start + span);
            prop_assert!(grid.min_spacing() > 0.0);
        }
    }
}
