use crate::CfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Error scale for a component whose magnitude moved between `a` and `b`.
    pub fn scale(&self, a: Real, b: Real) -> Real {
        self.abs + self.rel * a.abs().max(b.abs())
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CfError::NonFinite { what, value: v })
    }
}

/// Check that `v` lies in the closed interval `[min, max]`.
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, CfError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(CfError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}
