//! User-tunable parameters and their domains.

use cf_core::ensure_in_range;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Closed numeric domain of one parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamDomain {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    /// Slider increment.
    pub step: f64,
    pub default: f64,
}

impl ParamDomain {
    fn check(&self, v: f64) -> ModelResult<f64> {
        ensure_in_range(v, self.min, self.max, self.name).map_err(|_| {
            ModelError::InvalidParameter {
                field: self.name,
                value: v,
                min: self.min,
                max: self.max,
            }
        })
    }
}

/// Parameters of one simulation run.
///
/// Constructed values are always inside their domains; scenario files that
/// omit a field get its default.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowParams {
    /// Fraction of reclaimed recyclable material that returns as raw material.
    pub efficiency: f64,
    /// Recycling capacity before t = 30; doubles from t = 30 on.
    pub base_capacity: u32,
    /// Cut virgin raw-material inflow to 20% from t = 40 on.
    pub crisis_enabled: bool,
}

impl FlowParams {
    pub const EFFICIENCY: ParamDomain = ParamDomain {
        name: "efficiency",
        min: 0.10,
        max: 1.00,
        step: 0.05,
        default: 0.60,
    };

    pub const BASE_CAPACITY: ParamDomain = ParamDomain {
        name: "base_capacity",
        min: 5.0,
        max: 30.0,
        step: 1.0,
        default: 10.0,
    };

    pub fn new(efficiency: f64, base_capacity: u32, crisis_enabled: bool) -> ModelResult<Self> {
        let params = Self {
            efficiency,
            base_capacity,
            crisis_enabled,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> ModelResult<()> {
        Self::EFFICIENCY.check(self.efficiency)?;
        Self::BASE_CAPACITY.check(self.base_capacity as f64)?;
        Ok(())
    }

    /// Pull every field into its domain, the way a slider would.
    pub fn clamped(self) -> Self {
        let efficiency = if self.efficiency.is_finite() {
            self.efficiency
                .clamp(Self::EFFICIENCY.min, Self::EFFICIENCY.max)
        } else {
            Self::EFFICIENCY.default
        };
        Self {
            efficiency,
            base_capacity: self.base_capacity.clamp(
                Self::BASE_CAPACITY.min as u32,
                Self::BASE_CAPACITY.max as u32,
            ),
            crisis_enabled: self.crisis_enabled,
        }
    }

    pub fn base_capacity_f64(&self) -> f64 {
        self.base_capacity as f64
    }
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            efficiency: Self::EFFICIENCY.default,
            base_capacity: Self::BASE_CAPACITY.default as u32,
            crisis_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widgets() {
        let p = FlowParams::default();
        assert_eq!(p.efficiency, 0.6);
        assert_eq!(p.base_capacity, 10);
        assert!(!p.crisis_enabled);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn domain_bounds_are_inclusive() {
        assert!(FlowParams::new(0.1, 5, false).is_ok());
        assert!(FlowParams::new(1.0, 30, true).is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = FlowParams::new(1.2, 10, false).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                field: "efficiency",
                ..
            }
        ));
        let err = FlowParams::new(0.5, 4, false).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                field: "base_capacity",
                ..
            }
        ));
        assert!(FlowParams::new(f64::NAN, 10, false).is_err());
    }

    #[test]
    fn non_finite_efficiency_reports_parameter_domain() {
        match FlowParams::new(f64::INFINITY, 10, false).unwrap_err() {
            ModelError::InvalidParameter {
                field,
                value,
                min,
                max,
            } => {
                assert_eq!(field, "efficiency");
                assert!(value.is_infinite());
                assert_eq!((min, max), (0.1, 1.0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn clamping_pulls_values_into_domain() {
        let p = FlowParams {
            efficiency: 3.0,
            base_capacity: 100,
            crisis_enabled: true,
        }
        .clamped();
        assert_eq!(p.efficiency, 1.0);
        assert_eq!(p.base_capacity, 30);
        assert!(p.crisis_enabled);
        assert!(p.validate().is_ok());

        let p = FlowParams {
            efficiency: f64::NAN,
            base_capacity: 0,
            crisis_enabled: false,
        }
        .clamped();
        assert_eq!(p.efficiency, 0.6);
        assert_eq!(p.base_capacity, 5);
    }
}
