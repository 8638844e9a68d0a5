//! TransientModel implementation of the circular-flow system.

use cf_core::Tolerances;
use cf_sim::{SimResult, TransientModel};

use crate::params::FlowParams;
use crate::rates;
use crate::state::FlowState;

/// Circular-flow model bound to one immutable parameter set.
#[derive(Clone, Debug)]
pub struct CircularFlowModel {
    params: FlowParams,
}

impl CircularFlowModel {
    pub fn new(params: FlowParams) -> Self {
        Self { params }
    }
}

impl TransientModel for CircularFlowModel {
    type State = FlowState;

    fn initial_state(&self) -> FlowState {
        FlowState::INITIAL
    }

    fn rhs(&mut self, t: f64, x: &FlowState) -> SimResult<FlowState> {
        Ok(rates::derivative(&self.params, x, t))
    }

    fn add(&self, a: &FlowState, b: &FlowState) -> FlowState {
        a.zip_with(b, |x, y| x + y)
    }

    fn scale(&self, a: &FlowState, scale: f64) -> FlowState {
        a.map(|x| x * scale)
    }

    fn error_norm(
        &self,
        err: &FlowState,
        x_old: &FlowState,
        x_new: &FlowState,
        tol: Tolerances,
    ) -> f64 {
        let err = err.as_array();
        let old = x_old.as_array();
        let new = x_new.as_array();
        (0..3)
            .map(|i| err[i].abs() / tol.scale(old[i], new[i]))
            .fold(0.0, f64::max)
    }

    fn is_finite(&self, x: &FlowState) -> bool {
        x.is_finite()
    }

    fn breakpoints(&self) -> Vec<f64> {
        rates::discontinuities(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::FlowRates;

    #[test]
    fn rhs_matches_rate_balance() {
        let mut model = CircularFlowModel::new(FlowParams::default());
        let x = FlowState::new(80.0, 40.0, 12.0);
        let d = model.rhs(35.0, &x).unwrap();
        let r = FlowRates::compute(&FlowParams::default(), &x, 35.0);
        assert_eq!(d, r.derivative());
        assert_eq!(r.effective_capacity, 20.0);
    }

    #[test]
    fn error_norm_is_max_component() {
        let model = CircularFlowModel::new(FlowParams::default());
        let tol = Tolerances { abs: 1.0, rel: 0.0 };
        let zero = FlowState::new(0.0, 0.0, 0.0);
        let err = FlowState::new(0.5, -2.0, 1.0);
        assert_eq!(model.error_norm(&err, &zero, &zero, tol), 2.0);
    }

    #[test]
    fn breakpoints_follow_params() {
        let model = CircularFlowModel::new(FlowParams {
            crisis_enabled: true,
            ..FlowParams::default()
        });
        assert_eq!(model.breakpoints(), vec![30.0, 40.0]);
    }
}
